/// Shell capacities filled in order. Deliberately not Aufbau: this is the
/// simple Bohr-style shell picture.
const SHELL_CAPACITIES: [u32; 4] = [2, 8, 18, 32];

/// Electron count per occupied shell, filling greedily from the innermost one.
///
/// Filling stops at the last listed shell, so anything past 60 electrons is
/// not represented.
pub fn shell_occupancy(atomic_number: u32) -> Vec<u32> {
    let mut remaining = atomic_number;
    let mut shells = Vec::new();

    for &capacity in &SHELL_CAPACITIES {
        if remaining == 0 {
            break;
        }
        if remaining > capacity {
            shells.push(capacity);
            remaining -= capacity;
        } else {
            shells.push(remaining);
            break;
        }
    }
    shells
}

/// Space-separated shell occupancy, e.g. `"2 8 1"` for sodium.
pub fn electron_configuration(atomic_number: u32) -> String {
    shell_occupancy(atomic_number)
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
