pub mod periodic;

pub use periodic::PeriodicTable;
