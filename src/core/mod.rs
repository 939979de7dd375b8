pub mod structure;
pub mod tables;
