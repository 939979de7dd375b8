pub mod canonical;
pub mod electrons;
pub mod formula;
