pub mod error;
pub mod tables;

pub use error::Error;
