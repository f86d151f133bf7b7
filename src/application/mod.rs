// Application layer: the three aggregates and the errors they report.

mod bank;
pub mod error;
mod hotel;
mod library;

pub use bank::*;
pub use error::*;
pub use hotel::*;
pub use library::*;
