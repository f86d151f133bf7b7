pub mod application;
pub mod cli;
pub mod domain;
pub mod storage;

pub use application::{Bank, Hotel, Library};
pub use domain::*;
