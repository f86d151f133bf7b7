mod bank;
pub mod flatfile;
mod hotel;
mod library;

pub use bank::*;
pub use flatfile::{load_file, save_file};
pub use hotel::*;
pub use library::*;
