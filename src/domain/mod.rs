mod account;
mod book;
mod customer;
mod error;
mod money;
mod room;

pub use account::*;
pub use book::*;
pub use customer::*;
pub use error::*;
pub use money::*;
pub use room::*;
