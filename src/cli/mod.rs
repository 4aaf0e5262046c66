mod catalog;
mod server;

pub use catalog::*;
pub use server::*;
