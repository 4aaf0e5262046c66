mod catalog;
mod id;

pub use catalog::*;
pub use id::*;
