mod confirmation;
mod service;

pub use confirmation::*;
pub use service::*;
