pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod rate_limit;
pub mod routes;

pub use routes::{AppState, router};
