mod bar;
mod check;
mod import;
mod query;
mod slug;

pub use check::*;
pub use import::*;
pub use slug::*;

use sqlx::SqlitePool;

/// Writes to the catalog and bar tables. Expects the single-connection write pool.
#[derive(Clone)]
pub struct Command(pub SqlitePool);

/// Reads from the catalog and bar tables.
#[derive(Clone)]
pub struct Query(pub SqlitePool);
