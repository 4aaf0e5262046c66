use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Info, Migrate, Migrator, Plan};
use std::str::FromStr;

mod m0_1;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0_1::Migration)])?;

    Ok(migrator)
}

/// Creates the database file when needed and applies every pending migration.
pub async fn migrate(url: &str) -> anyhow::Result<()> {
    let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;

    migrator()?.run(&mut *conn, &Plan::apply_all()).await?;

    drop(conn);
    pool.close().await;

    Ok(())
}
