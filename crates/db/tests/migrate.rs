use sqlx::SqlitePool;
use temp_dir::TempDir;

#[tokio::test]
async fn test_migrate_creates_catalog_tables() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let url = format!("sqlite:{}", path.to_str().unwrap());

    mixwise_db::migrate(&url).await?;
    // A second run has nothing left to apply.
    mixwise_db::migrate(&url).await?;

    let pool = SqlitePool::connect(&url).await?;
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;
    let tables: Vec<_> = tables.into_iter().map(|(name,)| name).collect();

    for expected in ["bar_ingredient", "cocktail", "cocktail_ingredient", "ingredient"] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}, got {tables:?}"
        );
    }

    Ok(())
}
