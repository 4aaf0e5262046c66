use std::path::Path;

use anyhow::Result;
use mixwise_catalog::{CatalogError, CatalogImport, check_catalog};

use crate::config::Config;

pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!(url = %config.database.url, "Migrating database");
    mixwise_db::migrate(&config.database.url).await?;
    tracing::info!("Database migrated");

    Ok(())
}

/// Loads a catalog document into the database, refusing it when the
/// data-quality check reports errors.
pub async fn import(config: &Config, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let catalog = CatalogImport::from_path(path)?;

    mixwise_db::migrate(&config.database.url).await?;
    let pool = crate::db::create_write_pool(&config.database.url).await?;
    let command = mixwise_catalog::Command(pool.clone());

    let result = command.import(&catalog).await;
    pool.close().await;

    match result {
        Ok(summary) => {
            tracing::info!(
                path = %path.display(),
                ingredients = summary.ingredients,
                cocktails = summary.cocktails,
                warnings = summary.warnings,
                "Import finished"
            );
            Ok(())
        }
        Err(CatalogError::Invalid(report)) => {
            for finding in report.findings.iter() {
                eprintln!("{finding}");
            }
            anyhow::bail!(
                "{} rejected with {} error(s)",
                path.display(),
                report.errors().count()
            )
        }
        Err(err) => Err(err.into()),
    }
}

/// Prints every finding for a catalog document. Fails when any is an error.
pub fn check(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let catalog = CatalogImport::from_path(path)?;
    let report = check_catalog(&catalog);

    for finding in report.findings.iter() {
        println!("{finding}");
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    println!(
        "{}: {} ingredient(s), {} cocktail(s), {errors} error(s), {warnings} warning(s)",
        path.display(),
        catalog.ingredients.len(),
        catalog.cocktails.len(),
    );

    if errors > 0 {
        anyhow::bail!("{} has {errors} error(s)", path.display());
    }

    Ok(())
}
