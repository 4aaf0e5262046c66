use std::collections::HashSet;
use std::path::Path;

use mixwise_db::table::{Cocktail, CocktailIngredient, Ingredient};
use mixwise_shared::{Cocktail as CocktailDoc, Ingredient as IngredientDoc};
use sea_query::{Expr, ExprTrait, OnConflict, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};

use crate::{CatalogReport, check_catalog, create_slug};

/// A catalog document as exported by the content pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogImport {
    #[serde(default)]
    pub ingredients: Vec<IngredientDoc>,
    #[serde(default)]
    pub cocktails: Vec<CocktailDoc>,
}

impl CatalogImport {
    /// Parses a document and fills in its slugs, see [`assign_slugs`](Self::assign_slugs).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog.assign_slugs();

        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Derives missing slugs from cocktail names and renames later duplicates
    /// to `{slug}-{id}`. Returns how many slugs were changed.
    pub fn assign_slugs(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut changed = 0;

        for cocktail in &mut self.cocktails {
            let mut slug = cocktail.slug.trim().to_owned();
            if slug.is_empty() {
                slug = create_slug(&cocktail.name);
            }

            if !slug.is_empty() && seen.contains(&slug) {
                let renamed = format!("{slug}-{}", create_slug(cocktail.id.as_str()));
                tracing::info!(
                    cocktail.id = %cocktail.id,
                    from = %slug,
                    to = %renamed,
                    "Duplicate cocktail slug renamed"
                );
                slug = renamed;
            }

            seen.insert(slug.to_owned());

            if slug != cocktail.slug {
                cocktail.slug = slug;
                changed += 1;
            }
        }

        changed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has {} error(s)", .0.errors().count())]
    Invalid(CatalogReport),

    #[error("catalog document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub ingredients: usize,
    pub cocktails: usize,
    pub warnings: usize,
}

impl crate::Command {
    /// Upserts every ingredient and cocktail of the document in one transaction.
    ///
    /// A cocktail's requirement list is replaced as a whole. Documents with
    /// error findings are refused before anything is written.
    pub async fn import(&self, catalog: &CatalogImport) -> Result<ImportSummary, CatalogError> {
        let report = check_catalog(catalog);
        if report.has_errors() {
            return Err(CatalogError::Invalid(report));
        }

        let mut tx = self.0.begin().await?;

        for ingredient in &catalog.ingredients {
            let statement = sea_query::Query::insert()
                .into_table(Ingredient::Table)
                .columns([
                    Ingredient::Id,
                    Ingredient::Name,
                    Ingredient::Category,
                    Ingredient::LegacyId,
                ])
                .values_panic([
                    ingredient.id.as_str().into(),
                    ingredient.name.to_owned().into(),
                    ingredient.category.to_string().into(),
                    ingredient.legacy_id.to_owned().into(),
                ])
                .on_conflict(
                    OnConflict::column(Ingredient::Id)
                        .update_columns([
                            Ingredient::Name,
                            Ingredient::Category,
                            Ingredient::LegacyId,
                        ])
                        .to_owned(),
                )
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        for cocktail in &catalog.cocktails {
            let statement = sea_query::Query::insert()
                .into_table(Cocktail::Table)
                .columns([Cocktail::Id, Cocktail::Slug, Cocktail::Name])
                .values_panic([
                    cocktail.id.as_str().into(),
                    cocktail.slug.to_owned().into(),
                    cocktail.name.to_owned().into(),
                ])
                .on_conflict(
                    OnConflict::column(Cocktail::Id)
                        .update_columns([Cocktail::Slug, Cocktail::Name])
                        .to_owned(),
                )
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;

            let statement = sea_query::Query::delete()
                .from_table(CocktailIngredient::Table)
                .and_where(Expr::col(CocktailIngredient::CocktailId).eq(cocktail.id.as_str()))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;

            if cocktail.requirements.is_empty() {
                continue;
            }

            let mut statement = sea_query::Query::insert()
                .into_table(CocktailIngredient::Table)
                .columns([
                    CocktailIngredient::CocktailId,
                    CocktailIngredient::IngredientId,
                    CocktailIngredient::Position,
                    CocktailIngredient::IsOptional,
                ])
                .to_owned();

            for (position, requirement) in cocktail.requirements.iter().enumerate() {
                statement.values_panic([
                    cocktail.id.as_str().into(),
                    requirement.ingredient_id.as_str().into(),
                    (position as i64).into(),
                    requirement.is_optional.into(),
                ]);
            }

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        let summary = ImportSummary {
            ingredients: catalog.ingredients.len(),
            cocktails: catalog.cocktails.len(),
            warnings: report.warnings().count(),
        };

        tracing::info!(
            ingredients = summary.ingredients,
            cocktails = summary.cocktails,
            warnings = summary.warnings,
            "Catalog imported"
        );

        Ok(summary)
    }
}
