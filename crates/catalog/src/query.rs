use std::collections::HashMap;

use mixwise_db::table::{BarIngredient, Cocktail, CocktailIngredient, Ingredient};
use mixwise_shared::{CanonicalId, Category, CocktailId, Requirement};
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{prelude::FromRow, types::Text};

#[derive(FromRow)]
struct IngredientRow {
    id: String,
    name: String,
    category: Text<Category>,
    legacy_id: Option<String>,
}

impl From<IngredientRow> for mixwise_shared::Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: CanonicalId::new(row.id),
            name: row.name,
            category: row.category.0,
            legacy_id: row.legacy_id,
        }
    }
}

#[derive(FromRow)]
struct CocktailRow {
    id: String,
    slug: String,
    name: String,
}

#[derive(FromRow)]
struct RequirementRow {
    cocktail_id: String,
    ingredient_id: String,
    is_optional: bool,
}

fn select_cocktails() -> SelectStatement {
    sea_query::Query::select()
        .columns([Cocktail::Id, Cocktail::Slug, Cocktail::Name])
        .from(Cocktail::Table)
        .order_by(Cocktail::Name, Order::Asc)
        .order_by(Cocktail::Id, Order::Asc)
        .to_owned()
}

fn select_requirements() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            CocktailIngredient::CocktailId,
            CocktailIngredient::IngredientId,
            CocktailIngredient::IsOptional,
        ])
        .from(CocktailIngredient::Table)
        .order_by(CocktailIngredient::CocktailId, Order::Asc)
        .order_by(CocktailIngredient::Position, Order::Asc)
        .to_owned()
}

impl crate::Query {
    pub async fn ingredients(&self) -> anyhow::Result<Vec<mixwise_shared::Ingredient>> {
        let statement = sea_query::Query::select()
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::Category,
                Ingredient::LegacyId,
            ])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, Order::Asc)
            .order_by(Ingredient::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every cocktail ordered by name then id, requirements in recipe order.
    ///
    /// This order is what the daily selection indexes into.
    pub async fn cocktails(&self) -> anyhow::Result<Vec<mixwise_shared::Cocktail>> {
        let (sql, values) = select_requirements().build_sqlx(SqliteQueryBuilder);
        let requirement_rows = sqlx::query_as_with::<_, RequirementRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let mut requirements: HashMap<String, Vec<Requirement>> = HashMap::new();
        for row in requirement_rows {
            requirements
                .entry(row.cocktail_id)
                .or_default()
                .push(Requirement {
                    ingredient_id: CanonicalId::new(row.ingredient_id),
                    is_optional: row.is_optional,
                });
        }

        let (sql, values) = select_cocktails().build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, CocktailRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| mixwise_shared::Cocktail {
                requirements: requirements.remove(&row.id).unwrap_or_default(),
                id: CocktailId::new(row.id),
                slug: row.slug,
                name: row.name,
            })
            .collect())
    }

    pub async fn find_cocktail_by_slug(
        &self,
        slug: impl Into<String>,
    ) -> anyhow::Result<Option<mixwise_shared::Cocktail>> {
        let slug = slug.into();
        let statement = select_cocktails()
            .and_where(Expr::col(Cocktail::Slug).eq(&slug))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, CocktailRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
        else {
            return Ok(None);
        };

        let statement = select_requirements()
            .and_where(Expr::col(CocktailIngredient::CocktailId).eq(&row.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let requirements = sqlx::query_as_with::<_, RequirementRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(|r| Requirement {
                ingredient_id: CanonicalId::new(r.ingredient_id),
                is_optional: r.is_optional,
            })
            .collect();

        Ok(Some(mixwise_shared::Cocktail {
            id: CocktailId::new(row.id),
            slug: row.slug,
            name: row.name,
            requirements,
        }))
    }

    /// Raw identifiers the user saved, oldest first. They are normalized
    /// against the current catalog by the caller.
    pub async fn bar_ingredients(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<String>> {
        let user_id = user_id.into();
        let statement = sea_query::Query::select()
            .column(BarIngredient::IngredientId)
            .from(BarIngredient::Table)
            .and_where(Expr::col(BarIngredient::UserId).eq(&user_id))
            .order_by(BarIngredient::CreatedAt, Order::Asc)
            .order_by(BarIngredient::IngredientId, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
