#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use mixwise_catalog::CatalogImport;
use mixwise_shared::{CanonicalId, Category, Cocktail, Ingredient, Requirement};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub const GIN: &str = "0b9f2c4e-1d3a-4e5f-8a6b-7c8d9e0f1a2b";
pub const TONIC: &str = "1c0a3d5f-2e4b-4f6a-9b7c-8d9e0f1a2b3c";
pub const CAMPARI: &str = "2d1b4e6a-3f5c-4a7b-8c8d-9e0f1a2b3c4d";
pub const VERMOUTH: &str = "3e2c5f7b-4a6d-4b8c-9d9e-0f1a2b3c4d5e";
pub const LIME: &str = "4f3d6a8c-5b7e-4c9d-8e0f-1a2b3c4d5e6f";

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mixwise_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

fn ingredient(id: &str, name: &str, category: Category, legacy_id: Option<&str>) -> Ingredient {
    Ingredient {
        id: CanonicalId::new(id),
        name: name.to_owned(),
        category,
        legacy_id: legacy_id.map(str::to_owned),
    }
}

fn cocktail(id: &str, name: &str, requirements: Vec<Requirement>) -> Cocktail {
    Cocktail {
        id: id.into(),
        slug: id.to_owned(),
        name: name.to_owned(),
        requirements,
    }
}

pub fn sample_catalog() -> CatalogImport {
    CatalogImport {
        ingredients: vec![
            ingredient(GIN, "Gin", Category::Spirit, Some("12")),
            ingredient(TONIC, "Tonic Water", Category::Mixer, None),
            ingredient(CAMPARI, "Campari", Category::Amaro, Some("campari")),
            ingredient(VERMOUTH, "Sweet Vermouth", Category::WineAndBeer, None),
            ingredient(LIME, "Lime", Category::Citrus, None),
        ],
        cocktails: vec![
            cocktail(
                "negroni",
                "Negroni",
                vec![
                    Requirement::required(GIN),
                    Requirement::required(CAMPARI),
                    Requirement::required(VERMOUTH),
                ],
            ),
            cocktail(
                "gin-tonic",
                "Gin & Tonic",
                vec![
                    Requirement::required(GIN),
                    Requirement::required(TONIC),
                    Requirement::optional(LIME),
                ],
            ),
            cocktail(
                "americano",
                "Americano",
                vec![Requirement::required(CAMPARI), Requirement::required(VERMOUTH)],
            ),
        ],
    }
}
