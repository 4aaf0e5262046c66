#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use mixwise::{
    AppState,
    config::{
        Config, DailyConfig, DatabaseConfig, MixConfig, ObservabilityConfig, RateLimitConfig,
        ServerConfig,
    },
    rate_limit::FixedWindowRateLimiter,
};
use mixwise_catalog::CatalogImport;
use mixwise_notification::{EmailConfig, EmailService};
use mixwise_shared::{CanonicalId, Category, Cocktail, Ingredient, Requirement};
use tower::ServiceExt;

pub const GIN: &str = "0b9f2c4e-1d3a-4e5f-8a6b-7c8d9e0f1a2b";
pub const TONIC: &str = "1c0a3d5f-2e4b-4f6a-9b7c-8d9e0f1a2b3c";
pub const CAMPARI: &str = "2d1b4e6a-3f5c-4a7b-8c8d-9e0f1a2b3c4d";
pub const VERMOUTH: &str = "3e2c5f7b-4a6d-4b8c-9d9e-0f1a2b3c4d5e";
pub const LIME: &str = "4f3d6a8c-5b7e-4c9d-8e0f-1a2b3c4d5e6f";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 5,
        },
        email: EmailConfig::default(),
        rate_limit: RateLimitConfig {
            max_requests: 2,
            window_secs: 60,
            trust_proxy: false,
        },
        daily: DailyConfig {
            timezone: "Europe/London".to_owned(),
        },
        mix: MixConfig { max_missing: 2 },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app(path: PathBuf, catalog: &CatalogImport) -> anyhow::Result<TestApp> {
    setup_test_app_with(path, catalog, |_| {}).await
}

pub async fn setup_test_app_with(
    path: PathBuf,
    catalog: &CatalogImport,
    configure: impl FnOnce(&mut Config),
) -> anyhow::Result<TestApp> {
    let url = format!("sqlite:{}", path.to_str().unwrap());
    let mut config = test_config(url.to_owned());
    configure(&mut config);

    mixwise_db::migrate(&url).await?;
    let pool = mixwise::db::create_pool(&url, 5).await?;

    let command = mixwise_catalog::Command(pool.clone());
    if !catalog.cocktails.is_empty() || !catalog.ingredients.is_empty() {
        command.import(catalog).await?;
    }

    let state = AppState {
        email: EmailService::new_mock(&config.email),
        rate_limiter: FixedWindowRateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_secs),
        ),
        catalog_command: command,
        catalog_query: mixwise_catalog::Query(pool.clone()),
        pool,
        config,
    };

    let router = mixwise::router(state.clone()).layer(axum::middleware::from_fn(
        mixwise::middleware::cache_control_middleware,
    ));

    Ok(TestApp { router, state })
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn ingredient(id: &str, name: &str, category: Category, legacy_id: Option<&str>) -> Ingredient {
    Ingredient {
        id: CanonicalId::new(id),
        name: name.to_owned(),
        category,
        legacy_id: legacy_id.map(str::to_owned),
    }
}

fn cocktail(slug: &str, name: &str, requirements: Vec<Requirement>) -> Cocktail {
    Cocktail {
        id: slug.into(),
        slug: slug.to_owned(),
        name: name.to_owned(),
        requirements,
    }
}

pub fn bar_catalog() -> CatalogImport {
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

pub fn single_cocktail_catalog() -> CatalogImport {
    let mut catalog = bar_catalog();
    catalog.cocktails.truncate(1);
    catalog
}
