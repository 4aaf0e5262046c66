use std::{convert::Infallible, net::SocketAddr};

use axum::{
    Router,
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, StatusCode, request::Parts},
    response::IntoResponse,
    routing::{delete, get, post},
};
use mixwise_notification::EmailService;
use serde_json::json;
use sqlx::SqlitePool;

use crate::rate_limit::FixedWindowRateLimiter;

mod bar;
mod daily;
mod email;
mod health;
mod ingredients;
mod mix;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub catalog_command: mixwise_catalog::Command,
    pub catalog_query: mixwise_catalog::Query,
    pub pool: SqlitePool,
    pub rate_limiter: FixedWindowRateLimiter,
    pub email: EmailService,
}

/// Rate-limit key of the caller: the peer address of the connection, or the
/// last `X-Forwarded-For` hop when `rate_limit.trust_proxy` is set.
pub struct ClientAddr(pub String);

impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let forwarded = state
            .config
            .rate_limit
            .trust_proxy
            .then(|| last_forwarded_hop(&parts.headers))
            .flatten();

        let addr = match forwarded {
            Some(addr) => addr.to_owned(),
            None => parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_owned()),
        };

        Ok(ClientAddr(addr))
    }
}

/// The hop appended by the nearest proxy. Earlier hops come from the client.
fn last_forwarded_hop(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all("x-forwarded-for")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .last()
        .and_then(|v| v.rsplit(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, axum::Json(json!({"error": "Not found"})))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/cocktail-of-the-day", get(daily::redirect))
        .route("/api/daily", get(daily::banner))
        .route("/api/ingredients/resolve/{raw}", get(ingredients::resolve))
        .route("/api/mix", post(mix::action))
        .route("/api/bar/{user_id}", get(bar::page).put(bar::replace))
        .route("/api/bar/{user_id}/ingredients", post(bar::add))
        .route(
            "/api/bar/{user_id}/ingredients/{raw}",
            delete(bar::remove),
        )
        .route("/api/bar/{user_id}/mix", get(bar::mix))
        .route("/api/email/confirmation", post(email::confirmation))
        .fallback(fallback)
        .with_state(app_state)
}
