use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use mixwise_mix::{daily_cocktail, date_key, local_date};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time_tz::timezones;

use crate::{config::Config, error::AppError, routes::AppState};

pub const TIMEZONE_COOKIE: &str = "tz";

#[derive(Deserialize, Default)]
pub struct DailyParams {
    pub tz: Option<String>,
}

/// First known zone among the query parameter, the cookie and the configured default.
fn resolve_timezone(params: &DailyParams, jar: &CookieJar, config: &Config) -> String {
    let from_cookie = jar.get(TIMEZONE_COOKIE).map(|c| c.value().to_owned());

    params
        .tz
        .iter()
        .cloned()
        .chain(from_cookie)
        .find(|name| {
            let known = timezones::get_by_name(name).is_some();
            if !known {
                tracing::debug!(timezone = %name, "Ignoring unknown visitor timezone");
            }
            known
        })
        .unwrap_or_else(|| config.daily.timezone.to_owned())
}

/// GET /cocktail-of-the-day
pub async fn redirect(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let timezone = resolve_timezone(&params, &jar, &state.config);
    let today = local_date(OffsetDateTime::now_utc(), Some(&timezone));
    let cocktails = state.catalog_query.cocktails().await?;

    let location = match daily_cocktail(&cocktails, today) {
        Some(cocktail) => format!("/cocktails/{}?daily=true", cocktail.slug),
        None => {
            tracing::warn!("No cocktails in the catalog, redirecting to the listing");
            "/cocktails".to_owned()
        }
    };

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Redirect::temporary(&location),
    ))
}

#[derive(Serialize)]
pub struct DailyCocktail {
    pub id: String,
    pub slug: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct DailyBanner {
    pub cocktail: Option<DailyCocktail>,
    pub date: String,
    pub timezone: String,
}

/// GET /api/daily
pub async fn banner(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let timezone = resolve_timezone(&params, &jar, &state.config);
    let today = local_date(OffsetDateTime::now_utc(), Some(&timezone));
    let cocktails = state.catalog_query.cocktails().await?;

    let cocktail = daily_cocktail(&cocktails, today).map(|c| DailyCocktail {
        id: c.id.to_string(),
        slug: c.slug.to_owned(),
        name: c.name.to_owned(),
    });

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(DailyBanner {
            cocktail,
            date: date_key(today),
            timezone,
        }),
    ))
}
