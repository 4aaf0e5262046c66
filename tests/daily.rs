use axum::http::{StatusCode, header};
use mixwise_catalog::CatalogImport;
use mixwise_mix::{daily_cocktail, date_key, local_date};
use temp_dir::TempDir;
use time::OffsetDateTime;

mod helpers;

#[tokio::test]
async fn daily_redirect_points_at_the_cocktail_page() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app =
        helpers::setup_test_app(dir.child("db.sqlite3"), &helpers::single_cocktail_catalog())
            .await?;

    let response = app.send(helpers::get("/cocktail-of-the-day")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/cocktails/negroni?daily=true"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    Ok(())
}

#[tokio::test]
async fn daily_redirect_without_cocktails_goes_to_listing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3"), &CatalogImport::default()).await?;

    let response = app.send(helpers::get("/cocktail-of-the-day?tz=Asia/Tokyo")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/cocktails");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    Ok(())
}

#[tokio::test]
async fn daily_banner_matches_selection() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app =
        helpers::setup_test_app(dir.child("db.sqlite3"), &helpers::bar_catalog()).await?;

    let before = local_date(OffsetDateTime::now_utc(), Some("Asia/Tokyo"));
    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/api/daily")
                .header(header::COOKIE, "tz=Asia/Tokyo")
                .body(axum::body::Body::empty())?,
        )
        .await;
    let after = local_date(OffsetDateTime::now_utc(), Some("Asia/Tokyo"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let body = helpers::body_json(response).await;
    let cocktails = app.state.catalog_query.cocktails().await?;
    // The request may straddle midnight in Tokyo.
    let served = [before, after]
        .into_iter()
        .find(|day| body["date"] == date_key(*day))
        .unwrap();
    let expected = daily_cocktail(&cocktails, served).unwrap();

    assert_eq!(body["timezone"], "Asia/Tokyo");
    assert_eq!(body["cocktail"]["slug"], expected.slug.as_str());

    Ok(())
}
