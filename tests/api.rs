use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
};
use mixwise_catalog::CatalogImport;
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

fn confirmation(peer: &str, email: &str) -> Request<Body> {
    confirmation_via(peer, None, email)
}

fn confirmation_via(peer: &str, forwarded_for: Option<&str>, email: &str) -> Request<Body> {
    let peer: SocketAddr = format!("{peer}:40000").parse().unwrap();
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/email/confirmation")
        .header("content-type", "application/json")
        .extension(ConnectInfo(peer));

    if let Some(forwarded_for) = forwarded_for {
        builder = builder.header("x-forwarded-for", forwarded_for);
    }

    builder
        .body(Body::from(json!({ "email": email }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_and_ready() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3"), &CatalogImport::default()).await?;

    let response = app.send(helpers::get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(helpers::body_json(response).await, json!({"status": "ok"}));

    let response = app.send(helpers::get("/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(helpers::get("/nowhere")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-cache, must-revalidate"
    );

    Ok(())
}

#[tokio::test]
async fn confirmation_email_is_rate_limited_per_client() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3"), &CatalogImport::default()).await?;

    for _ in 0..2 {
        let response = app
            .send(confirmation("203.0.113.7", "ada@mixwise.localhost"))
            .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let response = app
        .send(confirmation("203.0.113.7", "ada@mixwise.localhost"))
        .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = response.headers()[header::RETRY_AFTER]
        .to_str()?
        .parse()?;
    assert!((1..=60).contains(&retry_after));

    let response = app
        .send(confirmation("198.51.100.2", "grace@mixwise.localhost"))
        .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    Ok(())
}

#[tokio::test]
async fn confirmation_email_rejects_invalid_address() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3"), &CatalogImport::default()).await?;

    let response = app.send(confirmation("203.0.113.9", "not-an-email")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn confirmation_email_accepts_padded_address() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3"), &CatalogImport::default()).await?;

    let response = app
        .send(confirmation("203.0.113.9", "  ada@mixwise.localhost "))
        .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    Ok(())
}

#[tokio::test]
async fn forwarded_header_is_ignored_without_trusted_proxy() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3"), &CatalogImport::default()).await?;

    let mut statuses = Vec::new();
    for i in 0..4 {
        let forwarded = format!("10.0.0.{i}");
        let response = app
            .send(confirmation_via(
                "192.0.2.10",
                Some(&forwarded),
                "ada@mixwise.localhost",
            ))
            .await;
        statuses.push(response.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::ACCEPTED,
            StatusCode::ACCEPTED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );
    assert_eq!(app.state.rate_limiter.tracked_keys(), 1);

    Ok(())
}

#[tokio::test]
async fn trusted_proxy_keys_on_the_last_forwarded_hop() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app_with(
        dir.child("db.sqlite3"),
        &CatalogImport::default(),
        |config| config.rate_limit.trust_proxy = true,
    )
    .await?;

    let mut statuses = Vec::new();
    for i in 0..3 {
        let forwarded = format!("10.0.0.{i}, 203.0.113.7");
        let response = app
            .send(confirmation_via(
                "192.0.2.1",
                Some(&forwarded),
                "ada@mixwise.localhost",
            ))
            .await;
        statuses.push(response.status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::ACCEPTED,
            StatusCode::ACCEPTED,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );

    let response = app
        .send(confirmation_via(
            "192.0.2.1",
            Some("203.0.113.7, 198.51.100.2"),
            "grace@mixwise.localhost",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    Ok(())
}
