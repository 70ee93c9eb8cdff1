mod common;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use console_gate::{console, routes::RouteTable};
use tower::ServiceExt;

async fn get(app: Router, path: &str, cookie: Option<&str>) -> Result<(StatusCode, Option<String>)> {
    let mut request = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    let response = app.oneshot(request.body(Body::empty())?).await?;
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().map(ToString::to_string))
        .transpose()
        .context("non-ascii location")?;
    Ok((response.status(), location))
}

#[tokio::test]
async fn protected_paths_without_cookie_redirect_to_login() -> Result<()> {
    for (path, location) in [
        ("/", "/login?redirect=%2F"),
        ("/dashboard", "/login?redirect=%2Fdashboard"),
        ("/orders/42", "/login?redirect=%2Forders%2F42"),
        ("/products", "/login?redirect=%2Fproducts"),
    ] {
        let (status, got) = get(console::router(RouteTable::default()), path, None).await?;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(got.as_deref(), Some(location), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn protected_path_with_cookie_is_served() -> Result<()> {
    let cookie = format!("theme=dark; auth_token={}", common::token_expiring_in(3600));
    let (status, location) = get(
        console::router(RouteTable::default()),
        "/orders",
        Some(&cookie),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    Ok(())
}

#[tokio::test]
async fn login_with_expired_cookie_still_redirects_to_landing() -> Result<()> {
    // Presence only: the render guard is the one that notices expiry.
    let cookie = format!("auth_token={}", common::token_expiring_in(-60));
    let (status, location) =
        get(console::router(RouteTable::default()), "/login", Some(&cookie)).await?;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/"));
    Ok(())
}

#[tokio::test]
async fn login_without_cookie_is_served() -> Result<()> {
    let (status, _) = get(console::router(RouteTable::default()), "/login", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn excluded_paths_pass_through() -> Result<()> {
    for path in ["/static/logo.svg", "/health", "/favicon.ico"] {
        let (status, location) = get(console::router(RouteTable::default()), path, None).await?;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(location, None, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn menu_pages_outside_the_named_prefixes_are_protected() -> Result<()> {
    for (path, location) in [
        ("/catalog", "/login?redirect=%2Fcatalog"),
        ("/stores/3", "/login?redirect=%2Fstores%2F3"),
        ("/pricing", "/login?redirect=%2Fpricing"),
        ("/delivery", "/login?redirect=%2Fdelivery"),
    ] {
        let (status, got) = get(console::router(RouteTable::default()), path, None).await?;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(got.as_deref(), Some(location), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn configured_table_follows_the_menu() -> Result<()> {
    let routes = RouteTable {
        protected: vec!["/".to_string(), "/catalog".to_string()],
        ..RouteTable::default()
    };
    let (status, location) = get(console::router(routes), "/catalog/7", None).await?;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/login?redirect=%2Fcatalog%2F7"));
    Ok(())
}

#[tokio::test]
async fn health_reports_build() -> Result<()> {
    let response = console::router(RouteTable::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let app = response
        .headers()
        .get("x-app")
        .context("missing X-App header")?
        .to_str()?;
    assert!(app.starts_with(concat!(env!("CARGO_PKG_NAME"), ":", env!("CARGO_PKG_VERSION"))));
    Ok(())
}
