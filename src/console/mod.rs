use crate::routes::{RouteTable, CONSOLE_MENU};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{debug_span, info, warn, Span};
use ulid::Ulid;

pub mod filter;
pub mod handlers;

/// Console routes guarded by the edge filter.
///
/// The filter wraps the fallback too, so every page path passes through it.
#[must_use]
pub fn router(routes: RouteTable) -> Router {
    let routes = Arc::new(routes);

    Router::new()
        .route("/health", get(handlers::health).options(handlers::health))
        .fallback(handlers::pages::page)
        .with_state(routes.clone())
        .layer(middleware::from_fn_with_state(routes, filter::edge_filter))
}

/// Serve the console until ctrl-c.
/// # Errors
/// Returns an error if the server fails to start
pub async fn new(port: u16, routes: RouteTable) -> Result<()> {
    let drift = routes.unprotected(&CONSOLE_MENU);
    if !drift.is_empty() {
        warn!(
            "Menu entries not in the protected set, reachable without a session: {}",
            drift.join(", ")
        );
    }

    let app = router(routes).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span; headers carry the session cookie so they stay out of it
fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let method = request.method().as_str();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, method, request_id)
}
