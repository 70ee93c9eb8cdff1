use crate::{
    routes::{FilterDecision, RouteTable},
    session::AUTH_COOKIE,
};
use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Edge route filter: redirects before any page is rendered.
///
/// Only the presence of the session cookie counts here. Validity and expiry
/// are checked again on the client by the render guard.
pub async fn edge_filter(
    State(routes): State<Arc<RouteTable>>,
    request: Request,
    next: Next,
) -> Response {
    let present = session_cookie(request.headers()).is_some();
    let path = request.uri().path().to_string();

    match routes.decide(&path, present) {
        FilterDecision::PassThrough => next.run(request).await,
        FilterDecision::Redirect(location) => {
            debug!(%path, %location, "Edge filter redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Non-empty `auth_token` value from any `Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == AUTH_COOKIE && !val.is_empty()).then(|| val.to_string())
        })
}
