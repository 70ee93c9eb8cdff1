//! Page shells. Tables, forms, and dashboards are rendered client-side from
//! these shells; the server only decides whether a shell may be served.

use crate::routes::{RouteClass, RouteTable};
use axum::{extract::State, http::Uri, response::Html};
use std::sync::Arc;

const TITLE: &str = "Operations Console";

/// Login shell for the public set, console shell for everything else.
pub async fn page(State(routes): State<Arc<RouteTable>>, uri: Uri) -> Html<String> {
    let view = match routes.classify(uri.path()) {
        RouteClass::Public => "login",
        RouteClass::Protected | RouteClass::Unmatched => "console",
    };
    Html(shell(view, uri.path()))
}

fn shell(view: &str, path: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{TITLE}</title></head>\n<body><div id=\"app\" data-view=\"{view}\" data-path=\"{}\"></div></body>\n</html>\n",
        escape(path)
    )
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
