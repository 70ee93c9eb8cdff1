//! Route classification for the edge filter.
//!
//! Classification is a pure function of the path: method and payload never
//! matter. The table is configuration, not code, so the protected set can
//! follow the navigation menu without a rebuild.

use url::form_urlencoded;

pub const DEFAULT_PROTECTED: [&str; 5] = ["/", "/dashboard", "/products", "/orders", "/categories"];
pub const DEFAULT_PUBLIC: [&str; 1] = ["/login"];
pub const DEFAULT_EXCLUDED: [&str; 5] = ["/api", "/_next", "/static", "/favicon.ico", "/health"];
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/";

/// Top-level entries of the console navigation menu.
///
/// Used only to report drift against the protected set at startup.
pub const CONSOLE_MENU: [&str; 6] = [
    "/dashboard",
    "/catalog",
    "/stores",
    "/orders",
    "/pricing",
    "/delivery",
];

/// Query parameter carrying the originally requested path to the login page.
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// The login page.
    Public,
    /// Requires a session cookie.
    Protected,
    /// Excluded assets and API surface, or a path outside every entry of a
    /// table that has no root catch-all.
    Unmatched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterDecision {
    PassThrough,
    /// Respond with a redirect to this location.
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    pub protected: Vec<String>,
    pub public: Vec<String>,
    pub excluded: Vec<String>,
    pub login_path: String,
    pub landing_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            protected: to_owned(&DEFAULT_PROTECTED),
            public: to_owned(&DEFAULT_PUBLIC),
            excluded: to_owned(&DEFAULT_EXCLUDED),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
        }
    }
}

impl RouteTable {
    /// Excluded prefixes win, then the public set, then the protected set.
    ///
    /// A `/` entry matches every path, so with the default table every
    /// filtered page outside the public set is protected.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = normalize(path);
        let path = path.as_str();
        if self.excluded.iter().any(|prefix| matches_prefix(prefix, path)) {
            RouteClass::Unmatched
        } else if self.public.iter().any(|prefix| matches_prefix(prefix, path)) {
            RouteClass::Public
        } else if self
            .protected
            .iter()
            .any(|prefix| matches_prefix(prefix, path))
        {
            RouteClass::Protected
        } else {
            RouteClass::Unmatched
        }
    }

    /// Decide what the edge filter does with a request.
    ///
    /// Only cookie presence is considered here; expiry is the render guard's job.
    #[must_use]
    pub fn decide(&self, path: &str, token_present: bool) -> FilterDecision {
        match (self.classify(path), token_present) {
            (RouteClass::Protected, false) => FilterDecision::Redirect(self.login_redirect(path)),
            (RouteClass::Public, true) => FilterDecision::Redirect(self.landing_path.clone()),
            _ => FilterDecision::PassThrough,
        }
    }

    /// `login_path?redirect=<path>`, encoded like `URLSearchParams`.
    #[must_use]
    pub fn login_redirect(&self, path: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(REDIRECT_PARAM, path)
            .finish();
        format!("{}?{query}", self.login_path)
    }

    /// Menu entries the filter would let through without a cookie.
    #[must_use]
    pub fn unprotected<'a>(&self, menu: &[&'a str]) -> Vec<&'a str> {
        menu.iter()
            .copied()
            .filter(|path| self.classify(path) != RouteClass::Protected)
            .collect()
    }

    /// A safe post-login destination from a `redirect` value.
    ///
    /// Only local absolute paths qualify; anything else, or the login page
    /// itself, falls back to the landing path.
    #[must_use]
    pub fn return_destination(&self, redirect: Option<&str>) -> String {
        redirect
            .map(str::trim)
            .filter(|target| is_local_path(target))
            .filter(|target| {
                let path = target.split(['?', '#']).next().unwrap_or_default();
                !self.public.iter().any(|prefix| matches_prefix(prefix, path))
            })
            .map_or_else(|| self.landing_path.clone(), str::to_string)
    }
}

/// Segment-aware prefix match; the root entry matches every path.
fn matches_prefix(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Percent-decoded path with repeated slashes collapsed, so `//orders` and
/// `/%6Frders` classify like `/orders`.
fn normalize(path: &str) -> String {
    // Keep the form decoder from treating these as separators or spaces.
    let escaped = path
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D");
    let decoded = form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map_or_else(String::new, |(key, _)| key.into_owned());

    let mut normalized = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.contains("://")
}

fn to_owned(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| (*path).to_string()).collect()
}

/// Parse a comma separated route list, dropping blanks.
#[must_use]
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_default_table() {
        let table = RouteTable::default();
        for path in [
            "/",
            "/dashboard",
            "/dashboard/today",
            "/products",
            "/products/17/edit",
            "/orders",
            "/orders/42",
            "/categories",
        ] {
            assert_eq!(table.classify(path), RouteClass::Protected, "{path}");
        }
        for path in ["/login", "/login/"] {
            assert_eq!(table.classify(path), RouteClass::Public, "{path}");
        }
        for path in [
            "/api/auth/login",
            "/_next/static/chunk.js",
            "/static/logo.svg",
            "/favicon.ico",
            "/health",
        ] {
            assert_eq!(table.classify(path), RouteClass::Unmatched, "{path}");
        }
    }

    #[test]
    fn protected_without_cookie_redirects_with_return_path() {
        let table = RouteTable::default();
        for path in ["/", "/dashboard", "/products", "/orders/42", "/categories"] {
            let FilterDecision::Redirect(location) = table.decide(path, false) else {
                panic!("expected redirect for {path}");
            };
            let url = url::Url::parse(&format!("http://console.local{location}")).unwrap();
            assert_eq!(url.path(), "/login");
            let redirect: Vec<_> = url
                .query_pairs()
                .filter(|(key, _)| key == REDIRECT_PARAM)
                .map(|(_, value)| value.into_owned())
                .collect();
            assert_eq!(redirect, vec![path.to_string()]);
        }
    }

    #[test]
    fn login_redirect_encodes_like_search_params() {
        let table = RouteTable::default();
        assert_eq!(table.login_redirect("/orders"), "/login?redirect=%2Forders");
    }

    #[test]
    fn login_with_cookie_redirects_to_landing() {
        let table = RouteTable::default();
        assert_eq!(
            table.decide("/login", true),
            FilterDecision::Redirect("/".to_string())
        );
        assert_eq!(table.decide("/login", false), FilterDecision::PassThrough);
    }

    #[test]
    fn protected_with_cookie_and_unmatched_pass_through() {
        let table = RouteTable::default();
        assert_eq!(table.decide("/orders", true), FilterDecision::PassThrough);
        assert_eq!(table.decide("/api/orders", false), FilterDecision::PassThrough);
        assert_eq!(table.decide("/static/app.css", false), FilterDecision::PassThrough);
    }

    #[test]
    fn excluded_prefix_beats_protected_entry() {
        let table = RouteTable {
            protected: vec!["/api".to_string()],
            ..RouteTable::default()
        };
        assert_eq!(table.classify("/api/orders"), RouteClass::Unmatched);
    }

    #[test]
    fn menu_drift_is_reported() {
        assert!(RouteTable::default().unprotected(&CONSOLE_MENU).is_empty());

        let table = RouteTable {
            protected: to_owned(&["/dashboard", "/products", "/orders", "/categories"]),
            ..RouteTable::default()
        };
        assert_eq!(
            table.unprotected(&CONSOLE_MENU),
            vec!["/catalog", "/stores", "/pricing", "/delivery"]
        );
    }

    #[test]
    fn root_entry_protects_every_console_page() {
        let table = RouteTable::default();
        for path in ["/catalog", "/stores/3", "/pricing", "/delivery", "/ordersx", "/loginx"] {
            assert_eq!(table.classify(path), RouteClass::Protected, "{path}");
            assert_eq!(
                table.decide(path, false),
                FilterDecision::Redirect(table.login_redirect(path)),
                "{path}"
            );
        }
        assert_eq!(
            table.decide("/catalog", false),
            FilterDecision::Redirect("/login?redirect=%2Fcatalog".to_string())
        );
    }

    #[test]
    fn path_variants_classify_like_their_canonical_form() {
        let table = RouteTable {
            protected: to_owned(&["/orders"]),
            ..RouteTable::default()
        };
        for path in ["/orders", "//orders", "/%6Frders/42", "/orders//42"] {
            assert_eq!(table.classify(path), RouteClass::Protected, "{path}");
        }
        assert_eq!(table.classify("/%6Cogin"), RouteClass::Public);
        assert_eq!(table.classify("//api/orders"), RouteClass::Unmatched);
        assert_eq!(table.classify("/catalog"), RouteClass::Unmatched);
    }

    #[test]
    fn return_destination_only_accepts_local_paths() {
        let table = RouteTable::default();
        assert_eq!(table.return_destination(Some("/orders/42")), "/orders/42");
        assert_eq!(table.return_destination(Some("/orders?page=2")), "/orders?page=2");
        for target in [
            None,
            Some(""),
            Some("orders"),
            Some("//evil.example"),
            Some("/\\evil.example"),
            Some("https://evil.example/"),
            Some("/login"),
            Some("/login?redirect=%2F"),
        ] {
            assert_eq!(table.return_destination(target), "/", "{target:?}");
        }
    }

    #[test]
    fn parse_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_list(" /a, ,/b ,"),
            vec!["/a".to_string(), "/b".to_string()]
        );
    }
}
