#![allow(dead_code)]

use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::{json, Value};
use std::net::TcpListener;

/// Compact token with the given claims and a placeholder signature.
pub fn token_with(claims: &Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Token expiring `offset` seconds from now.
pub fn token_expiring_in(offset: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    token_with(&json!({ "sub": "42", "email": "a@b.com", "exp": now + offset }))
}

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}
