//! Client-side view of the signed session token.
//!
//! The token is a compact JWS issued by the auth service. The client has no key
//! material, so it only decodes the payload to read the expiry; the signature
//! is the server's business.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    Format,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    exp: f64,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    iat: Option<f64>,
}

/// A decoded session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    raw: String,
    claims: Claims,
}

impl SessionToken {
    /// Decode a compact token without verifying its signature.
    ///
    /// # Errors
    /// Returns an error if the token is not three dot-separated segments, the
    /// payload is not base64url, or the payload has no numeric `exp`.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let raw = raw.trim();
        let mut segments = raw.split('.');
        let (Some(header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Format);
        };
        if header.is_empty() || payload.is_empty() {
            return Err(TokenError::Format);
        }

        let bytes = Base64UrlUnpadded::decode_vec(payload.trim_end_matches('='))
            .map_err(|_| TokenError::Base64)?;
        let claims: Claims = serde_json::from_slice(&bytes)?;
        if !claims.exp.is_finite() {
            return Err(TokenError::Format);
        }

        Ok(Self {
            raw: raw.to_string(),
            claims,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Expiry instant in whole seconds since the Unix epoch.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.claims.exp.floor() as i64
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn issued_at(&self) -> Option<i64> {
        self.claims.iat.map(|iat| iat.floor() as i64)
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.claims
            .sub
            .as_deref()
            .or(self.claims.email.as_deref())
    }

    /// True while the expiry instant is strictly after `now` (Unix seconds).
    #[must_use]
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.expires_at() > now
    }
}

/// Decode-and-check in one step; any decode failure counts as invalid.
#[must_use]
pub fn is_valid_at(raw: &str, now: i64) -> bool {
    SessionToken::parse(raw).is_ok_and(|token| token.is_valid_at(now))
}

#[cfg(test)]
pub(crate) fn unsigned(payload: &serde_json::Value) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = Base64UrlUnpadded::encode_string(payload.to_string().as_bytes());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}
