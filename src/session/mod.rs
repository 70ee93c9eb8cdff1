//! Session token model and the store that owns both of its locations.

mod store;
pub mod token;

pub use store::{AUTH_COOKIE, SessionStore, TOKEN_STORAGE_KEY};
pub use token::{SessionToken, TokenError};
