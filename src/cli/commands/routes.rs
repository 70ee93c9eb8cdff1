//! Route table options. Global so `status` and `login` see the same table the
//! server enforces.

use crate::routes::{DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH};
use clap::{builder::ValueParser, Arg, Command};

pub const ARG_PROTECTED: &str = "protected-routes";
pub const ARG_PUBLIC: &str = "public-routes";
pub const ARG_EXCLUDED: &str = "excluded-prefixes";
pub const ARG_LOGIN_PATH: &str = "login-path";
pub const ARG_LANDING_PATH: &str = "landing-path";

#[must_use]
pub fn validator_path() -> ValueParser {
    ValueParser::from(move |path: &str| -> std::result::Result<String, String> {
        let path = path.trim();
        if path.starts_with('/') && !path.starts_with("//") {
            Ok(path.to_string())
        } else {
            Err("path must start with a single '/'".to_string())
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PROTECTED)
                .long(ARG_PROTECTED)
                .help("Comma separated path prefixes that require a session")
                .env("CONSOLE_PROTECTED_ROUTES")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PUBLIC)
                .long(ARG_PUBLIC)
                .help("Comma separated path prefixes only reachable without a session")
                .env("CONSOLE_PUBLIC_ROUTES")
                .global(true),
        )
        .arg(
            Arg::new(ARG_EXCLUDED)
                .long(ARG_EXCLUDED)
                .help("Comma separated path prefixes the filter never inspects")
                .env("CONSOLE_EXCLUDED_PREFIXES")
                .global(true),
        )
        .arg(
            Arg::new(ARG_LOGIN_PATH)
                .long(ARG_LOGIN_PATH)
                .help("Login page path")
                .default_value(DEFAULT_LOGIN_PATH)
                .env("CONSOLE_LOGIN_PATH")
                .global(true)
                .value_parser(validator_path()),
        )
        .arg(
            Arg::new(ARG_LANDING_PATH)
                .long(ARG_LANDING_PATH)
                .help("Where a signed-in user lands")
                .default_value(DEFAULT_LANDING_PATH)
                .env("CONSOLE_LANDING_PATH")
                .global(true)
                .value_parser(validator_path()),
        )
}
