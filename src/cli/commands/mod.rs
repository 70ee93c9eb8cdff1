pub mod logging;
pub mod routes;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_PROFILE_DIR: &str = "profile-dir";
pub const DEFAULT_PROFILE_DIR: &str = ".console-gate";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("console-gate")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Base URL of the auth service, example: https://api.console.dev")
                .env("CONSOLE_AUTH_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PROFILE_DIR)
                .long(ARG_PROFILE_DIR)
                .help("Directory holding the client cookie jar and persistent store")
                .default_value(DEFAULT_PROFILE_DIR)
                .env("CONSOLE_PROFILE_DIR")
                .global(true),
        )
        .subcommand(server())
        .subcommand(login())
        .subcommand(Command::new("logout").about("End the session and clear it locally"))
        .subcommand(status());

    let command = routes::with_args(command);
    logging::with_args(command)
}

fn server() -> Command {
    Command::new("server")
        .about("Serve the console behind the edge route filter")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("CONSOLE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
}

fn login() -> Command {
    Command::new("login")
        .about("Sign in and store the session in the profile")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email, defaults to the remembered one")
                .env("CONSOLE_EMAIL"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Account password, defaults to the remembered one")
                .env("CONSOLE_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("remember")
                .short('r')
                .long("remember")
                .help("Remember the credentials for the next sign in")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("redirect")
                .long("redirect")
                .help("Path to return to after signing in"),
        )
}

fn status() -> Command {
    Command::new("status")
        .about("Show the session and what each gate would do for a path")
        .arg(
            Arg::new("path")
                .long("path")
                .help("Path to evaluate")
                .default_value("/"),
        )
}
