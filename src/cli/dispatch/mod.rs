use crate::{
    cli::{
        actions::{login, server, status, Action},
        commands::{self, routes as route_args},
        globals::GlobalArgs,
    },
    routes::{parse_list, RouteTable},
};
use anyhow::{bail, Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some(("server", sub_m)) => Ok(Action::Server(server::Args {
            port: sub_m.get_one::<u16>("port").copied().unwrap_or(8080),
            routes: globals.routes,
        })),
        Some(("login", sub_m)) => Ok(Action::Login(login::Args {
            globals,
            email: sub_m.get_one::<String>("email").cloned(),
            password: sub_m
                .get_one::<String>("password")
                .map(|password| SecretString::from(password.clone())),
            remember: sub_m.get_flag("remember"),
            redirect: sub_m.get_one::<String>("redirect").cloned(),
        })),
        Some(("logout", _)) => Ok(Action::Logout(globals)),
        Some(("status", sub_m)) => Ok(Action::Status(status::Args {
            path: sub_m
                .get_one::<String>("path")
                .cloned()
                .unwrap_or_else(|| "/".to_string()),
            globals,
        })),
        _ => bail!("missing subcommand"),
    }
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let profile_dir = matches
        .get_one::<String>(commands::ARG_PROFILE_DIR)
        .cloned()
        .context("missing required argument: --profile-dir")?;

    let mut globals = GlobalArgs::new(profile_dir);
    globals.auth_url = matches.get_one::<String>(commands::ARG_AUTH_URL).cloned();
    globals.routes = route_table(matches);

    Ok(globals)
}

/// Route table from the defaults, with any configured list replacing its default.
fn route_table(matches: &clap::ArgMatches) -> RouteTable {
    let list = |id: &str| matches.get_one::<String>(id).map(|value| parse_list(value));
    let mut routes = RouteTable::default();

    if let Some(protected) = list(route_args::ARG_PROTECTED) {
        routes.protected = protected;
    }
    if let Some(public) = list(route_args::ARG_PUBLIC) {
        routes.public = public;
    }
    if let Some(excluded) = list(route_args::ARG_EXCLUDED) {
        routes.excluded = excluded;
    }
    if let Some(login_path) = matches.get_one::<String>(route_args::ARG_LOGIN_PATH) {
        routes.login_path.clone_from(login_path);
    }
    if let Some(landing_path) = matches.get_one::<String>(route_args::ARG_LANDING_PATH) {
        routes.landing_path.clone_from(landing_path);
    }

    routes
}
