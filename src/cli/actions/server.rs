use crate::{console, routes::RouteTable};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub routes: RouteTable,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        "Startup args: port={}, login={}, landing={}, protected=[{}], public=[{}], excluded=[{}]",
        args.port,
        args.routes.login_path,
        args.routes.landing_path,
        args.routes.protected.join(","),
        args.routes.public.join(","),
        args.routes.excluded.join(","),
    );

    console::new(args.port, args.routes).await
}
