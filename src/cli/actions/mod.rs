pub mod login;
pub mod logout;
pub mod server;
pub mod status;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Login(login::Args),
    Logout(GlobalArgs),
    Status(status::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
