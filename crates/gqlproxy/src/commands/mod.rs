mod check;
mod serve;

use crate::Cli;
use crate::CommandResult;
use check::CheckCmd;
use serve::ServeCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlproxy")]
pub(crate) enum CommandEnum {
    /// Parse a query document and report what the proxy would execute.
    Check(Box<CheckCmd>),

    /// Run the HTTP proxy.
    Serve(Box<ServeCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Check(cmd) => cmd.run(cli).await,
            Self::Serve(cmd) => cmd.run(cli).await,
        }
    }
}
