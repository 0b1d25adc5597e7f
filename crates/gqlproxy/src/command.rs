use crate::Cli;
use crate::CommandResult;

/// A subcommand of the `gqlproxy` binary. Failures are reported through the
/// returned [`CommandResult`] rather than by panicking.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
