use clap::CommandFactory;
use crate::commands;
use std::process::ExitCode;

#[derive(clap::Parser, Debug)]
#[command(
    name = "gqlproxy",
    version,
    about = "A GraphQL-style front end for DeepSeek-compatible LLM APIs.",
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> ExitCode {
        match Self::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("Failed to print help: {e}");
                ExitCode::FAILURE
            },
        }
    }
}
