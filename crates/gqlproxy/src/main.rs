mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    if let Some(command) = cli.cmd.take() {
        let result = command.run(cli).await;
        if let Some(stdout) = result.stdout {
            println!("{stdout}");
        }
        if let Some(stderr) = result.stderr {
            eprintln!("{stderr}")
        }
        result.exit_code
    } else {
        cli.run_default().await
    }
}

/// Maps a `LOG_LEVEL` value onto a tracing level. `VERBOSE` is an alias
/// for `DEBUG`.
fn parse_log_level(value: &str) -> Option<tracing::Level> {
    match value.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" | "VERBOSE" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logger(cli: &Cli) {
    let mut invalid_log_level = None;
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        match std::env::var("LOG_LEVEL") {
            Ok(value) => parse_log_level(&value).unwrap_or_else(|| {
                invalid_log_level = Some(value);
                DEFAULT_LOG_LEVEL
            }),
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();
    log::trace!("Initial logging level set to `{log_level}`.");

    if let Some(value) = invalid_log_level {
        log::warn!("Invalid `LOG_LEVEL` environment variable value: `{value}`");
    }
}

#[cfg(test)]
mod tests {
    use super::parse_log_level;

    #[test]
    fn log_levels_are_case_insensitive() {
        assert_eq!(parse_log_level("debug"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_log_level(" Trace "), Some(tracing::Level::TRACE));
        assert_eq!(parse_log_level("VERBOSE"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_log_level("info"), Some(tracing::Level::INFO));
    }

    #[test]
    fn unknown_log_levels_are_rejected() {
        assert_eq!(parse_log_level("loud"), None);
        assert_eq!(parse_log_level(""), None);
    }
}
