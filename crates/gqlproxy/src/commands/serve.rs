use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use gqlproxy::ProxyConfig;
use gqlproxy::config;

#[derive(Debug, clap::Args)]
pub(crate) struct ServeCmd {
    #[arg(
        default_value=config::DEFAULT_HOST,
        env="HOST",
        help="Interface to bind the HTTP server to.",
        long,
    )]
    host: String,

    #[arg(
        default_value_t=config::DEFAULT_PORT,
        env="PORT",
        help="Port to bind the HTTP server to.",
        long,
    )]
    port: u16,

    #[arg(
        default_value=config::DEFAULT_UPSTREAM_BASE_URL,
        env="UPSTREAM_BASE_URL",
        help="Base URL of the OpenAI-compatible upstream API.",
        long,
    )]
    upstream_base_url: String,

    #[arg(
        env="DEEPSEEK_API_KEY",
        help="API key sent upstream as a bearer token.",
        hide_env_values=true,
        long,
    )]
    api_key: Option<String>,

    #[arg(
        default_value_t=config::DEFAULT_REQUEST_TIMEOUT_SECS,
        env="REQUEST_TIMEOUT_SECS",
        help="Timeout, in seconds, for each upstream request.",
        long,
    )]
    request_timeout_secs: u64,
}

impl ServeCmd {
    fn into_config(self) -> ProxyConfig {
        ProxyConfig {
            host: self.host,
            port: self.port,
            upstream_base_url: self.upstream_base_url,
            api_key: self.api_key,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

#[inherent::inherent]
impl RunnableCommand for ServeCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let config = self.into_config();
        log::debug!(
            "Starting proxy on {} (upstream: {}).",
            config.bind_addr(),
            config.upstream_base_url_trimmed(),
        );

        match gqlproxy::serve(config).await {
            Ok(()) => CommandResult::success(),
            Err(e) => CommandResult::stderr(format_args!(
                "{} Proxy server stopped: {e:#}",
                output_utils::RED_X,
            )),
        }
    }
}
