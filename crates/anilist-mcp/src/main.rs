//! AniList MCP Server - Entry Point
//!
//! Provides both stdio (for desktop MCP clients) and stateless HTTP transports.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use anilist_mcp::{config::Config, server::McpServer, server::create_server};

#[derive(Parser, Debug)]
#[command(name = "anilist-mcp")]
#[command(about = "MCP server for the AniList GraphQL API")]
#[command(version)]
struct Cli {
    /// AniList API token (optional, required by login tools)
    #[arg(long, env = "ANILIST_TOKEN", hide_env_values = true)]
    anilist_token: Option<String>,

    /// Transport mode: stdio or http
    #[arg(long, default_value = "stdio", env = "TRANSPORT")]
    transport: String,

    /// HTTP server port (only used with --transport http)
    #[arg(long, default_value = "8081", env = "PORT")]
    port: u16,

    /// Comma-separated list of allowed CORS origins (default: any)
    #[arg(long, env = "CORS_ORIGIN")]
    cors_origin: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Stdio,
    Http,
}

impl Transport {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdio" => Self::Stdio,
            "http" => Self::Http,
            other => {
                tracing::warn!(transport = %other, "Unknown transport, falling back to stdio");
                Self::Stdio
            }
        }
    }
}

/// Logs always go to stderr; stdout carries the stdio protocol.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let transport = Transport::parse(&cli.transport);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = ?transport,
        "Starting AniList MCP server"
    );

    let config = Config::from_env()?.with_token(cli.anilist_token);
    if !config.has_token() {
        tracing::info!("No AniList token configured; login tools will be rejected");
    }

    match transport {
        Transport::Stdio => {
            tracing::info!("Running in stdio mode");
            create_server(config)?.run_stdio().await?;
        }
        Transport::Http => {
            tracing::info!(port = cli.port, cors_origin = ?cli.cors_origin, "Running in HTTP mode");
            McpServer::run_http(config, cli.port, cli.cors_origin.as_deref()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_fallback() {
        assert_eq!(Transport::parse("http"), Transport::Http);
        assert_eq!(Transport::parse("HTTP"), Transport::Http);
        assert_eq!(Transport::parse("stdio"), Transport::Stdio);
        assert_eq!(Transport::parse("sse"), Transport::Stdio);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["anilist-mcp", "--port", "9000"]).unwrap();
        assert_eq!(cli.port, 9000);
        assert!(!cli.json_logs);
    }
}
