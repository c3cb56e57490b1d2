use anyhow::{Context, Result};
use clap::Parser;
use ga4_mcp::{credentials, http, stdio, Ga4Client, Ga4Config, Ga4Server};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ga4-mcp", version, about = "Google Analytics 4 MCP server")]
struct Cli {
    /// Transport to serve on
    #[arg(long, value_parser = ["stdio", "http"])]
    transport: Option<String>,

    /// Bind address for the HTTP transport
    #[arg(long)]
    host: Option<String>,

    /// Port for the HTTP transport
    #[arg(long)]
    port: Option<u16>,

    /// Optional TOML config file; environment variables still override it
    #[arg(long, env = "GA4_MCP_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env for local dev (if present)
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => Ga4Config::from_file(path)?,
        None => Ga4Config::from_env()?,
    };
    if let Some(transport) = cli.transport {
        config.server.transport = transport;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // stdout belongs to the stdio transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ga4_mcp={}", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded .env");
    }
    tracing::info!("Starting GA4 MCP Server");

    config.validate()?;
    tracing::info!(
        "Configuration loaded: transport={}, property={}",
        config.server.transport,
        config.analytics.property_id
    );

    // Kept alive until exit: a decoded key lives in a temp file owned by this value
    let resolved = credentials::resolve_from_env().context("unable to set up Google credentials")?;
    let client = Ga4Client::connect(&config.analytics, resolved.path())
        .await
        .context("failed to initialize the GA4 client")?;

    let server = Ga4Server::new(config.clone(), Arc::new(client));
    let tools = server.get_tools();
    tracing::info!("Available tools: {}", tools.len());
    for tool in tools {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    match config.server.transport.to_lowercase().as_str() {
        "http" => {
            tracing::info!(
                "GA4 MCP Server running with HTTP transport on {}:{}",
                config.server.host,
                config.server.port
            );
            http::run_http_server(server, &config.server).await?;
        }
        _ => {
            tracing::info!("GA4 MCP Server running with stdio transport");
            stdio::run_stdio_server(&server).await?;
            tracing::info!("GA4 MCP Server shutting down");
        }
    }

    drop(resolved);
    Ok(())
}
