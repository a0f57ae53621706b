//! Email MCP Server
//!
//! A Model Context Protocol (MCP) server exposing a single `send_email` tool
//! that delivers mail through a configured SMTP relay.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use email_mcp_server_rust::config::Config;
use email_mcp_server_rust::error::Result;
use email_mcp_server_rust::mcp::http::HttpTransport;
use email_mcp_server_rust::mcp::server::McpServer;
use email_mcp_server_rust::smtp::SmtpClient;

/// Email MCP Server
#[derive(Parser)]
#[command(name = "email-mcp-server")]
#[command(author, version, about = "Email MCP Server - send email over SMTP via MCP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve JSON-RPC over HTTP instead of stdio
    Http {
        /// Listen port (defaults to the PORT environment variable, then 8081)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration; refusing to start beats serving with no transport
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mailer = Arc::new(SmtpClient::new(&config)?);
    let server = McpServer::new(mailer);

    match cli.command {
        Some(Commands::Http { port }) => {
            let transport = HttpTransport::new(port.unwrap_or(config.http_port));
            transport.run(Arc::new(server)).await?;
        }
        None => {
            server.run_stdio().await?;
        }
    }

    Ok(())
}
