//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use summark_core::config::Config;
use tracing::{info, instrument};

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio; no options yet.
}

/// Serve MCP tools over stdin/stdout until the client disconnects.
///
/// Logs go to stderr and the log file only; stdout carries the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let server = ProjectServer::with_config(&config);
    info!(max_input = ?config.input_limit(), "starting MCP server on stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
