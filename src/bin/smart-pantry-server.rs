// ABOUTME: Server binary for the Smart Pantry API
// ABOUTME: Loads configuration, opens the database, wires resources, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Smart Pantry Server Binary
//!
//! Starts the HTTP API with JWT authentication, CSRF protection, and recipe
//! suggestions backed by Gemini when `GEMINI_API_KEY` is set.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use smart_pantry::config::environment::{DatabaseUrl, ServerConfig};
use smart_pantry::database::Database;
use smart_pantry::logging;
use smart_pantry::resources::{llm_provider_from_config, ServerResources};
use smart_pantry::server::{run_server, ENDPOINTS};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "smart-pantry-server")]
#[command(about = "Smart Pantry API - food inventory with recipe suggestions")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/pantry.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG and LOG_FORMAT may come from .env, so load it before the subscriber
    let _ = dotenvy::dotenv();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    info!("Starting Smart Pantry API");
    info!("{}", config.summary());

    let database = Database::new(
        &config.database.url.to_connection_string(),
        config.database.max_connections,
    )
    .await?;

    let llm_provider = llm_provider_from_config(&config.llm);

    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.http_port))?;

    let resources = Arc::new(ServerResources::new(
        database,
        Arc::new(config),
        llm_provider,
    ));

    display_available_endpoints(addr);

    if let Err(e) = run_server(resources, addr).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Log every route with its full URL
fn display_available_endpoints(addr: SocketAddr) {
    info!("=== Available API Endpoints ===");
    for (method, path) in ENDPOINTS {
        info!("   {method:<6} http://{addr}{path}");
    }
    info!("=== End of Endpoint List ===");
}
