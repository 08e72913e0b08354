// ABOUTME: Standalone schema migration binary for the Smart Pantry database
// ABOUTME: Opens the database, creates missing tables and indexes, then exits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use anyhow::Result;
use clap::Parser;
use smart_pantry::config::environment::{DatabaseUrl, DEFAULT_DATABASE_URL};
use smart_pantry::database::Database;
use smart_pantry::logging;
use tracing::info;

#[derive(Parser)]
#[command(name = "smart-pantry-migrate")]
#[command(about = "Create or update the Smart Pantry database schema")]
pub struct Args {
    /// Database URL; defaults to `DATABASE_URL` or the bundled default
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // Missing .env is fine here
    let _ = dotenvy::dotenv();
    logging::init_from_env()?;

    let raw_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
    let url = DatabaseUrl::parse_url(&raw_url)?;

    info!("Running migrations against {url}");
    // Database::new applies every migration before returning
    let database = Database::new(&url.to_connection_string(), 1).await?;
    database.health_check().await?;
    info!("Migrations complete");

    Ok(())
}
