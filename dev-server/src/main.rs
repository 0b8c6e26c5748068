//! Development server for back-office UI development
//!
//! Runs the in-memory mock backend with seeded countries, states, districts
//! and business natures, so the UI has something to talk to.
//!
//! Usage: cargo run -p dev-server
//!
//! Reads `IP_ADDRESS` (default 127.0.0.1), `PORT` (default 8000),
//! `SECRET_KEY` and `ALLOWED_ORIGINS` (comma separated, default `*`) from the
//! environment or a `.env` file.

use anyhow::{Context, Result};
use test_helpers::MockBackend;
use test_helpers::mock::GeographyDataset;
use test_helpers::telemetry::{get_subscriber, init_subscriber, log_error};
use tracing::info;

const DEFAULT_SECRET_KEY: &str = "dev-secret-key";

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber("info", false);
    init_subscriber(subscriber);

    let ip = var_or("IP_ADDRESS", "127.0.0.1");
    let port: u16 = var_or("PORT", "8000")
        .parse()
        .context("PORT must be a port number")?;
    let secret_key = var_or("SECRET_KEY", DEFAULT_SECRET_KEY);
    let allowed_origins = var_or("ALLOWED_ORIGINS", "*")
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

    info!("🚀 Starting back-office development server");

    let backend =
        MockBackend::new(secret_key.clone()).with_allowed_origins(allowed_origins);
    let (server, port) = backend.serve(&ip, port)?;
    let server = tokio::spawn(server);

    let dataset = GeographyDataset::seed(&backend);

    info!("🎯 Development server ready!");
    info!("   API: http://{ip}:{port}");
    info!(
        "   UI:  cd ui && BACKEND_URL=http://{ip}:{port} trunk serve"
    );
    info!("   Store \"{secret_key}\" under localStorage.secretKey to sign in");
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        result = server => {
            if let Err(e) = result? {
                log_error(e);
            }
        }
    }
    info!("🛑 Shutting down development server");
    Ok(())
}
