#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the nightfall API server.
//!
//! Reads `nightfall.toml` (if present) and the environment, loads the
//! incident dataset, and serves the API until interrupted.

use nightfall_config::NightfallConfig;
use nightfall_safety::SafetyService;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = NightfallConfig::load(None)?;
    let service = SafetyService::from_config(&config).inspect_err(|e| {
        log::error!("Failed to start: {e}");
    })?;

    nightfall_server::run_server(service, &config.server).await?;
    Ok(())
}
