#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for nightfall.
//!
//! Every subcommand resolves configuration the same way (config file,
//! environment, then flags), loads the incident dataset once, and works
//! against the resulting [`SafetyService`]. Running without a subcommand
//! starts the interactive menu.

mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nightfall_config::NightfallConfig;
use nightfall_safety::SafetyService;

#[derive(Parser)]
#[command(name = "nightfall", about = "Incident proximity risk checker")]
struct Cli {
    /// Config file (defaults to `nightfall.toml` in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Incident dataset (overrides `data_path` and `NIGHTFALL_DATA_PATH`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured cities with their incident counts
    Cities,
    /// List the incidents recorded for a city
    Incidents {
        /// City name (case-sensitive)
        city: String,
    },
    /// Compute the danger score for a position in a city
    Assess {
        /// City name (case-sensitive)
        city: String,
        /// Latitude (defaults to the city reference point)
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude (defaults to the city reference point)
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// Start the HTTP API server
    Serve {
        /// Interface to bind (overrides `BIND_ADDR`)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    nightfall_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = NightfallConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let service = SafetyService::from_config(&config).inspect_err(|e| {
        log::error!("Failed to load incident data: {e}");
    })?;

    let Some(command) = cli.command else {
        return interactive::run(service, &config).await;
    };

    match command {
        Commands::Cities => {
            print!("{}", report::cities(&service.city_summaries()));
        }
        Commands::Incidents { city } => {
            let incidents = service.incidents_for(&city)?;
            print!("{}", report::incidents(&city, &incidents));
        }
        Commands::Assess { city, lat, lon } => {
            print!("{}", report::assess(&service, &city, lat, lon)?);
        }
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(service, config).await?;
        }
    }

    Ok(())
}

/// Runs the server on its own actix system.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
async fn serve(
    service: SafetyService,
    config: NightfallConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new()
            .block_on(nightfall_server::run_server(service, &config.server))
    })
    .await??;
    Ok(())
}
