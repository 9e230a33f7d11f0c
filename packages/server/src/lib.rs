#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for nightfall.
//!
//! Serves the JSON API the dashboard frontend reads: the city list, a
//! city's incidents and heatmap samples, and the risk assessment for a
//! user position. The incident dataset is loaded once before the server
//! starts and is shared read-only across all workers.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use nightfall_config::ServerConfig;
use nightfall_safety::SafetyService;

/// Shared application state.
pub struct AppState {
    /// Loaded dataset, city registry and scorer.
    pub service: Arc<SafetyService>,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/cities", web::get().to(handlers::cities))
            .route("/incidents", web::get().to(handlers::incidents))
            .route("/heatmap", web::get().to(handlers::heatmap))
            .route("/assess", web::get().to(handlers::assess)),
    );
}

/// Starts the nightfall API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(service: SafetyService, server: &ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        service: Arc::new(service),
    });

    let bind_addr = server.bind_addr.clone();
    let port = server.port;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
