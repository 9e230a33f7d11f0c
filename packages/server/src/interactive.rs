//! Interactive mode for the server.
//!
//! Prompts the user for bind address and port before starting the server.

use dialoguer::{Confirm, Input};
use nightfall_config::ServerConfig;
use nightfall_safety::SafetyService;

/// Runs the server in interactive mode, prompting for configuration.
///
/// The configured bind address and port are offered as defaults, then
/// [`super::run_server`] is started with whatever the user entered.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(service: SafetyService, defaults: &ServerConfig) -> std::io::Result<()> {
    println!("Nightfall Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(service, &ServerConfig { bind_addr, port }).await
}
