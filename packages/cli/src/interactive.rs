//! Interactive menu.
//!
//! Lets the user pick a city, edit their position and see the resulting
//! assessment, repeating until they quit. Each round recomputes the score
//! from scratch against the already-loaded dataset.

use dialoguer::{Confirm, Input, Select};
use nightfall_config::NightfallConfig;
use nightfall_safety::{SafetyError, SafetyService};

use crate::report;

/// Top-level actions in the interactive menu.
enum Action {
    Assess,
    Incidents,
    Cities,
    Server,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Assess,
        Self::Incidents,
        Self::Cities,
        Self::Server,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Assess => "Check my safety level",
            Self::Incidents => "List incidents for a city",
            Self::Cities => "List cities",
            Self::Server => "Start server",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive menu until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or the server cannot start.
pub async fn run(
    service: SafetyService,
    config: &NightfallConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Nightfall");
    println!("Your quiet guardian after dark");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::Assess => assess(&service)?,
            Action::Incidents => {
                let city = select_city(&service)?;
                let incidents = service.incidents_for(&city)?;
                print!("{}", report::incidents(&city, &incidents));
            }
            Action::Cities => print!("{}", report::cities(&service.city_summaries())),
            Action::Server => {
                let server = config.server.clone();
                tokio::task::spawn_blocking(move || {
                    actix_web::rt::System::new()
                        .block_on(nightfall_server::interactive::run(service, &server))
                })
                .await??;
                return Ok(());
            }
            Action::Quit => return Ok(()),
        }

        println!();
    }
}

fn select_city(service: &SafetyService) -> Result<String, dialoguer::Error> {
    let names = service.cities().names();
    let idx = Select::new()
        .with_prompt("City")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[idx].to_string())
}

fn assess(service: &SafetyService) -> Result<(), Box<dyn std::error::Error>> {
    let city = select_city(service)?;
    let center = service.city(&city)?.coordinate();
    let mut position = center;

    loop {
        let latitude: f64 = Input::new()
            .with_prompt("Latitude")
            .default(position.latitude)
            .interact_text()?;
        let longitude: f64 = Input::new()
            .with_prompt("Longitude")
            .default(position.longitude)
            .interact_text()?;
        let resolved = match service.resolve_position(&city, Some(latitude), Some(longitude)) {
            Ok(resolved) => resolved,
            Err(SafetyError::InvalidPosition { message }) => {
                println!("{message}");
                position = center;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        position = resolved.unwrap_or(center);

        let eval = service.evaluate(&city, Some(position))?;
        println!();
        print!(
            "{}",
            report::assessment(&eval, service.scorer().radius_km())
        );
        println!();

        if !Confirm::new()
            .with_prompt("Check another position?")
            .default(false)
            .interact()?
        {
            return Ok(());
        }
    }
}
