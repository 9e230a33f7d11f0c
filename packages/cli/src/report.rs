//! Plain-text rendering of evaluations, incident lists and city tables.

use std::fmt::Write as _;

use nightfall_cli_utils::{styled_severity, styled_tier};
use nightfall_incident_models::Incident;
use nightfall_safety::{CitySummary, Evaluation, SafetyError, SafetyService};

/// Renders a risk evaluation.
#[must_use]
pub fn assessment(eval: &Evaluation<'_>, radius_km: f64) -> String {
    let a = &eval.assessment;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} @ ({}, {})",
        eval.city.name, a.position.latitude, a.position.longitude
    );
    let _ = writeln!(
        out,
        "  Danger score: {} ({} of {} incidents within {radius_km} km)",
        a.score,
        a.nearby_count,
        eval.incidents.len()
    );
    let _ = writeln!(out, "  {}: {}", styled_tier(a.tier), a.tier.advisory());
    let _ = writeln!(out, "  Map: {}", eval.view_url);
    let _ = writeln!(out, "  Take me to safety: {}", eval.safety_directions_url);

    out
}

/// Scores `city` at the given position and renders the result.
///
/// Omitted components come from the city reference point.
///
/// # Errors
///
/// Returns an error if the city is unknown or a component is not finite.
pub fn assess(
    service: &SafetyService,
    city: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<String, SafetyError> {
    let position = service.resolve_position(city, latitude, longitude)?;
    let eval = service.evaluate(city, position)?;
    Ok(assessment(&eval, service.scorer().radius_km()))
}

/// Renders a city's incidents as a table.
#[must_use]
pub fn incidents(city: &str, incidents: &[&Incident]) -> String {
    let mut out = String::new();

    if incidents.is_empty() {
        let _ = writeln!(out, "No incidents recorded for {city}");
        return out;
    }

    let _ = writeln!(out, "{:<20} {:<8} {:>10} {:>10}", "TYPE", "SEVERITY", "LAT", "LON");
    let _ = writeln!(out, "{}", "-".repeat(51));
    for incident in incidents {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:>10.4} {:>10.4}",
            incident.incident_type,
            styled_severity(&incident.severity),
            incident.latitude,
            incident.longitude
        );
    }
    let _ = writeln!(out, "{} incident(s) in {city}", incidents.len());

    out
}

/// Renders the registered cities.
#[must_use]
pub fn cities(summaries: &[CitySummary<'_>]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:<16} {:>10} {:>10} {:>10}", "CITY", "LAT", "LON", "INCIDENTS");
    let _ = writeln!(out, "{}", "-".repeat(49));
    for summary in summaries {
        let _ = writeln!(
            out,
            "{:<16} {:>10.4} {:>10.4} {:>10}",
            summary.city.name, summary.city.latitude, summary.city.longitude, summary.incident_count
        );
    }

    out
}
