//! Google Maps URL builders.
//!
//! Pure string formatting; nothing here touches the network.

use nightfall_incident_models::Coordinate;

const GOOGLE_MAPS_BASE: &str = "https://www.google.com/maps";

/// Link that opens the map centred on `at`.
#[must_use]
pub fn view_url(at: Coordinate) -> String {
    format!("{GOOGLE_MAPS_BASE}?q={},{}", at.latitude, at.longitude)
}

/// Link with driving directions from `from` to `to`.
#[must_use]
pub fn directions_url(from: Coordinate, to: Coordinate) -> String {
    format!(
        "{GOOGLE_MAPS_BASE}/dir/{},{}/{},{}",
        from.latitude, from.longitude, to.latitude, to.longitude
    )
}

/// Embeddable map for a city searched by name.
#[must_use]
pub fn embed_url(city_name: &str) -> String {
    let query: String = city_name
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();
    format!("{GOOGLE_MAPS_BASE}?q={query}&output=embed")
}
