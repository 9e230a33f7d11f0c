#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the nightfall server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the core incident types so the API contract can evolve on its own.

use nightfall_incident_models::{Incident, RiskTier, Severity};
use serde::{Deserialize, Serialize};

/// An incident as returned by the API, with its map marker style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// City.
    pub city: String,
    /// Incident label.
    #[serde(rename = "type")]
    pub incident_type: String,
    /// Severity level.
    pub severity: Severity,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Marker colour (CSS hex).
    pub marker_color: String,
    /// Marker radius in pixels.
    pub marker_radius: u8,
}

impl From<&Incident> for ApiIncident {
    fn from(incident: &Incident) -> Self {
        let style = incident.severity.marker_style();
        Self {
            city: incident.city.clone(),
            incident_type: incident.incident_type.clone(),
            severity: incident.severity.clone(),
            latitude: incident.latitude,
            longitude: incident.longitude,
            marker_color: style.color.to_string(),
            marker_radius: style.radius,
        }
    }
}

/// A selectable city.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    /// City name.
    pub name: String,
    /// Reference latitude.
    pub latitude: f64,
    /// Reference longitude.
    pub longitude: f64,
    /// Number of recorded incidents.
    pub incident_count: usize,
    /// Map centred on the city.
    pub view_url: String,
    /// Embeddable map URL.
    pub embed_url: String,
}

/// Query parameters selecting a city.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQueryParams {
    /// City name, matched exactly.
    pub city: String,
}

/// Query parameters for the assessment endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessQueryParams {
    /// City name, matched exactly.
    pub city: String,
    /// User latitude. Defaults to the city reference point.
    pub lat: Option<f64>,
    /// User longitude. Defaults to the city reference point.
    pub lon: Option<f64>,
}

/// Danger score and tier for a user position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAssessment {
    /// Selected city.
    pub city: String,
    /// Scored latitude.
    pub latitude: f64,
    /// Scored longitude.
    pub longitude: f64,
    /// Danger score.
    pub score: u32,
    /// Tier.
    pub tier: RiskTier,
    /// Human-readable tier label (e.g. "HIGH RISK").
    pub label: String,
    /// Short guidance for the user.
    pub advisory: String,
    /// Display style hint (`success`, `warning`, `error`).
    pub level: String,
    /// Incidents inside the radius.
    pub nearby_count: usize,
    /// Proximity radius used.
    pub radius_km: f64,
    /// Incidents recorded for the city.
    pub incident_count: usize,
    /// Map centred on the city.
    pub view_url: String,
    /// Directions from the user back to the city reference point.
    pub safety_directions_url: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of incidents loaded.
    pub incident_count: usize,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Description of what went wrong.
    pub error: String,
}
