#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident, severity and risk tier types.
//!
//! This crate defines the records shared across the whole nightfall
//! workspace: the incident rows loaded from the JSON dataset, the closed
//! severity enumeration that drives scoring weights, geographic
//! coordinates, and the discrete risk tiers shown to the user.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Qualitative harm level of an incident.
///
/// The dataset only defines `High`, `Medium` and `Low`. Any other string is
/// kept verbatim as [`Severity::Unrecognized`] and serialized back as-is.
/// It is weighted like `Low` when scoring.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, EnumString)]
#[serde(from = "String")]
pub enum Severity {
    /// Severity string was not one of the known levels
    #[strum(default)]
    Unrecognized(String),
    /// Minor incidents (petty theft, harassment reports)
    Low,
    /// Incidents warranting caution
    Medium,
    /// Serious incidents (assault, robbery)
    High,
}

impl Severity {
    /// Returns the score contribution of one incident of this severity
    /// within the proximity radius.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low | Self::Unrecognized(_) => 1,
        }
    }

    /// Returns the intensity used when rendering this incident on a heatmap.
    #[must_use]
    pub const fn heat_weight(&self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.6,
            Self::Low | Self::Unrecognized(_) => 0.3,
        }
    }

    /// Returns the map marker colour and radius for this severity.
    #[must_use]
    pub const fn marker_style(&self) -> MarkerStyle {
        match self {
            Self::High => MarkerStyle {
                color: "#ff4d4d",
                radius: 10,
            },
            Self::Medium => MarkerStyle {
                color: "#ffa500",
                radius: 7,
            },
            Self::Low | Self::Unrecognized(_) => MarkerStyle {
                color: "#4da6ff",
                radius: 5,
            },
        }
    }

    /// The severity as it appears in the dataset.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Whether this is one of the known levels.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| Self::Unrecognized(value))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How an incident marker is drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    /// CSS hex colour.
    pub color: &'static str,
    /// Circle radius in pixels.
    pub radius: u8,
}

/// A geographic position in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A historical incident as stored in the dataset.
///
/// All fields are required; a record missing any of them fails to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// City the incident belongs to, matched exactly against the selection.
    pub city: String,
    /// Free-text incident label (e.g. "theft").
    #[serde(rename = "type")]
    pub incident_type: String,
    /// Severity level.
    pub severity: Severity,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Incident {
    /// Returns the incident location.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Discrete risk label derived from a danger score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    /// Score below 3
    #[strum(serialize = "Relatively safe")]
    RelativelySafe,
    /// Score from 3 to 5
    #[strum(serialize = "Moderate risk")]
    Moderate,
    /// Score of 6 or more
    #[strum(serialize = "HIGH RISK")]
    High,
}

impl RiskTier {
    /// Minimum score for [`RiskTier::Moderate`].
    pub const MODERATE_THRESHOLD: u32 = 3;
    /// Minimum score for [`RiskTier::High`].
    pub const HIGH_THRESHOLD: u32 = 6;

    /// Maps a danger score onto a tier. Highest threshold wins.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::RelativelySafe
        }
    }

    /// Short guidance shown next to the tier label.
    #[must_use]
    pub const fn advisory(self) -> &'static str {
        match self {
            Self::High => "Avoid this area",
            Self::Moderate => "Stay alert",
            Self::RelativelySafe => "No recent incidents close by",
        }
    }

    /// Display style hint for the presentation layer.
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::High => "error",
            Self::Moderate => "warning",
            Self::RelativelySafe => "success",
        }
    }
}
