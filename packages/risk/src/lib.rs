#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Proximity-based danger scoring.
//!
//! Every incident within [`DEFAULT_RADIUS_KM`] of the user contributes its
//! severity weight to an integer danger score, which is then mapped onto a
//! [`RiskTier`]. Scoring is a pure function of the user position and the
//! incident slice; nothing is cached between calls.

pub mod distance;

use nightfall_incident_models::{Coordinate, Incident, RiskTier};
use serde::Serialize;

pub use distance::{KM_PER_DEGREE, distance_km};

/// Incidents strictly closer than this many kilometres count toward the score.
pub const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Result of scoring one user position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Position that was scored.
    pub position: Coordinate,
    /// Sum of severity weights of nearby incidents.
    pub score: u32,
    /// Tier derived from `score`.
    pub tier: RiskTier,
    /// Number of incidents that fell inside the radius.
    pub nearby_count: usize,
}

/// Scores positions against a set of incidents.
///
/// Holds only the proximity radius, so it is `Copy` and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScorer {
    radius_km: f64,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl RiskScorer {
    /// Creates a scorer with a custom proximity radius.
    #[must_use]
    pub const fn with_radius_km(radius_km: f64) -> Self {
        Self { radius_km }
    }

    /// The proximity radius in kilometres.
    #[must_use]
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Whether `incident` is close enough to `position` to count.
    ///
    /// The comparison is strict, and a NaN distance never qualifies.
    #[must_use]
    pub fn is_nearby(&self, position: Coordinate, incident: &Incident) -> bool {
        distance_km(position, incident.coordinate()) < self.radius_km
    }

    /// Scores `position` against `incidents`.
    ///
    /// Callers pass the incidents already filtered to the selected city.
    #[must_use]
    pub fn assess<'a, I>(&self, position: Coordinate, incidents: I) -> RiskAssessment
    where
        I: IntoIterator<Item = &'a Incident>,
    {
        let mut score = 0u32;
        let mut nearby_count = 0usize;

        for incident in incidents {
            if self.is_nearby(position, incident) {
                score = score.saturating_add(incident.severity.weight());
                nearby_count += 1;
            }
        }

        log::trace!(
            "assess: position=({}, {}) nearby={nearby_count} score={score}",
            position.latitude,
            position.longitude
        );

        RiskAssessment {
            position,
            score,
            tier: RiskTier::from_score(score),
            nearby_count,
        }
    }

    /// Returns only the danger score for `position`.
    #[must_use]
    pub fn score<'a, I>(&self, position: Coordinate, incidents: I) -> u32
    where
        I: IntoIterator<Item = &'a Incident>,
    {
        self.assess(position, incidents).score
    }
}
