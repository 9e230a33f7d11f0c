//! Short-range distance approximation.
//!
//! Treats degrees as a flat Cartesian grid and scales by a fixed
//! kilometres-per-degree factor. Longitude is *not* scaled by
//! `cos(latitude)`, so east-west separations are overstated away from the
//! equator. This is the distance model the scoring thresholds were tuned
//! against; it is not a great-circle distance.

use nightfall_incident_models::Coordinate;

/// Kilometres per degree used by [`distance_km`].
pub const KM_PER_DEGREE: f64 = 111.0;

/// Approximate distance in kilometres between two coordinates.
///
/// Non-finite inputs propagate into a NaN or infinite result.
#[must_use]
// Plain sqrt, not hypot: scores at the 1 km boundary must not drift.
#[allow(clippy::imprecise_flops, clippy::suboptimal_flops)]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = a.latitude - b.latitude;
    let d_lon = a.longitude - b.longitude;
    (d_lat * d_lat + d_lon * d_lon).sqrt() * KM_PER_DEGREE
}
