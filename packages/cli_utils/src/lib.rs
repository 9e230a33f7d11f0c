#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the nightfall toolchain.
//!
//! Provides [`init_logger`], which sets up `pretty_env_logger` from
//! `RUST_LOG` defaulting to `info`, plus terminal styling for risk tiers
//! and severities.

use console::{StyledObject, style};
use nightfall_incident_models::{RiskTier, Severity};

/// Initializes the global logger from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logger() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .try_init()
        .ok(); // Ignore error if logger was already set (e.g., in tests)
}

/// Tier label coloured by severity: red, yellow or green.
#[must_use]
pub fn styled_tier(tier: RiskTier) -> StyledObject<String> {
    let label = tier.to_string();
    match tier {
        RiskTier::High => style(label).red().bold(),
        RiskTier::Moderate => style(label).yellow().bold(),
        RiskTier::RelativelySafe => style(label).green().bold(),
    }
}

/// Severity name coloured like its map marker.
#[must_use]
pub fn styled_severity(severity: &Severity) -> StyledObject<String> {
    let name = severity.to_string();
    match severity {
        Severity::High => style(name).red(),
        Severity::Medium => style(name).yellow(),
        Severity::Low | Severity::Unrecognized(_) => style(name).blue(),
    }
}
