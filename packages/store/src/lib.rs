#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only incident store.
//!
//! The whole dataset is loaded once from a JSON array at startup and never
//! mutated afterwards. Reloading means building a new [`IncidentStore`].
//! A single malformed record fails the load; no partial dataset is ever
//! handed out.

use std::collections::BTreeSet;
use std::path::Path;

use nightfall_incident_models::Incident;

/// Errors that can occur while loading the incident dataset.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The source could not be read or is not a JSON array.
    #[error("Incident data unavailable: {message}")]
    DataUnavailable {
        /// Description of what went wrong.
        message: String,
    },

    /// A record is missing a required field or has the wrong type.
    #[error("Malformed incident at index {index}: {message}")]
    MalformedIncident {
        /// Zero-based position of the record in the source array.
        index: usize,
        /// Description of what went wrong.
        message: String,
    },
}

/// Immutable collection of incidents in source order.
#[derive(Debug, Clone, Default)]
pub struct IncidentStore {
    incidents: Vec<Incident>,
}

impl IncidentStore {
    /// Wraps an already-validated list of incidents.
    #[must_use]
    pub const fn new(incidents: Vec<Incident>) -> Self {
        Self { incidents }
    }

    /// Loads the store from a JSON file.
    ///
    /// # Errors
    ///
    /// * [`StoreError::DataUnavailable`] if the file cannot be read or is
    ///   not a JSON array
    /// * [`StoreError::MalformedIncident`] if any record is invalid
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        log::info!("Loading incidents from {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|e| StoreError::DataUnavailable {
            message: format!("{}: {e}", path.display()),
        })?;

        let store = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} incidents across {} cities",
            store.len(),
            store.cities().len()
        );

        Ok(store)
    }

    /// Parses the store from a JSON string.
    ///
    /// # Errors
    ///
    /// Same as [`IncidentStore::load`], minus the I/O failure.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| StoreError::DataUnavailable {
                message: format!("expected a JSON array of incidents: {e}"),
            })?;

        let incidents = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<Incident>(record).map_err(|e| {
                    StoreError::MalformedIncident {
                        index,
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let unrecognized = incidents
            .iter()
            .filter(|i| !i.severity.is_recognized())
            .count();
        if unrecognized > 0 {
            log::warn!("{unrecognized} incident(s) have an unrecognized severity; scoring them as Low");
        }

        Ok(Self::new(incidents))
    }

    /// All incidents in load order.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Incidents whose `city` equals `city` exactly, in load order.
    ///
    /// Returns an empty list when nothing matches.
    #[must_use]
    pub fn filter_by_city(&self, city: &str) -> Vec<&Incident> {
        self.incidents.iter().filter(|i| i.city == city).collect()
    }

    /// Distinct city names present in the dataset, sorted.
    #[must_use]
    pub fn cities(&self) -> BTreeSet<&str> {
        self.incidents.iter().map(|i| i.city.as_str()).collect()
    }

    /// Total number of incidents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether the store holds no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}
