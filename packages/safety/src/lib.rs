#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City safety evaluation.
//!
//! [`SafetyService`] ties the immutable incident store, the city registry
//! and the risk scorer together. Each call to [`SafetyService::evaluate`]
//! takes the current selection (city plus optional user position) and
//! recomputes everything the presentation layer shows: the city's
//! incidents, the danger score and tier, and the map links.

use nightfall_config::{ConfigError, NightfallConfig};
use nightfall_geography::{City, CityRegistry, GeographyError, links};
use nightfall_incident_models::{Coordinate, Incident};
use nightfall_risk::{RiskAssessment, RiskScorer};
use nightfall_store::{IncidentStore, StoreError};

/// Errors that can occur while building or querying the service.
#[derive(Debug, thiserror::Error)]
pub enum SafetyError {
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The incident dataset could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// City lookup failed.
    #[error(transparent)]
    Geography(#[from] GeographyError),

    /// A user position component is NaN or infinite.
    #[error("Invalid position: {message}")]
    InvalidPosition {
        /// Description of what went wrong.
        message: String,
    },
}

/// Everything shown for one (city, position) selection.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    /// Selected city.
    pub city: &'a City,
    /// Incidents recorded for the city, in dataset order.
    pub incidents: Vec<&'a Incident>,
    /// Score and tier for the user position.
    pub assessment: RiskAssessment,
    /// Map centred on the city reference point.
    pub view_url: String,
    /// Directions from the user position back to the city reference point.
    pub safety_directions_url: String,
}

/// A heatmap sample: `[latitude, longitude, weight]`.
pub type HeatPoint = [f64; 3];

/// A registered city with the number of incidents recorded for it.
#[derive(Debug, Clone, Copy)]
pub struct CitySummary<'a> {
    /// The city.
    pub city: &'a City,
    /// Incidents recorded for the city.
    pub incident_count: usize,
}

/// Read-only evaluation service, shared across requests.
#[derive(Debug, Clone)]
pub struct SafetyService {
    store: IncidentStore,
    cities: CityRegistry,
    scorer: RiskScorer,
}

impl SafetyService {
    /// Assembles a service from already-built parts.
    #[must_use]
    pub const fn new(store: IncidentStore, cities: CityRegistry, scorer: RiskScorer) -> Self {
        Self {
            store,
            cities,
            scorer,
        }
    }

    /// Validates `config`, loads the dataset and builds the city registry.
    ///
    /// A `data_path` that is not a file is reported as
    /// [`StoreError::DataUnavailable`], the same as an unreadable one.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the dataset cannot be loaded,
    /// or the configured city list is invalid.
    pub fn from_config(config: &NightfallConfig) -> Result<Self, SafetyError> {
        config.validate().map_err(|e| match e {
            ConfigError::DataPathMissing { path } => {
                SafetyError::Store(StoreError::DataUnavailable {
                    message: format!("{}: no such file", path.display()),
                })
            }
            other => SafetyError::Config(other),
        })?;

        let cities = match &config.cities {
            Some(cities) => CityRegistry::new(cities.clone())?,
            None => CityRegistry::builtin(),
        };
        let store = IncidentStore::load(&config.data_path)?;

        for name in store.cities() {
            if cities.get(name).is_err() {
                log::warn!("Dataset city {name:?} is not registered and can't be selected");
            }
        }

        Ok(Self::new(
            store,
            cities,
            RiskScorer::with_radius_km(config.risk.radius_km),
        ))
    }

    /// The loaded dataset.
    #[must_use]
    pub const fn store(&self) -> &IncidentStore {
        &self.store
    }

    /// The registered cities.
    #[must_use]
    pub const fn cities(&self) -> &CityRegistry {
        &self.cities
    }

    /// The scorer in use.
    #[must_use]
    pub const fn scorer(&self) -> RiskScorer {
        self.scorer
    }

    /// Looks up a registered city.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::UnknownCity`] if `name` is not registered.
    pub fn city(&self, name: &str) -> Result<&City, SafetyError> {
        Ok(self.cities.get(name)?)
    }

    /// Incidents of a registered city, in dataset order.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::UnknownCity`] if `name` is not registered.
    pub fn incidents_for(&self, name: &str) -> Result<Vec<&Incident>, SafetyError> {
        let city = self.city(name)?;
        Ok(self.store.filter_by_city(&city.name))
    }

    /// Builds the user position for `city` from optional components.
    ///
    /// Returns `None` when neither component is given, so evaluation uses
    /// the city reference point. A single missing component is taken from
    /// the reference point.
    ///
    /// # Errors
    ///
    /// * [`GeographyError::UnknownCity`] if `city` is not registered
    /// * [`SafetyError::InvalidPosition`] if a given component is NaN or
    ///   infinite
    pub fn resolve_position(
        &self,
        city: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Coordinate>, SafetyError> {
        let center = self.city(city)?.coordinate();

        if latitude.is_none() && longitude.is_none() {
            return Ok(None);
        }

        let position = Coordinate::new(
            latitude.unwrap_or(center.latitude),
            longitude.unwrap_or(center.longitude),
        );
        if !position.is_finite() {
            return Err(SafetyError::InvalidPosition {
                message: format!(
                    "latitude and longitude must be finite numbers, got ({}, {})",
                    position.latitude, position.longitude
                ),
            });
        }

        Ok(Some(position))
    }

    /// Evaluates the selection. `position` defaults to the city's
    /// reference coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::UnknownCity`] if `city` is not registered.
    pub fn evaluate(
        &self,
        city: &str,
        position: Option<Coordinate>,
    ) -> Result<Evaluation<'_>, SafetyError> {
        let city = self.city(city)?;
        let center = city.coordinate();
        let position = position.unwrap_or(center);
        let incidents = self.store.filter_by_city(&city.name);
        let assessment = self.scorer.assess(position, incidents.iter().copied());

        log::debug!(
            "{}: {} incidents, score {} ({})",
            city.name,
            incidents.len(),
            assessment.score,
            assessment.tier
        );

        Ok(Evaluation {
            city,
            incidents,
            assessment,
            view_url: links::view_url(center),
            safety_directions_url: links::directions_url(position, center),
        })
    }

    /// Heatmap samples for a registered city.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::UnknownCity`] if `name` is not registered.
    pub fn heatmap(&self, name: &str) -> Result<Vec<HeatPoint>, SafetyError> {
        Ok(self
            .incidents_for(name)?
            .into_iter()
            .map(|i| [i.latitude, i.longitude, i.severity.heat_weight()])
            .collect())
    }

    /// Every registered city with its incident count, in registry order.
    #[must_use]
    pub fn city_summaries(&self) -> Vec<CitySummary<'_>> {
        self.cities
            .cities()
            .iter()
            .map(|city| CitySummary {
                city,
                incident_count: self.store.filter_by_city(&city.name).len(),
            })
            .collect()
    }
}
