#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City reference coordinates and map links.
//!
//! The default city list is baked into the binary from `cities.toml` via
//! [`include_str!`]. Deployments can replace it with their own `[[cities]]`
//! table in the config file. Looking up a city that isn't registered is an
//! error rather than a silent fallback to some default location.

pub mod links;

use std::collections::BTreeSet;

use nightfall_incident_models::Coordinate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// City list embedded at compile time.
const BUILTIN_CITIES_TOML: &str = include_str!("../cities.toml");

/// Errors that can occur during city lookups.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// The selected city has no reference coordinate.
    #[error("Unknown city: {name}")]
    UnknownCity {
        /// The name that was looked up.
        name: String,
    },

    /// A city list failed to parse or validate.
    #[error("Invalid city list: {message}")]
    InvalidRegistry {
        /// Description of what went wrong.
        message: String,
    },
}

/// A selectable city and its reference coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Display name, matched exactly against incident `city` fields.
    pub name: String,
    /// Reference latitude.
    pub latitude: f64,
    /// Reference longitude.
    pub longitude: f64,
}

impl City {
    /// The city's reference coordinate.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct CitiesFile {
    cities: Vec<City>,
}

/// Ordered list of known cities.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRegistry {
    cities: Vec<City>,
}

impl CityRegistry {
    /// Builds a registry, rejecting empty lists, duplicate names and
    /// non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::InvalidRegistry`] if validation fails.
    pub fn new(cities: Vec<City>) -> Result<Self, GeographyError> {
        if cities.is_empty() {
            return Err(GeographyError::InvalidRegistry {
                message: "no cities defined".to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for city in &cities {
            if !seen.insert(city.name.as_str()) {
                return Err(GeographyError::InvalidRegistry {
                    message: format!("duplicate city {:?}", city.name),
                });
            }
            if !city.coordinate().is_finite() {
                return Err(GeographyError::InvalidRegistry {
                    message: format!("city {:?} has a non-finite coordinate", city.name),
                });
            }
        }

        Ok(Self { cities })
    }

    /// Parses a registry from a TOML document with a `[[cities]]` table.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::InvalidRegistry`] if the TOML is malformed
    /// or fails validation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, GeographyError> {
        let file: CitiesFile =
            toml::from_str(toml_str).map_err(|e| GeographyError::InvalidRegistry {
                message: e.to_string(),
            })?;
        log::debug!("Parsed {} cities", file.cities.len());
        Self::new(file.cities)
    }

    /// The compiled-in default city list.
    ///
    /// # Panics
    ///
    /// Panics if the embedded `cities.toml` is malformed. It is checked by
    /// this crate's tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_CITIES_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse built-in cities.toml: {e}"))
    }

    /// Looks up a city by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::UnknownCity`] if no city has that name.
    pub fn get(&self, name: &str) -> Result<&City, GeographyError> {
        self.cities
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| GeographyError::UnknownCity {
                name: name.to_string(),
            })
    }

    /// All cities in declaration order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// City names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.cities.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_parses() {
        let registry = CityRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["Ajmer", "Jaipur", "Delhi", "Mumbai", "Bangalore"]
        );
    }

    #[test]
    fn lookup_is_exact() {
        let registry = CityRegistry::builtin();
        let ajmer = registry.get("Ajmer").unwrap();
        assert_eq!(ajmer.coordinate(), Coordinate::new(26.4499, 74.6399));
        assert!(registry.get("ajmer").is_err());
    }

    #[test]
    fn unknown_city_is_an_error() {
        let err = CityRegistry::builtin().get("Atlantis").unwrap_err();
        assert!(matches!(err, GeographyError::UnknownCity { ref name } if name == "Atlantis"));
        assert_eq!(err.to_string(), "Unknown city: Atlantis");
    }

    #[test]
    fn rejects_duplicates() {
        let toml = r#"
            [[cities]]
            name = "Pune"
            latitude = 18.52
            longitude = 73.85

            [[cities]]
            name = "Pune"
            latitude = 18.53
            longitude = 73.86
        "#;
        assert!(matches!(
            CityRegistry::from_toml_str(toml),
            Err(GeographyError::InvalidRegistry { .. })
        ));
    }

    #[test]
    fn rejects_empty() {
        assert!(CityRegistry::new(Vec::new()).is_err());
        assert!(CityRegistry::from_toml_str("cities = []").is_err());
    }

    #[test]
    fn rejects_non_finite() {
        let city = City {
            name: "Nowhere".to_string(),
            latitude: f64::NAN,
            longitude: 0.0,
        };
        assert!(CityRegistry::new(vec![city]).is_err());
    }
}
