#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Layered configuration.
//!
//! Values are resolved in this order, later layers winning:
//!
//! 1. built-in defaults
//! 2. the TOML config file (`nightfall.toml` by default, optional)
//! 3. environment variables ([`ENV_DATA_PATH`], [`ENV_BIND_ADDR`],
//!    [`ENV_PORT`])
//! 4. command-line flags, applied by the caller
//!
//! [`NightfallConfig::validate`] must pass before anything is loaded from
//! `data_path`.

use std::path::{Path, PathBuf};

use nightfall_geography::City;
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "nightfall.toml";
/// Dataset location used when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/incidents.json";

/// Overrides `data_path`.
pub const ENV_DATA_PATH: &str = "NIGHTFALL_DATA_PATH";
/// Overrides `server.bind_addr`.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
/// Overrides `server.port`.
pub const ENV_PORT: &str = "PORT";

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected keys.
    #[error("Failed to parse config {}: {message}", .path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A setting has an unusable value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// The incident dataset path does not point at a file.
    #[error("Incident data file not found: {}", .path.display())]
    DataPathMissing {
        /// The configured path.
        path: PathBuf,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Scoring settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    /// Incidents strictly closer than this count toward the score.
    pub radius_km: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self { radius_km: 1.0 }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NightfallConfig {
    /// JSON incident dataset.
    pub data_path: PathBuf,
    /// HTTP listener.
    pub server: ServerConfig,
    /// Scoring.
    pub risk: RiskConfig,
    /// Replaces the built-in city list when present.
    pub cities: Option<Vec<City>>,
}

impl Default for NightfallConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            server: ServerConfig::default(),
            risk: RiskConfig::default(),
            cities: None,
        }
    }
}

impl NightfallConfig {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(toml_str: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolves defaults, the config file and the process environment.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// is read if present and skipped otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read_file(default_path)?
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `PORT` is not a valid port.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(data_path) = get(ENV_DATA_PATH) {
            log::debug!("{ENV_DATA_PATH} overrides data_path");
            self.data_path = PathBuf::from(data_path);
        }
        if let Some(bind_addr) = get(ENV_BIND_ADDR) {
            self.server.bind_addr = bind_addr;
        }
        if let Some(port) = get(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT,
                message: format!("{port:?} is not a port number"),
            })?;
        }

        Ok(())
    }

    /// Checks the settings that can be checked without loading anything.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::DataPathMissing`] if `data_path` is not a file
    /// * [`ConfigError::InvalidValue`] if `risk.radius_km` is not a
    ///   positive finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.risk.radius_km.is_finite() && self.risk.radius_km > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "risk.radius_km",
                message: format!("{} must be a positive number", self.risk.radius_km),
            });
        }

        if !self.data_path.is_file() {
            return Err(ConfigError::DataPathMissing {
                path: self.data_path.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = NightfallConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/incidents.json"));
        assert_eq!(config.server.port, 8080);
        assert!((config.risk.radius_km - 1.0).abs() < f64::EPSILON);
        assert!(config.cities.is_none());
    }

    #[test]
    fn parses_partial_file() {
        let config = NightfallConfig::from_toml_str(
            r#"
            data_path = "/srv/nightfall/incidents.json"

            [server]
            port = 9000
            "#,
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(
            config.data_path,
            PathBuf::from("/srv/nightfall/incidents.json")
        );
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_addr, "127.0.0.1");
    }

    #[test]
    fn parses_cities() {
        let config = NightfallConfig::from_toml_str(
            r#"
            [[cities]]
            name = "Pune"
            latitude = 18.5204
            longitude = 73.8567
            "#,
            Path::new("test.toml"),
        )
        .unwrap();
        let cities = config.cities.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Pune");
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = NightfallConfig::from_toml_str("data_pth = \"x\"", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = NightfallConfig::default();
        config
            .apply_env(env(&[
                (ENV_DATA_PATH, "/tmp/other.json"),
                (ENV_BIND_ADDR, "0.0.0.0"),
                (ENV_PORT, "3000"),
            ]))
            .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = NightfallConfig::default();
        config.apply_env(env(&[(ENV_DATA_PATH, "  ")])).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = NightfallConfig::default();
        let err = config.apply_env(env(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn validate_requires_data_file() {
        let config = NightfallConfig {
            data_path: std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4())),
            ..NightfallConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DataPathMissing { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_radius() {
        let path = std::env::temp_dir().join(format!("nightfall-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[]").unwrap();

        let mut config = NightfallConfig {
            data_path: path.clone(),
            ..NightfallConfig::default()
        };
        assert!(config.validate().is_ok());

        config.risk.radius_km = 0.0;
        let zero = config.validate();
        config.risk.radius_km = f64::NAN;
        let nan = config.validate();
        std::fs::remove_file(&path).ok();

        assert!(matches!(zero, Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(nan, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("nightfall-{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(
            NightfallConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }
}
