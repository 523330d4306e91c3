//! Environment-based configuration, loaded once at startup.

use std::env;
use std::path::PathBuf;

/// Locations of the trained artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub ensemble_path: PathBuf,
    pub schema_path: PathBuf,
    pub vocab_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            ensemble_path: PathBuf::from("artifacts/ensemble.json"),
            schema_path: PathBuf::from("artifacts/feature_columns.json"),
            vocab_path: PathBuf::from("artifacts/vocabularies.json"),
        }
    }
}

impl ArtifactConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ensemble_path: env::var("SOKOCAST_ENSEMBLE")
                .map(PathBuf::from)
                .unwrap_or(defaults.ensemble_path),
            schema_path: env::var("SOKOCAST_SCHEMA")
                .map(PathBuf::from)
                .unwrap_or(defaults.schema_path),
            vocab_path: env::var("SOKOCAST_VOCAB")
                .map(PathBuf::from)
                .unwrap_or(defaults.vocab_path),
        }
    }
}

/// Request-independent forecast defaults.
#[derive(Debug, Clone)]
pub struct ForecastEnvConfig {
    /// Default radius for micro-market search in kilometers.
    pub default_radius_km: f64,
}

impl Default for ForecastEnvConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 50.0,
        }
    }
}

impl ForecastEnvConfig {
    pub fn from_env() -> Self {
        Self {
            default_radius_km: env::var("SOKOCAST_DEFAULT_RADIUS_KM")
                .unwrap_or_else(|_| "50.0".to_string())
                .parse::<f64>()
                .unwrap_or(50.0),
        }
    }
}
