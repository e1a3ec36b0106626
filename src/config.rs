//! Application configuration loaded from environment variables.
//!
//! A `.env` file is read first when present, so local development needs no
//! exported variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Path of the facilities JSON file
    pub data_path: PathBuf,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Overpass API endpoint used for discovery
    pub overpass_url: String,
    /// Upper bound on facilities passed to one grouping pass
    pub max_grouping_facilities: usize,
    /// Built frontend to serve for non-API paths, if it exists
    pub dist_dir: PathBuf,
}

impl Config {
    /// Config for tests: in-repo defaults, no environment lookups.
    pub fn test_default() -> Self {
        Self {
            port: 3001,
            data_path: PathBuf::from("data/facilities.json"),
            frontend_url: "http://localhost:5173".to_string(),
            overpass_url: "http://127.0.0.1:9/api/interpreter".to_string(),
            max_grouping_facilities: 2000,
            dist_dir: PathBuf::from("dist-missing-in-tests"),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", 3001)?,
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/facilities.json")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| "https://overpass-api.de/api/interpreter".to_string()),
            max_grouping_facilities: parse_var("MAX_GROUPING_FACILITIES", 2000)?,
            dist_dir: env::var("DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),
        })
    }
}

/// Read and parse an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::Invalid { name, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("MAX_GROUPING_FACILITIES", "500");
        env::set_var("DATA_PATH", "/tmp/fieldfinder/facilities.json");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.max_grouping_facilities, 500);
        assert_eq!(
            config.data_path,
            PathBuf::from("/tmp/fieldfinder/facilities.json")
        );

        env::remove_var("MAX_GROUPING_FACILITIES");
        env::remove_var("DATA_PATH");
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        env::set_var("FIELDFINDER_TEST_PORT", "not-a-port");
        let err = parse_var::<u16>("FIELDFINDER_TEST_PORT", 3001).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "FIELDFINDER_TEST_PORT", .. }));
        env::remove_var("FIELDFINDER_TEST_PORT");
    }
}
