use crate::sdk::util::rate_limit::DEFAULT_QPS;
use std::env::{self, VarError};
use std::num::NonZeroU32;
use thiserror::Error;

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const BASE_URL_VAR: &str = "GOOGLE_MAPS_BASE_URL";
pub const QPS_VAR: &str = "MAPS_QPS";

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    MissingVar(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything needed to talk to the Maps web services, built once at startup.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    pub api_key: String,
    pub base_url: String,
    pub requests_per_second: NonZeroU32,
}

impl MapsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let api_key = match lookup(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
            Ok(_) | Err(VarError::NotPresent) => return Err(ConfigError::MissingVar(API_KEY_VAR)),
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::Invalid {
                    name: API_KEY_VAR,
                    value: String::new(),
                    reason: "value is not valid unicode".to_string(),
                })
            }
        };

        let base_url = lookup(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let requests_per_second = match lookup(QPS_VAR) {
            Ok(raw) => raw
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|e| ConfigError::Invalid {
                    name: QPS_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            Err(_) => DEFAULT_QPS,
        };

        Ok(Self {
            api_key,
            base_url,
            requests_per_second,
        })
    }
}
