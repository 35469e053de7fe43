//! Runtime configuration for the compatibility layer.

use serde::{Deserialize, Serialize};

use crate::{AcousticError, AcousticResult};

/// Environment variable overriding the version the gate simulates.
pub const VERSION_ENV: &str = "ACOUSTIC_SIGNALS_VERSION";
/// Environment variable switching notice logging on or off.
pub const LOG_NOTICES_ENV: &str = "ACOUSTIC_SIGNALS_LOG_NOTICES";

/// Settings used to build a [`DeprecationGate`](crate::DeprecationGate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Version to simulate. `None` means this build's version.
    pub version: Option<String>,
    /// Log notices through `tracing`; when false they are dropped.
    pub log_notices: bool,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            version: None,
            log_notices: true,
        }
    }
}

impl CompatConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> AcousticResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AcousticResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(version) = lookup(VERSION_ENV).filter(|v| !v.trim().is_empty()) {
            crate::version::parse(&version)?;
            config.version = Some(version.trim().to_string());
        }
        if let Some(flag) = lookup(LOG_NOTICES_ENV) {
            config.log_notices = parse_flag(&flag)?;
        }
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> AcousticResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AcousticError::Config(format!("Failed to parse configuration: {e}")))?;
        if let Some(version) = &config.version {
            crate::version::parse(version)?;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> AcousticResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AcousticError::Config(format!(
            "{LOG_NOTICES_ENV} must be a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = CompatConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CompatConfig::default());
        assert!(config.log_notices);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = CompatConfig::from_lookup(lookup_from(&[
            (VERSION_ENV, " 0.8.0 "),
            (LOG_NOTICES_ENV, "off"),
        ]))
        .unwrap();
        assert_eq!(config.version.as_deref(), Some("0.8.0"));
        assert!(!config.log_notices);
    }

    #[test]
    fn test_lookup_rejects_invalid_values() {
        assert!(matches!(
            CompatConfig::from_lookup(lookup_from(&[(VERSION_ENV, "eight")])),
            Err(AcousticError::Version(_))
        ));
        assert!(matches!(
            CompatConfig::from_lookup(lookup_from(&[(LOG_NOTICES_ENV, "maybe")])),
            Err(AcousticError::Config(_))
        ));
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = CompatConfig::from_json(r#"{"version": "0.5.0"}"#).unwrap();
        assert_eq!(config.version.as_deref(), Some("0.5.0"));
        assert!(config.log_notices);

        assert!(CompatConfig::from_json("{").is_err());
    }
}
