use crate::clock::OffsetMethod;
use crate::render::export::DEFAULT_OUTPUT_FILE;
use crate::sources::timezones::{MissingZonePolicy, DEFAULT_DATASET_URL};
use std::path::PathBuf;
use thiserror::Error;

const LOCAL_ZONE: &str = "TZMAP_LOCAL_ZONE";
const DATASET_URL: &str = "TZMAP_DATASET_URL";
const OUTPUT: &str = "TZMAP_OUTPUT";
const OPEN: &str = "TZMAP_OPEN";
const OFFSET_METHOD: &str = "TZMAP_OFFSET_METHOD";
const MISSING_ZONE: &str = "TZMAP_MISSING_ZONE";
const VERBOSE_LOGGING: &str = "VERBOSE_LOGGING";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Explicit zone name; `None` means "ask the host".
    pub local_zone: Option<String>,
    pub dataset_url: String,
    pub output_path: PathBuf,
    pub open_viewer: bool,
    pub offset_method: OffsetMethod,
    pub missing_zone: MissingZonePolicy,
    pub verbose_http: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Settings {
            local_zone: None,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            open_viewer: true,
            offset_method: OffsetMethod::default(),
            missing_zone: MissingZonePolicy::default(),
            verbose_http: false,
        }
    }
}
impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from a key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
    where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let defaults = Settings::default();

        let dataset_url = match get(DATASET_URL) {
            Some(value) => match url::Url::parse(&value) {
                Ok(_) => value,
                Err(e) => return Err(invalid(DATASET_URL, value, e.to_string())),
            },
            None => defaults.dataset_url,
        };

        let offset_method = match get(OFFSET_METHOD).as_deref().map(str::to_lowercase).as_deref() {
            None => defaults.offset_method,
            Some("wall-clock") => OffsetMethod::WallClock,
            Some("direct") => OffsetMethod::Direct,
            Some(other) => return Err(invalid(OFFSET_METHOD, other.to_string(),
                                              "expected 'wall-clock' or 'direct'".to_string())),
        };

        let missing_zone = match get(MISSING_ZONE).as_deref().map(str::to_lowercase).as_deref() {
            None => defaults.missing_zone,
            Some("skip") => MissingZonePolicy::Skip,
            Some("zero") => MissingZonePolicy::Zero,
            Some(other) => return Err(invalid(MISSING_ZONE, other.to_string(),
                                              "expected 'skip' or 'zero'".to_string())),
        };

        Ok(Settings {
            local_zone: get(LOCAL_ZONE),
            dataset_url,
            output_path: get(OUTPUT).map(PathBuf::from).unwrap_or(defaults.output_path),
            open_viewer: parse_flag(OPEN, get(OPEN))?.unwrap_or(defaults.open_viewer),
            offset_method,
            missing_zone,
            verbose_http: parse_flag(VERBOSE_LOGGING, get(VERBOSE_LOGGING))?.unwrap_or(defaults.verbose_http),
        })
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    match value {
        Some(value) => value.to_lowercase()
            .parse::<bool>()
            .map(Some)
            .map_err(|e| invalid(key, value, e.to_string())),
        None => Ok(None),
    }
}

fn invalid(key: &'static str, value: String, reason: String) -> ConfigError {
    ConfigError::InvalidValue { key, value, reason }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(settings(&[]).unwrap(), Settings::default());
        assert_eq!(Settings::default().output_path, PathBuf::from("world_timezones.html"));
    }

    #[test]
    fn every_setting_can_be_overridden() {
        let settings = settings(&[
            ("TZMAP_LOCAL_ZONE", "Asia/Kolkata"),
            ("TZMAP_DATASET_URL", "http://localhost:8080/zones.geojson"),
            ("TZMAP_OUTPUT", "out/map.html"),
            ("TZMAP_OPEN", "false"),
            ("TZMAP_OFFSET_METHOD", "Direct"),
            ("TZMAP_MISSING_ZONE", "zero"),
            ("VERBOSE_LOGGING", "TRUE"),
        ]).unwrap();

        assert_eq!(settings, Settings {
            local_zone: Some("Asia/Kolkata".to_string()),
            dataset_url: "http://localhost:8080/zones.geojson".to_string(),
            output_path: PathBuf::from("out/map.html"),
            open_viewer: false,
            offset_method: OffsetMethod::Direct,
            missing_zone: MissingZonePolicy::Zero,
            verbose_http: true,
        });
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = settings(&[("TZMAP_LOCAL_ZONE", "  "), ("TZMAP_OPEN", "")]).unwrap();
        assert_eq!(settings.local_zone, None);
        assert!(settings.open_viewer);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            ("TZMAP_DATASET_URL", "not a url"),
            ("TZMAP_OPEN", "maybe"),
            ("TZMAP_OFFSET_METHOD", "sundial"),
            ("TZMAP_MISSING_ZONE", "guess"),
        ] {
            match settings(&[(key, value)]) {
                Err(ConfigError::InvalidValue { key: rejected, .. }) => assert_eq!(rejected, key),
                Ok(s) => panic!("{}={} was accepted: {:?}", key, value, s),
            }
        }
    }
}
