// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine-wide defaults an embedding application can pin in a file, loaded by sniffing the file
//! extension (`SPEC_FULL.md` §4.H), mirroring the reference architecture's multi-format config
//! loader (`config::loader::load_config`).

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine-wide defaults: worker count, per-task timeout, and whether to compute cost telemetry /
/// inflate results by default. Every field is optional so a caller can override per-call without
/// touching the file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// `None` means "use [`std::thread::available_parallelism`]".
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default, with = "humantime_seconds")]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub costs: bool,
    #[serde(default)]
    pub inflate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            timeout: None,
            costs: false,
            inflate: false,
        }
    }
}

impl EngineConfig {
    /// Resolves `workers`, falling back to the host's available parallelism.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Errors raised while loading an [`EngineConfig`] from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unrecognized config extension {0:?}: expected toml, yaml, yml, or json")]
    UnknownFormat(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads an [`EngineConfig`] from a TOML, YAML, or JSON file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        other => Err(ConfigError::UnknownFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

mod humantime_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, ser: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs_f64()).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Duration>, D::Error> {
        let secs: Option<f64> = Option::deserialize(de)?;
        Ok(secs.map(Duration::from_secs_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_has_no_workers_or_timeout_and_both_flags_off() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.workers, None);
        assert_eq!(cfg.timeout, None);
        assert!(!cfg.costs);
        assert!(!cfg.inflate);
    }

    #[test]
    fn worker_count_falls_back_to_available_parallelism() {
        let cfg = EngineConfig::default();
        assert!(cfg.worker_count() >= 1);
        let pinned = EngineConfig {
            workers: Some(7),
            ..EngineConfig::default()
        };
        assert_eq!(pinned.worker_count(), 7);
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_toml() {
        let file = write_temp(".toml", "workers = 4\ncosts = true\ntimeout = 2.5\n");
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.workers, Some(4));
        assert!(cfg.costs);
        assert_eq!(cfg.timeout, Some(Duration::from_secs_f64(2.5)));
    }

    #[test]
    fn loads_yaml() {
        let file = write_temp(".yaml", "workers: 2\ninflate: true\n");
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.workers, Some(2));
        assert!(cfg.inflate);
    }

    #[test]
    fn loads_json() {
        let file = write_temp(".json", r#"{"workers": 3, "costs": false}"#);
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.workers, Some(3));
        assert!(!cfg.costs);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".ini", "workers = 1");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat(_)));
    }
}