//! Layered configuration.
//!
//! Settings are read from an optional config file, then overridden by
//! `SITESCOPE_*` environment variables. Command-line flags are applied on top
//! by the binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::api::{HttpGateway, DEFAULT_BASE_URL};
use crate::data::duration::parse_duration;
use crate::view::AnalysisPolicy;

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "SITESCOPE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the analysis service.
    pub api_base_url: String,
    /// Time between health polls (e.g. "60s").
    pub health_interval: String,
    /// Optional per-request timeout (e.g. "30s").
    pub request_timeout: Option<String>,
    pub analysis_policy: AnalysisPolicy,
    /// Where to write logs while the TUI is running.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            health_interval: "60s".to_string(),
            request_timeout: None,
            analysis_policy: AnalysisPolicy::default(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], but reads variables from `env` instead of the
    /// process environment when it is provided.
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let environment = Environment::with_prefix(ENV_PREFIX).source(env);
        let settings = builder
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(settings)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn health_interval(&self) -> Result<Duration> {
        parse_duration(&self.health_interval)
            .with_context(|| format!("Invalid health_interval: {}", self.health_interval))
    }

    pub fn request_timeout(&self) -> Result<Option<Duration>> {
        self.request_timeout
            .as_deref()
            .map(|raw| {
                parse_duration(raw).with_context(|| format!("Invalid request_timeout: {}", raw))
            })
            .transpose()
    }

    /// Build an HTTP gateway from these settings.
    pub fn gateway(&self) -> Result<HttpGateway> {
        let gateway = HttpGateway::builder()
            .base_url(self.base_url())
            .timeout(self.request_timeout()?)
            .build()?;
        Ok(gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, env(&[])).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_url(), "http://localhost:8000");
        assert_eq!(settings.health_interval().unwrap(), Duration::from_secs(60));
        assert_eq!(settings.request_timeout().unwrap(), None);
        assert_eq!(settings.analysis_policy, AnalysisPolicy::LastWriteWins);
    }

    #[test]
    fn test_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitescope.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
api_base_url = "https://analyzer.internal/"
health_interval = "30s"
request_timeout = "5s"
analysis_policy = "latest-only"
log_file = "/tmp/sitescope.log"
"#
        )
        .unwrap();

        let settings = Settings::load_with_env(Some(&path), env(&[])).unwrap();

        assert_eq!(settings.base_url(), "https://analyzer.internal");
        assert_eq!(settings.health_interval().unwrap(), Duration::from_secs(30));
        assert_eq!(
            settings.request_timeout().unwrap(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(settings.analysis_policy, AnalysisPolicy::LatestOnly);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/sitescope.log")));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitescope.toml");
        std::fs::write(&path, "api_base_url = \"http://from-file:8000\"\n").unwrap();

        let settings = Settings::load_with_env(
            Some(&path),
            env(&[
                ("SITESCOPE_API_BASE_URL", "http://from-env:9000"),
                ("SITESCOPE_HEALTH_INTERVAL", "500ms"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.base_url(), "http://from-env:9000");
        assert_eq!(
            settings.health_interval().unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_invalid_interval_is_reported() {
        let settings = Settings {
            health_interval: "soon".to_string(),
            ..Default::default()
        };

        let err = settings.health_interval().unwrap_err();
        assert!(err.to_string().contains("health_interval"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(Settings::load_with_env(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn test_gateway_uses_trimmed_base_url() {
        let settings = Settings {
            api_base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };

        let gateway = settings.gateway().unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:9000");
    }
}
