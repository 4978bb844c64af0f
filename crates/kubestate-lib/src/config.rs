//! Settings for reaching the exporter
//!
//! Layered with the `config` crate: built-in defaults, an optional settings
//! file, then `KUBESTATE_*` environment variables. CLI flags are applied on
//! top by the binary.

use crate::error::{KubestateError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where kube-state-metrics is expected to live
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExporterSettings {
    #[serde(default = "default_exporter_namespace")]
    pub namespace: String,

    #[serde(default = "default_exporter_service")]
    pub service: String,

    /// Health endpoint, relative to the service proxy
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Metrics endpoint, relative to the service proxy
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ExporterSettings {
    fn default() -> Self {
        Self {
            namespace: default_exporter_namespace(),
            service: default_exporter_service(),
            health_path: default_health_path(),
            metrics_path: default_metrics_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Path to the kubeconfig, `~` allowed
    #[serde(default = "default_kubeconfig")]
    pub kubeconfig: String,

    /// Upper bound for each call to the cluster API
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub exporter: ExporterSettings,
}

fn default_kubeconfig() -> String {
    "~/.kube/config".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_exporter_namespace() -> String {
    "kube-system".to_string()
}

fn default_exporter_service() -> String {
    "kube-state-metrics".to_string()
}

fn default_health_path() -> String {
    "healthz".to_string()
}

fn default_metrics_path() -> String {
    "metrics".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kubeconfig: default_kubeconfig(),
            request_timeout_secs: default_request_timeout(),
            log_format: LogFormat::default(),
            exporter: ExporterSettings::default(),
        }
    }
}

impl Settings {
    /// Load from the user settings file (if any) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Self::settings_path().as_deref())
    }

    /// Load from an explicit settings file stem; `None` means environment only
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                ::config::Environment::with_prefix("KUBESTATE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| KubestateError::config_with("failed to read settings", e))?;

        let settings: Self = config
            .try_deserialize()
            .map_err(|e| KubestateError::config_with("invalid settings", e))?;

        if settings.request_timeout_secs == 0 {
            return Err(KubestateError::config(
                "request_timeout_secs must be greater than zero",
            ));
        }

        Ok(settings)
    }

    /// Settings file stem, `$XDG_CONFIG_HOME/kubestate/config` (any supported extension)
    fn settings_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("kubestate").join("config"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Kubeconfig location with a leading `~` expanded
    pub fn kubeconfig_path(&self) -> Result<PathBuf> {
        expand_home(&self.kubeconfig)
    }
}

/// Expand a leading `~` to the current user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" || path.starts_with("~/") {
        let home = dirs_next::home_dir()
            .ok_or_else(|| KubestateError::config("could not determine home directory"))?;
        let rest = path.trim_start_matches('~').trim_start_matches('/');
        return Ok(if rest.is_empty() { home } else { home.join(rest) });
    }

    Ok(PathBuf::from(path))
}
