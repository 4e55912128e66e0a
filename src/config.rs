//! Runtime configuration, read from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DATA_ENV_VAR: &str = "SALES_DASHBOARD_DATA";
pub const SURFACE_ENV_VAR: &str = "SALES_DASHBOARD_SURFACE";
pub const EXPORT_DIR_ENV_VAR: &str = "SALES_DASHBOARD_EXPORT_DIR";

pub const DEFAULT_DATA_PATH: &str = "data/Superstore.csv";
pub const DEFAULT_EXPORT_DIR: &str = "exports";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown display surface '{0}' (expected 'window' or 'terminal')")]
    InvalidSurface(String),
}

/// Where the dashboard is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    /// Native window with interactive charts.
    #[default]
    Window,
    /// Markdown on stdout.
    Terminal,
}

impl FromStr for SurfaceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "window" | "gui" => Ok(SurfaceKind::Window),
            "terminal" | "text" | "stdout" => Ok(SurfaceKind::Terminal),
            other => Err(ConfigError::InvalidSurface(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub surface: SurfaceKind,
    /// Default folder offered when exporting chart images.
    pub export_dir: PathBuf,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            surface: SurfaceKind::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            export_width: 1200,
            export_height: 800,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `SALES_DASHBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = set(DATA_ENV_VAR) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(surface) = set(SURFACE_ENV_VAR) {
            config.surface = surface.parse()?;
        }
        if let Some(dir) = set(EXPORT_DIR_ENV_VAR) {
            config.export_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("data/Superstore.csv"));
        assert_eq!(config.surface, SurfaceKind::Window);
    }

    #[test]
    fn env_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_ENV_VAR, "/tmp/orders.csv"),
            (SURFACE_ENV_VAR, " Terminal "),
            (EXPORT_DIR_ENV_VAR, "out"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/orders.csv"));
        assert_eq!(config.surface, SurfaceKind::Terminal);
        assert_eq!(config.export_dir, PathBuf::from("out"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = DashboardConfig::from_lookup(lookup(&[(DATA_ENV_VAR, "  ")])).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn unknown_surface_is_rejected() {
        let err = DashboardConfig::from_lookup(lookup(&[(SURFACE_ENV_VAR, "browser")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSurface("browser".into()));
    }
}
