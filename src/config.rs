// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::routes::DashboardView;
use crate::session::SessionStore;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_api_url() -> String {
    "http://localhost:4000".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Base URL of the TaskFlow REST backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub allow_insecure_certs: bool,
    /// Dashboard sub-view shown after sign-in.
    #[serde(default)]
    pub default_view: DashboardView,
    #[serde(default)]
    pub hide_completed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            allow_insecure_certs: false,
            default_view: DashboardView::default(),
            hide_completed: false,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers (onboarding) can behave accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Helper to detect whether an anyhow::Error indicates that the config
    /// file was missing, so first-run onboarding is not confused with a
    /// syntax or permission error.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Walk the error chain and look for an underlying IO NotFound.
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        SessionStore::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            SessionStore::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn missing_config_is_distinguishable() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let ctx = TestContext::new();
        let mut cfg = Config::default();
        cfg.api_url = "https://tasks.example.com".to_string();
        cfg.default_view = DashboardView::List;
        cfg.save(&ctx).unwrap();

        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded.api_url, "https://tasks.example.com");
        assert_eq!(loaded.default_view, DashboardView::List);
        assert!(!loaded.hide_completed);
    }

    #[test]
    fn parse_error_is_not_treated_as_missing() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        std::fs::write(&path, "api_url = [broken").unwrap();
        let err = Config::load(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
    }
}
