use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::theme::Theme;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON dataset file. The built-in dataset is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Theme for newly created sessions.
    pub default_theme: Theme,
    /// External application form link, passed through to views untouched.
    pub apply_url: Option<String>,
    /// Sessions with no applied event for this long are dropped.
    pub session_idle_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            catalog_path: None,
            default_theme: Theme::Light,
            apply_url: None,
            session_idle_minutes: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Ok(Config {
            port: match get("PORT") {
                Some(p) => p
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            default_theme: match get("DEFAULT_THEME") {
                Some(t) => t
                    .parse::<Theme>()
                    .map_err(|e| anyhow!(e))
                    .context("DEFAULT_THEME is invalid")?,
                None => defaults.default_theme,
            },
            apply_url: get("APPLY_URL"),
            session_idle_minutes: match get("SESSION_IDLE_MINUTES") {
                Some(m) => m
                    .parse::<u32>()
                    .ok()
                    .filter(|m| *m > 0)
                    .ok_or_else(|| anyhow!("SESSION_IDLE_MINUTES must be a positive integer"))?,
                None => defaults.session_idle_minutes,
            },
        })
    }
}
