//! Configuration loader
//!
//! Loads [`HotjarConfig`] from environment variables or a file.
//!
//! ## Loading Strategy
//! 1. Environment variables, if the credentials are present there
//! 2. Otherwise a JSON or TOML file (detected by extension)
//!
//! ## Environment Variables
//! - `HOTJAR_CLIENT_ID`, `HOTJAR_CLIENT_SECRET`: required
//! - `HOTJAR_BASE_URL`: API host (default `https://api.hotjar.io`)
//! - `HOTJAR_TIMEOUT_SECS`: request timeout in seconds
//! - `HOTJAR_USER_AGENT`: `User-Agent` header
//! - `HOTJAR_MAX_PAGES`: page cap for paginated calls
//! - `HOTJAR_LOG_LEVEL`: tracing filter used when `RUST_LOG` is unset
//! - `HOTJAR_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! `hotjar.toml`, `hotjar.json`, `config.toml`, `config.json` in the current
//! directory, then the same names in the parent directory.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use hotjar_domain::{ApiConfig, Credentials, HotjarConfig, HotjarError, LoggingConfig, Result};

const CONFIG_FILE_NAMES: &[&str] = &["hotjar.toml", "hotjar.json", "config.toml", "config.json"];

/// Load configuration, environment first and file second.
///
/// # Errors
/// `HotjarError::Config` if neither source yields a valid configuration.
pub fn load() -> Result<HotjarConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `HOTJAR_*` environment variables.
///
/// # Errors
/// `HotjarError::Config` if the credentials are missing or a value does not
/// parse.
pub fn load_from_env() -> Result<HotjarConfig> {
    config_from_vars(|key| std::env::var(key).ok())
}

/// Load configuration from a file, probing the standard locations when
/// `path` is `None`.
///
/// # Errors
/// `HotjarError::Config` if the file is missing, unreadable or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<HotjarConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HotjarError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HotjarError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HotjarError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// First existing config file in the current directory or its parent.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_in(&cwd)
}

fn probe_in(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).collect();
    if let Some(parent) = dir.parent() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| parent.join(name)));
    }
    candidates.into_iter().find(|path| path.is_file())
}

fn parse_config(contents: &str, path: &Path) -> Result<HotjarConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HotjarError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HotjarError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(HotjarError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn config_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<HotjarConfig> {
    let required = |key: &str| {
        lookup(key).filter(|value| !value.trim().is_empty()).ok_or_else(|| {
            HotjarError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let credentials =
        Credentials::new(required("HOTJAR_CLIENT_ID")?, required("HOTJAR_CLIENT_SECRET")?);

    let mut api = ApiConfig::default();
    if let Some(base_url) = lookup("HOTJAR_BASE_URL") {
        api.base_url = base_url;
    }
    if let Some(timeout) = parse_var(&lookup, "HOTJAR_TIMEOUT_SECS")? {
        api.timeout_secs = timeout;
    }
    if let Some(user_agent) = lookup("HOTJAR_USER_AGENT") {
        api.user_agent = user_agent;
    }
    api.max_pages = parse_var(&lookup, "HOTJAR_MAX_PAGES")?;

    let mut logging = LoggingConfig::default();
    if let Some(level) = lookup("HOTJAR_LOG_LEVEL") {
        logging.level = level;
    }
    logging.json = lookup("HOTJAR_LOG_JSON").map_or(false, |value| parse_bool(&value));

    Ok(HotjarConfig { credentials, api, logging })
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| HotjarError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
