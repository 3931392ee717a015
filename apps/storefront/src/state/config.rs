//! # Store Configuration
//!
//! Configuration loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`NOVATIME_*`)
//! 3. Config file (`storefront.toml`)
//! 4. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "NovaTime"
//! currency_code = "COP"
//! currency_symbol = "$"
//!
//! [auth]
//! latency_ms = 500
//! session_slot = "novatime_user"
//!
//! [database]
//! path = "/var/lib/novatime/novatime.db"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use novatime_core::{Money, SESSION_SLOT_KEY};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "novatime";
const APPLICATION: &str = "storefront";

/// File name of the config inside the platform config dir.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// File name of the database inside the platform data dir.
pub const DATABASE_FILE_NAME: &str = "novatime.db";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No home directory to derive platform paths from.
    #[error("Could not determine the app data directory")]
    NoPlatformDirs,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Storefront identity and currency display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency code (ISO 4217)
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "NovaTime".to_string()
}

fn default_currency_code() -> String {
    "COP".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Mock authentication behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSection {
    /// Artificial delay before login/register resolve.
    /// Default: 500
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Key of the persisted slot holding the logged-in user.
    #[serde(default = "default_session_slot")]
    pub session_slot: String,
}

fn default_latency_ms() -> u64 {
    500
}

fn default_session_slot() -> String {
    SESSION_SLOT_KEY.to_string()
}

impl Default for AuthSection {
    fn default() -> Self {
        AuthSection {
            latency_ms: default_latency_ms(),
            session_slot: default_session_slot(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// Database file. `None` means the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// StoreConfig
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub database: DatabaseSection,
}

impl StoreConfig {
    /// Loads configuration from file and environment.
    ///
    /// An explicit `config_path` must exist. The platform default is
    /// optional: when missing, defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    StoreConfig::default()
                }
                None => StoreConfig::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading store config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(io_err)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.auth.session_slot.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "auth.session_slot must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `NOVATIME_*` overrides read through `lookup`.
    ///
    /// - `NOVATIME_STORE_NAME`: store name
    /// - `NOVATIME_AUTH_LATENCY_MS`: login/register delay
    /// - `NOVATIME_DB_PATH`: database file
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("NOVATIME_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(raw) = lookup("NOVATIME_AUTH_LATENCY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => self.auth.latency_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid NOVATIME_AUTH_LATENCY_MS"),
            }
        }

        if let Some(path) = lookup("NOVATIME_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the database file: configured path or platform data dir.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or(ConfigError::NoPlatformDirs)
    }

    /// Login/register artificial latency.
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth.latency_ms)
    }

    /// Formats a price with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_price(Money::from_amount(189_900)), "$189.900");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        amount
            .to_string()
            .replacen('$', &self.store.currency_symbol, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store.name, "NovaTime");
        assert_eq!(config.store.currency_code, "COP");
        assert_eq!(config.auth_latency(), Duration::from_millis(500));
        assert_eq!(config.auth.session_slot, "novatime_user");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: StoreConfig = toml::from_str(
            r#"
            [auth]
            latency_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.latency_ms, 0);
        assert_eq!(config.auth.session_slot, "novatime_user");
        assert_eq!(config.store.name, "NovaTime");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("NOVATIME_STORE_NAME", "NovaTime Outlet"),
            ("NOVATIME_AUTH_LATENCY_MS", "25"),
            ("NOVATIME_DB_PATH", "/tmp/outlet.db"),
        ]
        .into_iter()
        .collect();

        let mut config = StoreConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "NovaTime Outlet");
        assert_eq!(config.auth.latency_ms, 25);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/outlet.db")
        );
    }

    #[test]
    fn test_invalid_latency_override_is_ignored() {
        let mut config = StoreConfig::default();
        config.apply_overrides(|key| {
            (key == "NOVATIME_AUTH_LATENCY_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.auth.latency_ms, 500);
    }

    #[test]
    fn test_validate_rejects_empty_slot() {
        let mut config = StoreConfig::default();
        config.auth.session_slot = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = StoreConfig::default();
        config.store.name = "NovaTime Centro".into();
        config.database.path = Some(dir.path().join("novatime.db"));
        config.save(&path).unwrap();

        assert_eq!(StoreConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StoreConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[store\nname = ").unwrap();
        assert!(matches!(
            StoreConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_format_price() {
        let mut config = StoreConfig::default();
        assert_eq!(config.format_price(Money::from_amount(189_900)), "$189.900");
        config.store.currency_symbol = "COP ".into();
        assert_eq!(config.format_price(Money::from_amount(-1_500)), "-COP 1.500");
    }
}
