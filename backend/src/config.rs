//! Configuration for the brigade backend.
//!
//! Loaded with figment from a TOML file, `BRIGADE_`-prefixed environment
//! variables, and defaults. Also owns the layout of the data directory so
//! every component derives its file paths from one place.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory.
const CONFIG_FILE_NAME: &str = "brigade.toml";

/// Crew list as uploaded by an admin (column `name` required).
pub const CREW_FILE_NAME: &str = "crew_list.csv";

/// Equipment list (columns `appliance` and `equipment_name` required).
pub const EQUIPMENT_FILE_NAME: &str = "equipment_list.csv";

/// Maintenance task list (columns `appliance` and `task` required).
pub const MAINTENANCE_FILE_NAME: &str = "maintenance_tasks.csv";

/// Derived credentials table, rewritten on every crew replace.
pub const USERS_FILE_NAME: &str = "users.csv";

/// Admin usernames, one per line.
pub const ADMINS_FILE_NAME: &str = "admins.txt";

/// Application configuration.
///
/// Loaded from (in order of precedence, highest first):
/// 1. Environment variables prefixed with `BRIGADE_`
/// 2. `brigade.toml` in the working directory
/// 3. Default values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Directory holding the roster CSVs, the admin list, and the
    /// submission logs.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config file path.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("BRIGADE_"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "host must not be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(Error::ConfigValidation {
                message: "port must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn crew_csv(&self) -> PathBuf {
        self.data_dir.join(CREW_FILE_NAME)
    }

    pub fn equipment_csv(&self) -> PathBuf {
        self.data_dir.join(EQUIPMENT_FILE_NAME)
    }

    pub fn maintenance_csv(&self) -> PathBuf {
        self.data_dir.join(MAINTENANCE_FILE_NAME)
    }

    pub fn users_csv(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE_NAME)
    }

    pub fn admins_file(&self) -> PathBuf {
        self.data_dir.join(ADMINS_FILE_NAME)
    }

    /// Root directory of the per-category submission logs.
    pub fn submissions_dir(&self) -> PathBuf {
        self.data_dir.join("submissions")
    }
}
