use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use log::{error, info};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Environment variable (or `.env` entry) that overrides `database_url`.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Runtime settings shared by the whole process
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
}

impl Settings {
    /// Loads config.json, falling back to defaults, then applies environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_config();

        if let Ok(url) = env::var(DATABASE_URL_VAR) {
            info!("Using database url from {}", DATABASE_URL_VAR);
            config.database_url = url;
        }

        Settings { config }
    }

    fn load_config() -> Config {
        let config_path = assets_dir().join("config.json");

        fs::read_to_string(&config_path)
            .and_then(|content| serde_json::from_str(&content).map_err(Into::into))
            .unwrap_or_else(|err| {
                error!(
                    "Failed to load {}: {}. Using default config.",
                    config_path.display(),
                    err
                );
                Config::default()
            })
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub max_page_size: u64,
    pub default_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        let db_path = exe_dir().join("photo_catalog.db");

        Self {
            database_url: format!("sqlite://{}?mode=rwc", db_path.to_string_lossy()),
            max_page_size: 50,
            default_page_size: 30,
        }
    }
}

/// Directory holding the running executable, or `.` when it can't be determined.
pub fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `src/config` while developing, `<exe dir>/config` in release builds.
pub fn assets_dir() -> PathBuf {
    if cfg!(debug_assertions) {
        PathBuf::from("./src/config/")
    } else {
        exe_dir().join("config")
    }
}

// ===================================
//         GLOBAL CONFIG SINGLETON
// ===================================

static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::load()));

/// Gets a read-only lock on the global Settings
pub fn get_settings() -> RwLockReadGuard<'static, Settings> {
    SETTINGS
        .read()
        .expect("Failed to acquire read lock on SETTINGS")
}
