//! Meteo Bulletin Core Library
//!
//! Shared utilities for the bulletin command line:
//! - Configuration loading (XDG-compliant)
//! - Output file helpers
//! - Application defaults

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{ensure_parent_dir, write_text_file};

/// Application name used for XDG paths
pub const APP_NAME: &str = "meteo-bulletin";

/// Config file searched for in the standard locations
pub const CONFIG_FILENAME: &str = "meteo-bulletin.toml";

/// Environment variable holding an explicit config file path
pub const CONFIG_ENV_VAR: &str = "METEO_BULLETIN_CONFIG";

/// Where the rendered bulletin is written when nothing else is configured
pub const DEFAULT_OUTPUT_FILE: &str = "meteo_bulletin.txt";

/// Locale used for dates in the bulletin header
pub const DEFAULT_LOCALE: &str = "fr_FR";

/// Open-Meteo forecast endpoint (free, no API key)
pub const DEFAULT_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Per-request timeout against the forecast API, in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 15;
