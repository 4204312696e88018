use anyhow::Error;
use bulletin::LocationProfile;
use clap::Parser;
use meteo_bulletin_core::{
    find_config_file, load_config, ConfigSource, CONFIG_ENV_VAR, CONFIG_FILENAME,
    DEFAULT_API_URL, DEFAULT_LOCALE, DEFAULT_OUTPUT_FILE, DEFAULT_REQUEST_TIMEOUT,
};
use slog::{o, Drain, Level, Logger};
use std::{env, path::PathBuf, time::Duration};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Meteo Bulletin - Fetches forecasts and writes a text weather bulletin"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $METEO_BULLETIN_CONFIG, ./meteo-bulletin.toml,
    /// $XDG_CONFIG_HOME/meteo-bulletin/meteo-bulletin.toml, /etc/meteo-bulletin/meteo-bulletin.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "METEO_BULLETIN_LEVEL")]
    pub level: Option<String>,

    /// File the bulletin is written to (overwritten on every run)
    #[arg(short, long, env = "METEO_BULLETIN_OUTPUT")]
    pub output: Option<String>,

    /// Locale for header dates, e.g. fr_FR or en-US
    #[arg(long, env = "METEO_BULLETIN_LOCALE")]
    pub locale: Option<String>,

    /// Open-Meteo compatible forecast endpoint
    #[arg(short, long, env = "METEO_BULLETIN_API_URL")]
    pub api_url: Option<String>,

    /// HTTP User-Agent header for forecast requests
    #[arg(short, long, env = "METEO_BULLETIN_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long, env = "METEO_BULLETIN_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Do not open the bulletin in the system viewer once written
    #[arg(long, env = "METEO_BULLETIN_NO_OPEN")]
    #[serde(default)]
    pub no_open: bool,

    /// Locations to report on, in bulletin order (config file only)
    #[arg(skip)]
    #[serde(default)]
    pub locations: Vec<LocationProfile>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn output(&self) -> PathBuf {
        PathBuf::from(
            self.output
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
        )
    }

    pub fn locale(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
    }

    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("meteo-bulletin/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    pub fn locations(&self) -> Vec<LocationProfile> {
        if self.locations.is_empty() {
            default_locations()
        } else {
            self.locations.clone()
        }
    }

    /// CLI args override file config (env vars are handled by clap)
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            output: self.output.or(file_config.output),
            locale: self.locale.or(file_config.locale),
            api_url: self.api_url.or(file_config.api_url),
            user_agent: self.user_agent.or(file_config.user_agent),
            timeout: self.timeout.or(file_config.timeout),
            no_open: self.no_open || file_config.no_open,
            locations: file_config.locations,
        }
    }
}

/// Lausanne, Chatel (Haute-Savoie) and Paris
pub fn default_locations() -> Vec<LocationProfile> {
    let location = |name: &str, region: &str, latitude, longitude, altitude: &str, tz: &str| {
        LocationProfile {
            name: name.to_string(),
            region: region.to_string(),
            latitude,
            longitude,
            altitude: altitude.to_string(),
            timezone: tz.to_string(),
        }
    };
    vec![
        location(
            "Lausanne",
            "Suisse, canton de Vaud",
            46.5197,
            6.6323,
            "~500m",
            "Europe/Zurich",
        ),
        location(
            "Chatel",
            "Haute-Savoie, France",
            46.2667,
            6.8417,
            "~1200m (village), ~2200m (sommet pistes)",
            "Europe/Paris",
        ),
        location(
            "Paris",
            "Ile-de-France",
            48.8566,
            2.3522,
            "~35m",
            "Europe/Paris",
        ),
    ]
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Result<(Cli, ConfigSource), Error> {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file(CONFIG_ENV_VAR, CONFIG_FILENAME)
    };

    let file_config: Cli = load_config(&source)?;
    Ok((cli_args.merge(file_config), source))
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = match cli.level.as_ref() {
        Some(level) => parse_level(level),
        None => parse_level(&env::var("RUST_LOG").unwrap_or_default()),
    };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}
