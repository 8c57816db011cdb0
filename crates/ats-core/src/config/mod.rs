use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub search: SearchConfig,
    pub fixtures: FixtureConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ATS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("ATS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("ATS_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("ATS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_limit = match env::var("ATS_SEARCH_MAX_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidMaxLimit { value: raw })?,
            Err(_) => SearchConfig::DEFAULT_MAX_LIMIT,
        };

        let directory = env::var("ATS_FIXTURES_DIR")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            search: SearchConfig { max_limit },
            fixtures: FixtureConfig { directory },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Upper bound applied to every caller supplied limit or page size.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_limit: usize,
}

impl SearchConfig {
    pub const DEFAULT_MAX_LIMIT: usize = 100;
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_limit: Self::DEFAULT_MAX_LIMIT,
        }
    }
}

/// Optional CSV directory used to seed the in-memory store at startup.
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMaxLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "ATS_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "ATS_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMaxLimit { value } => write!(
                f,
                "ATS_SEARCH_MAX_LIMIT must be a positive integer, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidMaxLimit { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
