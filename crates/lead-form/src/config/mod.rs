use crate::form::Locale;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_LEAD_ENDPOINT: &str = "https://crm.citysresidences.com/api/lead.php";

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
    pub lead: LeadEndpointConfig,
    pub form: FormConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let endpoint =
            env::var("LEAD_ENDPOINT_URL").unwrap_or_else(|_| DEFAULT_LEAD_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint { value: endpoint });
        }
        let timeout_secs = env::var("LEAD_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let locale_tag = env::var("FORM_DEFAULT_LOCALE").unwrap_or_else(|_| "tr".to_string());
        let default_locale = Locale::parse(&locale_tag)
            .ok_or(ConfigError::UnsupportedLocale { value: locale_tag })?;
        let message_ttl_secs = env::var("FORM_MESSAGE_TTL_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidMessageTtl)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            lead: LeadEndpointConfig {
                url: endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
            form: FormConfig {
                default_locale,
                message_ttl_secs,
            },
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

/// Where completed contact forms are delivered.
#[derive(Debug, Clone)]
pub struct LeadEndpointConfig {
    pub url: String,
    pub timeout: Duration,
}

/// Behavior of the form engine itself.
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub default_locale: Locale,
    pub message_ttl_secs: u32,
}

impl FormConfig {
    pub fn message_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.message_ttl_secs))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidEndpoint { value: String },
    InvalidTimeout,
    UnsupportedLocale { value: String },
    InvalidMessageTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEndpoint { value } => {
                write!(f, "LEAD_ENDPOINT_URL must be an http(s) URL, got '{value}'")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "LEAD_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::UnsupportedLocale { value } => {
                write!(f, "FORM_DEFAULT_LOCALE '{value}' is not one of: tr, en")
            }
            ConfigError::InvalidMessageTtl => {
                write!(f, "FORM_MESSAGE_TTL_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "LEAD_ENDPOINT_URL",
            "LEAD_TIMEOUT_SECS",
            "FORM_DEFAULT_LOCALE",
            "FORM_MESSAGE_TTL_SECS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.lead.url, DEFAULT_LEAD_ENDPOINT);
        assert_eq!(config.lead.timeout, Duration::from_secs(10));
        assert_eq!(config.form.default_locale, Locale::Tr);
        assert_eq!(config.form.message_ttl(), chrono::Duration::seconds(5));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_unknown_default_locale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("FORM_DEFAULT_LOCALE", "de");
        let err = AppConfig::load().expect_err("unsupported locale rejected");
        assert!(matches!(err, ConfigError::UnsupportedLocale { .. }));
        reset_env();
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_ENDPOINT_URL", "ftp://crm.example.com/lead");
        let err = AppConfig::load().expect_err("non-http endpoint rejected");
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        reset_env();
    }
}
