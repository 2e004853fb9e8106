//! Runtime configuration.
//!
//! Built from defaults, then overridden by `MCP_`-prefixed environment
//! variables (a `.env` file is loaded first when present).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Group namespaces composed when `MCP_GROUPS` is unset.
pub const DEFAULT_GROUPS: &[&str] = &[
    "CorporateResources",
    "CorporateTools",
    "CorporatePrompts",
    "Weather",
];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Which capability groups to compose, and in what order.
    pub capabilities: CapabilitiesConfig,

    /// Forecast API client settings.
    pub weather: WeatherConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitiesConfig {
    /// Group namespaces in composition order.
    pub groups: Vec<String>,
}

/// Settings for the outbound forecast client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL; `/forecast` is appended.
    pub api_base: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            groups: DEFAULT_GROUPS.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.open-meteo.com/v1".to_string(),
            timeout_secs: 30,
            user_agent: "weather-app/1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "Corporate Assistant".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            capabilities: CapabilitiesConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Group names are taken as given here; unknown names are rejected when
    /// the groups are built.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(groups) = std::env::var("MCP_GROUPS") {
            config.capabilities.groups = parse_list(&groups);
            debug!("Capability groups from environment: {:?}", config.capabilities.groups);
        }

        if let Ok(api_base) = std::env::var("MCP_WEATHER_API_BASE") {
            config.weather.api_base = api_base.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("MCP_WEATHER_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.weather.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring MCP_WEATHER_TIMEOUT_SECS={:?}, keeping {}s",
                    timeout, config.weather.timeout_secs
                ),
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_WEATHER_USER_AGENT") {
            config.weather.user_agent = user_agent;
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MCP_SERVER_NAME",
        "MCP_GROUPS",
        "MCP_WEATHER_API_BASE",
        "MCP_WEATHER_TIMEOUT_SECS",
        "MCP_WEATHER_USER_AGENT",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "Corporate Assistant");
        assert_eq!(
            config.capabilities.groups,
            vec!["CorporateResources", "CorporateTools", "CorporatePrompts", "Weather"]
        );
        assert_eq!(config.weather.api_base, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_secs, 30);
    }

    #[test]
    fn test_groups_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_GROUPS", " weather , CorporateTools,,");
        }
        let config = Config::from_env();
        assert_eq!(config.capabilities.groups, vec!["weather", "CorporateTools"]);
        clear_env();
    }

    #[test]
    fn test_weather_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_WEATHER_API_BASE", "http://localhost:9000/v1/");
            std::env::set_var("MCP_WEATHER_TIMEOUT_SECS", "5");
            std::env::set_var("MCP_WEATHER_USER_AGENT", "tests/0.1");
        }
        let config = Config::from_env();
        assert_eq!(config.weather.api_base, "http://localhost:9000/v1");
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.weather.user_agent, "tests/0.1");
        clear_env();
    }

    #[test]
    fn test_bad_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_WEATHER_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.weather.timeout_secs, 30);
        clear_env();
    }
}
