//! Builds an `AppConfig` from environment variables.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.
//! Every value is read exactly once at startup; nothing in the request path
//! touches the environment.

use std::sync::OnceLock;

use secrecy::SecretString;
use tracing::info;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_KLAVIYO_URL: &str = "https://a.klaviyo.com";

// ###################################
// ->   RESULT & ERROR
// ###################################

pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("failed to parse PORT from: '{0}'")]
    InvalidPort(String),
}

// ###################################
// ->   STRUCTS
// ###################################

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub klaviyo_config: KlaviyoConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Clone, Debug)]
pub struct KlaviyoConfig {
    pub url: String,
    pub api_key: SecretString,
    pub covered_list: String,
    pub not_covered_list: String,
}

// ###################################
// ->   IMPLs
// ###################################

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<12} - Initializing the configuration",
            "get_or_init_config"
        );
        AppConfig::from_env().unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The lookup closure stands in for `std::env::var` so the parsing logic
    /// stays testable without mutating process state.
    fn from_lookup(get: impl Fn(&'static str) -> Option<String>) -> ConfigResult<Self> {
        let app_port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingEnvVar(key));

        let klaviyo_config = KlaviyoConfig {
            url: get("KLAVIYO_BASE_URL").unwrap_or_else(|| DEFAULT_KLAVIYO_URL.to_string()),
            api_key: SecretString::from(require("KLAVIYO_API_KEY")?),
            covered_list: require("KLAVIYO_COVERED_LIST")?,
            not_covered_list: require("KLAVIYO_NOT_COVERED_LIST")?,
        };

        Ok(AppConfig {
            net_config: NetConfig {
                host: [0, 0, 0, 0],
                app_port,
            },
            klaviyo_config,
        })
    }
}

// ###################################
// ->   TESTS
// ###################################
