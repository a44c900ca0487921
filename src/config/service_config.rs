use crate::core::partition::RandomSource;
use crate::utils::error::{Result, ShuffleError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_socket_addr,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://shuffle-api:8080";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub shuffle: ShuffleConfig,
    pub restaurants: Option<RestaurantConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
    pub validate_at_edge: Option<bool>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_seconds: None,
            validate_at_edge: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Fixed seed for every request. Only meant for reproducible runs.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantConfig {
    pub scraper_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl ServiceConfig {
    /// Load from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML, substituting `${VAR}` placeholders from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShuffleError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// File if given, defaults otherwise, then environment overrides on top.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShuffleError::Config {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Apply `SHUFFLE_*` style overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SHUFFLE_API_URL") {
            self.backend.url = url;
        }
        if let Some(bind) = lookup("SHUFFLE_BIND") {
            self.server.bind = bind;
        }
        if let Some(seed) = lookup("SHUFFLE_SEED") {
            self.shuffle.seed = Some(parse_env_number("SHUFFLE_SEED", &seed)?);
        }
        if let Some(timeout) = lookup("SHUFFLE_BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_seconds =
                Some(parse_env_number("SHUFFLE_BACKEND_TIMEOUT_SECS", &timeout)?);
        }
        if let Some(scraper_url) = lookup("RESTAURANT_SCRAPER_URL") {
            match self.restaurants.as_mut() {
                Some(restaurants) => restaurants.scraper_url = scraper_url,
                None => {
                    self.restaurants = Some(RestaurantConfig {
                        scraper_url,
                        timeout_seconds: None,
                    })
                }
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("server.bind", &self.server.bind)
    }

    pub fn backend_url(&self) -> &str {
        self.backend.url.trim_end_matches('/')
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(
            self.backend
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn validate_at_edge(&self) -> bool {
        self.backend.validate_at_edge.unwrap_or(true)
    }

    pub fn random_source(&self) -> RandomSource {
        RandomSource::from_seed(self.shuffle.seed)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format.unwrap_or_default()
    }
}

impl RestaurantConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

fn parse_env_number(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| ShuffleError::InvalidConfigValue {
            field: name.to_string(),
            value: value.to_string(),
            reason: format!("expected a non-negative integer: {}", e),
        })
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        validate_url("backend.url", &self.backend.url)?;

        if let Some(timeout) = self.backend.timeout_seconds {
            validate_positive_number("backend.timeout_seconds", timeout, 1)?;
            validate_range("backend.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        if let Some(restaurants) = &self.restaurants {
            validate_url("restaurants.scraper_url", &restaurants.scraper_url)?;
            if let Some(timeout) = restaurants.timeout_seconds {
                validate_range("restaurants.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
            }
        }

        if let Some(level) = &self.logging.level {
            validate_non_empty_string("logging.level", level)?;
        }

        tracing::debug!("configuration validation passed");
        Ok(())
    }
}
