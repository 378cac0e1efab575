//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `REVIEW_*` environment variables. Model settings
//! live in [`ModelConfig`](crate::models::ModelConfig).

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REVIEW_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Lexicon JSON file replacing the built-in lists.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            lexicon_path: None,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "REVIEW_PORT";
    const ENV_BIND_ADDR: &'static str = "REVIEW_BIND_ADDR";
    const ENV_LEXICON_PATH: &'static str = "REVIEW_LEXICON_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let lexicon_path = Self::parse_optional_path_from_env(Self::ENV_LEXICON_PATH);

        Ok(Self {
            port,
            bind_addr,
            lexicon_path,
        })
    }

    /// Validates paths (does not read them).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.lexicon_path {
            if !path.exists() {
                return Err(ConfigError::LexiconNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::LexiconNotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
