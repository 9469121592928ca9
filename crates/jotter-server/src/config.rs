// ABOUTME: Configuration loading and validation for the jotter server.
// ABOUTME: Reads environment variables and refuses unsafe bind/key combinations.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// The out-of-the-box key. Only acceptable on a loopback bind.
pub const DEFAULT_API_KEY: &str = "secret";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JOTTER_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error(
        "bind address is not loopback but JOTTER_API_KEY is still the default; refusing to start"
    )]
    RemoteWithDefaultKey,
}

/// Server configuration from environment variables, optionally overridden
/// by CLI flags.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
    pub api_key: String,
}

impl ServerConfig {
    /// Assemble a configuration, enforcing the remote-bind safety check.
    pub fn new(
        data_dir: PathBuf,
        bind: SocketAddr,
        api_key: String,
    ) -> Result<Self, ConfigError> {
        if !bind.ip().is_loopback() && api_key == DEFAULT_API_KEY {
            return Err(ConfigError::RemoteWithDefaultKey);
        }
        Ok(Self {
            data_dir,
            bind,
            api_key,
        })
    }

    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - JOTTER_DATA_DIR: directory holding notes.json and tasks.json (default: ./data)
    /// - JOTTER_BIND: socket address to bind (default: 127.0.0.1:8000)
    /// - JOTTER_API_KEY: static key expected in the X-API-Key header (default: "secret")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_overrides(None, None, None)
    }

    /// Like `from_env`, but CLI-provided values take precedence over the
    /// environment. The env bind string is only parsed when no override is
    /// given.
    pub fn from_env_with_overrides(
        data_dir: Option<PathBuf>,
        bind: Option<SocketAddr>,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = data_dir.unwrap_or_else(|| {
            std::env::var("JOTTER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data"))
        });

        let bind = match bind {
            Some(addr) => addr,
            None => {
                let bind_str =
                    std::env::var("JOTTER_BIND").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
                bind_str
                    .parse()
                    .map_err(|_| ConfigError::InvalidBind(bind_str))?
            }
        };

        let api_key = api_key
            .or_else(|| std::env::var("JOTTER_API_KEY").ok().filter(|k| !k.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        Self::new(data_dir, bind, api_key)
    }
}
