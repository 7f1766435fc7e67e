use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crate::config_file::{self, ConfigFile};
use crate::openai::DEFAULT_BASE_URL;
use crate::prompt::DEFAULT_MODEL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_MB: u32 = 16;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "OPENAI_API_KEY environment variable is not set. Please create a .env file with your API key."
    )]
    MissingApiKey,
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Resolved, immutable service configuration.
///
/// Built once at startup and handed to the gateway and the HTTP layer.
#[derive(Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub host: IpAddr,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl ServiceConfig {
    /// Resolve from the process environment and the config file cascade.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = config_file::load_config();
        Self::resolve(&file, |name| std::env::var(name).ok())
    }

    /// Resolve configuration: env vars > config file > defaults.
    ///
    /// `env` is a lookup function so resolution can be tested without
    /// touching the process environment.
    pub fn resolve<F>(file: &ConfigFile, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env("OPENAI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let server = file.server.clone().unwrap_or_default();
        let model_cfg = file.model.clone().unwrap_or_default();

        let model = env("OPENAI_MODEL")
            .or(model_cfg.name)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = env("OPENAI_BASE_URL")
            .or(model_cfg.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = model_cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let host_str = env("HOST")
            .or(server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_str.parse().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: host_str.clone(),
        })?;

        let port = match env("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => server.port.unwrap_or(DEFAULT_PORT),
        };

        let max_upload_mb = server.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            host,
            port,
            max_upload_bytes: max_upload_mb as usize * 1024 * 1024,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
