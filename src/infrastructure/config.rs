//! Application configuration loading and validation.
//!
//! Configuration is read from an optional TOML file; `OPSOLVE_HOST`,
//! `OPSOLVE_PORT` and `OPSOLVE_SOLVER` override individual values.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

use super::logging::LoggingConfig;
use crate::domain::{SolverBackend, SolverConfig};

/// Configuration-related errors with structured variants.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverSettings {
    /// `auto`, `highs` or `coin_cbc`
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Forward the solver's own log to stdout
    #[serde(default)]
    pub verbose: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            verbose: false,
        }
    }
}

fn default_backend() -> String {
    "auto".to_string()
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `OPSOLVE_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("OPSOLVE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("OPSOLVE_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "OPSOLVE_PORT",
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(backend) = lookup("OPSOLVE_SOLVER") {
            self.solver.backend = backend;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host",
                reason: "cannot be empty".into(),
            });
        }
        self.solver_config()?;
        Ok(())
    }

    pub fn solver_config(&self) -> Result<SolverConfig, ConfigError> {
        let backend = self
            .solver
            .backend
            .parse::<SolverBackend>()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "solver.backend",
                reason,
            })?;
        Ok(SolverConfig {
            backend,
            verbose: self.solver.verbose,
        })
    }

    pub fn address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.host",
                reason: e.to_string(),
            })
    }
}
