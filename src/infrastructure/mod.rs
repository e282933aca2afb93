// Infrastructure: configuration, logging and the HTTP server

pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use logging::LoggingConfig;
pub use server::{create_router, start_server, ServerConfig};
