//! Configuration structs

mod app_config;
mod client_config;

pub use app_config::{
    AppConfig, AppSettings, BoardConfig, ConfigError, CorsConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig,
};
pub use client_config::{ClientConfig, GuardConfig};
