pub mod app_config;
pub mod config;
pub mod shop;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use shop::{BusinessType, NormalizedShop, COUNTRY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid business type: {0}")]
    InvalidBusinessType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
