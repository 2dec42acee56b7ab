pub mod app_config;
pub mod config;
pub mod products;
pub mod sections;
pub mod store_count;

pub use app_config::{AppConfig, Environment, OutputFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ProductRecord, SizeGroup, VariantRecord, VariantsBySize, DEFAULT_SIZE_GROUP};
pub use sections::TagNode;
pub use store_count::StoreCounts;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
