pub mod app_config;
pub mod cache;
pub mod config;
pub mod display;
pub mod feature;
pub mod record;
pub mod view;

pub use app_config::AppConfig;
pub use cache::{CacheError, FeatureCache};
pub use config::{load_app_config, load_app_config_from_env};
pub use feature::{project, Coordinates, Feature, FeatureCollection, FeatureProperties, Geometry};
pub use record::{record_key, Record, RecordStore, Reference};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
