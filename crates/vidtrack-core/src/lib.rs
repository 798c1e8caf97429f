pub mod app_config;
pub mod clock;
pub mod config;
pub mod record;
pub mod state;

pub use app_config::AppConfig;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{MetricFields, MetricValue, RawVideo};
pub use state::{AggregateState, MetricsSnapshot, ScrapeBatch, TrackedVideo};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
