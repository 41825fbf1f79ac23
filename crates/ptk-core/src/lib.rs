pub mod app_config;
pub mod business;
pub mod categories;
pub mod config;
pub mod incentive;
pub mod session;

pub use app_config::{AppConfig, ChainParentSelectPolicy, Environment};
pub use business::{Business, BusinessRole, BusinessStatus};
pub use categories::{default_categories, load_categories, BusinessCategory, CategoriesFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use incentive::{DiscountType, Incentive, IncentiveDetail, IncentiveType};
pub use session::{Role, Session};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file at {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
