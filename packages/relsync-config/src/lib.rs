pub mod deploy;
pub mod error;

// Re-export commonly used types
pub use deploy::{
    default_user_agent, parse_file_list, DeployConfig, PartialConfig, DEFAULT_API_URL,
    DEFAULT_DESCRIPTION, DEFAULT_TAG, DEFAULT_TARGET, DEFAULT_UPLOADS_URL,
};
pub use error::ConfigError;
