pub mod data;
pub mod error;
pub mod github;
pub mod service;

// Re-export common types
pub use data::{Asset, NewRelease, Release};
pub use error::ServiceError;
pub use github::{asset_name, GitHubReleaseService};
pub use service::ReleaseService;
