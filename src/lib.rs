//! relsync - publish build artifacts as assets of a hosted release
//!
//! Given a tag and a list of files, relsync makes sure the release exists,
//! removes whatever assets it already carries and uploads the files
//! concurrently, reporting the outcome of every file.

pub use relsync_config as config;
pub use relsync_core as core;
pub use relsync_provider as provider;
pub use relsync_utils as utils;

// Re-export commonly used types for convenience
pub use relsync_config::{ConfigError, DeployConfig, PartialConfig};
pub use relsync_core::{ReleaseSync, SyncReport, UploadOutcome, WorkflowError};
pub use relsync_provider::{Asset, GitHubReleaseService, Release, ReleaseService, ServiceError};
