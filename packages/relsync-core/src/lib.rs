//! Release synchronization workflow: resolve the release for a tag, clear
//! its assets, then upload a fresh set concurrently.

pub mod error;
pub mod reconciler;
pub mod resolver;
pub mod task_group;
pub mod uploader;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use error::{UploadFailure, WorkflowError};
pub use reconciler::{reconcile_assets, FailedDeletion, ReconcileReport};
pub use resolver::{resolve_release, Resolution};
pub use task_group::TaskGroup;
pub use uploader::{upload_all, UploadOutcome};
pub use workflow::{ReleaseSync, SyncReport};
