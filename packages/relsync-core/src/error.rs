use relsync_provider::ServiceError;
use thiserror::Error;

/// Failures that stop the workflow before any upload starts.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to resolve release `{tag}`: {source}")]
    Resolve {
        tag: String,
        #[source]
        source: ServiceError,
    },
    #[error("failed to list assets of release `{tag}`: {source}")]
    ListAssets {
        tag: String,
        #[source]
        source: ServiceError,
    },
}

impl WorkflowError {
    pub fn service_error(&self) -> &ServiceError {
        match self {
            WorkflowError::Resolve { source, .. } | WorkflowError::ListAssets { source, .. } => {
                source
            }
        }
    }
}

/// Why a single file did not make it onto the release.
#[derive(Debug, Error)]
pub enum UploadFailure {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("upload task aborted: {reason}")]
    Aborted { reason: String },
}
