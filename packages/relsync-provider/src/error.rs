use relsync_utils::HttpError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a status other than the one the operation
    /// expects.
    #[error("{operation} returned status {status}{}", fmt_detail(.detail))]
    Remote {
        operation: &'static str,
        status: u16,
        detail: Option<String>,
    },
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: HttpError,
    },
    #[error("failed to encode {operation} request: {source}")]
    Encode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn fmt_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {}", detail))
        .unwrap_or_default()
}
