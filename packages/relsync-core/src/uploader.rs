use relsync_provider::{Asset, Release, ReleaseService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::UploadFailure;
use crate::task_group::TaskGroup;

/// Result of one file's upload attempt.
#[derive(Debug)]
pub struct UploadOutcome {
    pub path: PathBuf,
    /// The created asset, when the service described it.
    pub result: Result<Option<Asset>, UploadFailure>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Uploads every file to `release` concurrently, one task per file.
///
/// Returns only after each task has finished, with exactly one outcome per
/// input path in completion order. A failing file never affects the others.
pub async fn upload_all(
    service: Arc<dyn ReleaseService>,
    release: &Release,
    files: &[PathBuf],
) -> Vec<UploadOutcome> {
    let release = Arc::new(release.clone());
    let mut group = TaskGroup::new();
    for file in files {
        let service = Arc::clone(&service);
        let release = Arc::clone(&release);
        let path = file.clone();
        group.spawn(file.clone(), async move {
            service.upload_asset(&release, &path).await
        });
    }
    info!(release = release.id, count = group.len(), "uploading assets");

    group
        .join_all()
        .await
        .into_iter()
        .map(|(path, joined)| {
            let result = match joined {
                Ok(uploaded) => uploaded.map_err(UploadFailure::from),
                Err(err) => Err(UploadFailure::Aborted {
                    reason: err.to_string(),
                }),
            };
            match &result {
                Ok(_) => info!(file = %path.display(), "upload done"),
                Err(error) => warn!(file = %path.display(), %error, "upload failed"),
            }
            UploadOutcome { path, result }
        })
        .collect()
}
