use relsync_config::DeployConfig;
use relsync_provider::{Release, ReleaseService};
use std::sync::Arc;
use tracing::info;

use crate::error::WorkflowError;
use crate::reconciler::{reconcile_assets, ReconcileReport};
use crate::resolver::{resolve_release, Resolution};
use crate::uploader::{upload_all, UploadOutcome};

/// Aggregated result of a completed run.
#[derive(Debug)]
pub struct SyncReport {
    pub release: Release,
    pub created: bool,
    pub reconcile: ReconcileReport,
    pub uploads: Vec<UploadOutcome>,
}

impl SyncReport {
    /// True when every file was uploaded. Failed deletions do not count.
    pub fn is_success(&self) -> bool {
        self.uploads.iter().all(UploadOutcome::is_success)
    }

    pub fn failed_uploads(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.uploads.iter().filter(|outcome| !outcome.is_success())
    }
}

/// Publishes the configured files to the configured release:
/// resolve (or create) the release, empty its asset list, upload every file.
pub struct ReleaseSync<'a> {
    service: Arc<dyn ReleaseService>,
    config: &'a DeployConfig,
}

impl<'a> ReleaseSync<'a> {
    pub fn new(service: Arc<dyn ReleaseService>, config: &'a DeployConfig) -> Self {
        Self { service, config }
    }

    /// Runs the three stages in order.
    ///
    /// Failing to resolve the release or to list its assets aborts the run
    /// before anything is uploaded. Per-asset and per-file failures are
    /// collected in the returned report instead.
    pub async fn run(&self) -> Result<SyncReport, WorkflowError> {
        let tag = &self.config.tag;
        let resolution = resolve_release(
            self.service.as_ref(),
            tag,
            &self.config.description,
            &self.config.target,
        )
        .await
        .map_err(|source| WorkflowError::Resolve {
            tag: tag.clone(),
            source,
        })?;
        let created = resolution.was_created();
        let release = resolution.into_release();

        let reconcile = reconcile_assets(self.service.as_ref(), &release)
            .await
            .map_err(|source| WorkflowError::ListAssets {
                tag: tag.clone(),
                source,
            })?;

        let uploads = upload_all(Arc::clone(&self.service), &release, &self.config.files).await;
        let report = SyncReport {
            release,
            created,
            reconcile,
            uploads,
        };
        info!(
            tag = %tag,
            uploaded = report.uploads.len() - report.failed_uploads().count(),
            failed = report.failed_uploads().count(),
            "sync finished"
        );
        Ok(report)
    }
}
