use relsync_provider::{Asset, Release, ReleaseService, ServiceError};
use tracing::{info, warn};

#[derive(Debug)]
pub struct FailedDeletion {
    pub asset: Asset,
    pub error: ServiceError,
}

#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub deleted: Vec<Asset>,
    pub failed: Vec<FailedDeletion>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Deletes every asset attached to `release`, one at a time.
///
/// Only a failure to list the assets is returned as an error. Each deletion
/// is attempted independently; failed ones are collected in the report and
/// the remaining assets are still processed.
pub async fn reconcile_assets(
    service: &dyn ReleaseService,
    release: &Release,
) -> Result<ReconcileReport, ServiceError> {
    let assets = service.list_assets(release).await?;
    info!(release = release.id, count = assets.len(), "cleaning assets");

    let mut report = ReconcileReport::default();
    for asset in assets {
        match service.delete_asset(&asset).await {
            Ok(()) => {
                info!(name = %asset.name, "deleted asset");
                report.deleted.push(asset);
            }
            Err(error) => {
                warn!(name = %asset.name, url = %asset.url, %error, "failed to delete asset");
                report.failed.push(FailedDeletion { asset, error });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockService;

    async fn release(service: &MockService) -> Release {
        service.list_releases().await.unwrap().remove(0)
    }

    #[tokio::test]
    async fn test_deletes_every_asset() {
        let service = MockService::new()
            .with_release(1, "v1")
            .with_assets(&["a.bin", "b.bin", "c.bin"]);
        let report = reconcile_assets(&service, &release(&service).await)
            .await
            .unwrap();

        assert_eq!(report.deleted.len(), 3);
        assert!(report.is_clean());
        assert!(service.asset_names().is_empty());
    }

    #[tokio::test]
    async fn test_no_assets() {
        let service = MockService::new().with_release(1, "v1");
        let report = reconcile_assets(&service, &release(&service).await)
            .await
            .unwrap();

        assert!(report.deleted.is_empty());
        assert!(service.calls().deleted.is_empty());
    }

    #[tokio::test]
    async fn test_failed_deletion_does_not_stop_the_rest() {
        let service = MockService::new()
            .with_release(1, "v1")
            .with_assets(&["a.bin", "b.bin", "c.bin"])
            .failing_delete("a.bin");
        let report = reconcile_assets(&service, &release(&service).await)
            .await
            .unwrap();

        assert_eq!(service.calls().deleted.len(), 3);
        assert_eq!(report.deleted.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].asset.name, "a.bin");
        assert_eq!(service.asset_names(), vec!["a.bin".to_string()]);
    }

    #[tokio::test]
    async fn test_listing_failure_is_returned() {
        let service = MockService::new()
            .with_release(1, "v1")
            .with_assets(&["a.bin"])
            .failing_list_assets();
        let err = reconcile_assets(&service, &release(&service).await)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert!(service.calls().deleted.is_empty());
    }
}
