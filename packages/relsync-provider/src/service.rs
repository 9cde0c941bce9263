use async_trait::async_trait;
use std::path::Path;

use crate::data::{Asset, NewRelease, Release};
use crate::error::ServiceError;

/// The five remote operations the deployment workflow relies on.
///
/// Implementations are pure protocol adapters; ordering, retries and failure
/// policy belong to the caller.
#[async_trait]
pub trait ReleaseService: Send + Sync {
    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError>;

    async fn create_release(&self, release: &NewRelease) -> Result<Release, ServiceError>;

    async fn list_assets(&self, release: &Release) -> Result<Vec<Asset>, ServiceError>;

    async fn delete_asset(&self, asset: &Asset) -> Result<(), ServiceError>;

    /// Uploads `file` as a new asset of `release`.
    ///
    /// Returns the created asset when the service's answer could be decoded.
    async fn upload_asset(
        &self,
        release: &Release,
        file: &Path,
    ) -> Result<Option<Asset>, ServiceError>;
}
