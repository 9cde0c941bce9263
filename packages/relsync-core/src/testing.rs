//! In-memory [`ReleaseService`] that records every call.

use async_trait::async_trait;
use relsync_provider::{asset_name, Asset, NewRelease, Release, ReleaseService, ServiceError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub list_releases: usize,
    pub created: Vec<NewRelease>,
    pub list_assets: usize,
    pub deleted: Vec<u64>,
    pub uploaded: Vec<PathBuf>,
}

#[derive(Default)]
struct State {
    releases: Vec<Release>,
    assets: Vec<Asset>,
    next_id: u64,
    fail_list_releases: bool,
    fail_list_assets: bool,
    failing_deletes: HashSet<u64>,
    calls: Calls,
}

#[derive(Default)]
pub struct MockService {
    state: Mutex<State>,
}

impl MockService {
    pub fn new() -> Self {
        let service = Self::default();
        service.state.lock().unwrap().next_id = 100;
        service
    }

    pub fn with_release(self, id: u64, tag: &str) -> Self {
        self.state.lock().unwrap().releases.push(Release {
            id,
            tag_name: tag.to_string(),
            target_commitish: "master".to_string(),
            name: Some(tag.to_string()),
            body: None,
            draft: false,
            prerelease: true,
        });
        self
    }

    pub fn with_assets(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for name in names {
                state.next_id += 1;
                let id = state.next_id;
                state.assets.push(Asset {
                    id,
                    url: format!("mock://assets/{}", id),
                    name: name.to_string(),
                    state: "uploaded".to_string(),
                });
            }
        }
        self
    }

    pub fn failing_list_releases(self) -> Self {
        self.state.lock().unwrap().fail_list_releases = true;
        self
    }

    pub fn failing_list_assets(self) -> Self {
        self.state.lock().unwrap().fail_list_assets = true;
        self
    }

    pub fn failing_delete(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let ids: Vec<u64> = state
                .assets
                .iter()
                .filter(|asset| asset.name == name)
                .map(|asset| asset.id)
                .collect();
            state.failing_deletes.extend(ids);
        }
        self
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn asset_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut names: Vec<String> = state.assets.iter().map(|a| a.name.clone()).collect();
        names.sort();
        names
    }
}

fn remote(operation: &'static str, status: u16) -> ServiceError {
    ServiceError::Remote {
        operation,
        status,
        detail: None,
    }
}

#[async_trait]
impl ReleaseService for MockService {
    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_releases += 1;
        if state.fail_list_releases {
            return Err(remote("list releases", 500));
        }
        Ok(state.releases.clone())
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.created.push(release.clone());
        state.next_id += 1;
        let created = Release {
            id: state.next_id,
            tag_name: release.tag_name.clone(),
            target_commitish: release.target_commitish.clone(),
            name: Some(release.name.clone()),
            body: Some(release.body.clone()),
            draft: release.draft,
            prerelease: release.prerelease,
        };
        state.releases.push(created.clone());
        Ok(created)
    }

    async fn list_assets(&self, _release: &Release) -> Result<Vec<Asset>, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_assets += 1;
        if state.fail_list_assets {
            return Err(remote("list assets", 502));
        }
        Ok(state.assets.clone())
    }

    async fn delete_asset(&self, asset: &Asset) -> Result<(), ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.deleted.push(asset.id);
        if state.failing_deletes.contains(&asset.id) {
            return Err(remote("delete asset", 500));
        }
        state.assets.retain(|a| a.id != asset.id);
        Ok(())
    }

    async fn upload_asset(
        &self,
        _release: &Release,
        file: &Path,
    ) -> Result<Option<Asset>, ServiceError> {
        self.state
            .lock()
            .unwrap()
            .calls
            .uploaded
            .push(file.to_path_buf());
        tokio::fs::read(file)
            .await
            .map_err(|source| ServiceError::FileRead {
                path: file.to_path_buf(),
                source,
            })?;

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let asset = Asset {
            id: state.next_id,
            url: format!("mock://assets/{}", state.next_id),
            name: asset_name(file),
            state: "uploaded".to_string(),
        };
        state.assets.push(asset.clone());
        Ok(Some(asset))
    }
}
