use async_trait::async_trait;
use bytes::Bytes;
use hyper::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use crate::data::{Asset, NewRelease, Release};
use crate::error::ServiceError;
use crate::service::ReleaseService;

use relsync_config::DeployConfig;
use relsync_utils::http::{delete, get, post, HeaderMap, ResponseData};

const LIST_RELEASES: &str = "list releases";
const CREATE_RELEASE: &str = "create release";
const LIST_ASSETS: &str = "list assets";
const DELETE_ASSET: &str = "delete asset";
const UPLOAD_ASSET: &str = "upload asset";

const ACCEPT: &str = "application/vnd.github+json";

/// [`ReleaseService`] backed by the GitHub REST API.
///
/// API calls go to `{api_url}/repos/{owner}/{repo}`, uploads to the separate
/// uploads host. Every request carries `Authorization: token <value>`; the
/// token is never validated locally.
pub struct GitHubReleaseService {
    repo_api_url: String,
    repo_uploads_url: String,
    headers: HeaderMap,
}

impl GitHubReleaseService {
    pub fn new(config: &DeployConfig) -> Self {
        let headers = HeaderMap::from([
            ("Authorization".to_string(), format!("token {}", config.token)),
            ("User-Agent".to_string(), config.user_agent.clone()),
            ("Accept".to_string(), ACCEPT.to_string()),
        ]);
        GitHubReleaseService {
            repo_api_url: config.repo_api_url(),
            repo_uploads_url: config.repo_uploads_url(),
            headers,
        }
    }

    fn headers_with_content_type(&self, content_type: &str) -> HeaderMap {
        let mut map = self.headers.clone();
        map.insert("Content-Type".to_string(), content_type.to_string());
        map
    }

    fn releases_url(&self) -> String {
        format!("{}/releases", self.repo_api_url)
    }

    fn assets_url(&self, release: &Release) -> String {
        format!("{}/releases/{}/assets", self.repo_api_url, release.id)
    }

    fn upload_url(&self, release: &Release, name: &str) -> String {
        format!(
            "{}/releases/{}/assets?name={}",
            self.repo_uploads_url,
            release.id,
            urlencoding::encode(name)
        )
    }
}

#[async_trait]
impl ReleaseService for GitHubReleaseService {
    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError> {
        let url = self.releases_url();
        debug!(%url, "listing releases");
        let rsp = get(&url, &self.headers)
            .await
            .map_err(|source| ServiceError::Transport {
                operation: LIST_RELEASES,
                source,
            })?;
        expect_status(&rsp, &[StatusCode::OK], LIST_RELEASES)?;
        decode(&rsp, LIST_RELEASES)
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release, ServiceError> {
        info!(tag = %release.tag_name, "creating new release");
        let payload = serde_json::to_vec(release).map_err(|source| ServiceError::Encode {
            operation: CREATE_RELEASE,
            source,
        })?;
        let rsp = post(
            &self.releases_url(),
            &self.headers_with_content_type("application/json"),
            Bytes::from(payload),
        )
        .await
        .map_err(|source| ServiceError::Transport {
            operation: CREATE_RELEASE,
            source,
        })?;
        expect_status(&rsp, &[StatusCode::CREATED], CREATE_RELEASE)?;
        decode(&rsp, CREATE_RELEASE)
    }

    async fn list_assets(&self, release: &Release) -> Result<Vec<Asset>, ServiceError> {
        let url = self.assets_url(release);
        debug!(%url, "listing assets");
        let rsp = get(&url, &self.headers)
            .await
            .map_err(|source| ServiceError::Transport {
                operation: LIST_ASSETS,
                source,
            })?;
        expect_status(&rsp, &[StatusCode::OK], LIST_ASSETS)?;
        decode(&rsp, LIST_ASSETS)
    }

    async fn delete_asset(&self, asset: &Asset) -> Result<(), ServiceError> {
        debug!(name = %asset.name, url = %asset.url, "deleting asset");
        let rsp = delete(&asset.url, &self.headers)
            .await
            .map_err(|source| ServiceError::Transport {
                operation: DELETE_ASSET,
                source,
            })?;
        // GitHub answers 204, older deployments 200.
        expect_status(&rsp, &[StatusCode::OK, StatusCode::NO_CONTENT], DELETE_ASSET)
    }

    async fn upload_asset(
        &self,
        release: &Release,
        file: &Path,
    ) -> Result<Option<Asset>, ServiceError> {
        let data = tokio::fs::read(file)
            .await
            .map_err(|source| ServiceError::FileRead {
                path: file.to_path_buf(),
                source,
            })?;
        let name = asset_name(file);
        let url = self.upload_url(release, &name);
        info!(file = %file.display(), %name, bytes = data.len(), "uploading asset");

        let rsp = post(
            &url,
            &self.headers_with_content_type("application/octet-stream"),
            Bytes::from(data),
        )
        .await
        .map_err(|source| ServiceError::Transport {
            operation: UPLOAD_ASSET,
            source,
        })?;
        expect_status(&rsp, &[StatusCode::CREATED], UPLOAD_ASSET)?;
        Ok(rsp
            .body
            .as_deref()
            .and_then(|body| serde_json::from_slice::<Asset>(body).ok()))
    }
}

/// Display name for an uploaded file: its base name, falling back to the
/// whole path when there is none.
pub fn asset_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}

fn expect_status(
    rsp: &ResponseData,
    expected: &[StatusCode],
    operation: &'static str,
) -> Result<(), ServiceError> {
    if expected.iter().any(|status| rsp.is(*status)) {
        return Ok(());
    }
    Err(ServiceError::Remote {
        operation,
        status: rsp.status,
        detail: diagnostic(rsp),
    })
}

/// Error bodies are decoded as a generic key/value map; anything else is kept
/// as raw text.
fn diagnostic(rsp: &ResponseData) -> Option<String> {
    let body = rsp.body.as_deref().filter(|body| !body.is_empty())?;
    match serde_json::from_slice::<Map<String, Value>>(body) {
        Ok(map) => Some(Value::Object(map).to_string()),
        Err(_) => Some(rsp.body_text()),
    }
}

fn decode<T: DeserializeOwned>(
    rsp: &ResponseData,
    operation: &'static str,
) -> Result<T, ServiceError> {
    serde_json::from_slice(rsp.body.as_deref().unwrap_or_default())
        .map_err(|source| ServiceError::Decode { operation, source })
}
