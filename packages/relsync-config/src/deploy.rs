use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_TAG: &str = "SNAPSHOT";
pub const DEFAULT_DESCRIPTION: &str = "current binaries";
pub const DEFAULT_TARGET: &str = "master";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_UPLOADS_URL: &str = "https://uploads.github.com";

/// Everything one deployment run needs, validated and immutable.
///
/// Built once at startup and handed by reference to the release service and
/// the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub tag: String,
    pub description: String,
    pub files: Vec<PathBuf>,
    /// Branch a freshly created release points at.
    pub target: String,
    pub api_url: String,
    pub uploads_url: String,
    pub user_agent: String,
}

impl DeployConfig {
    /// `{api_url}/repos/{owner}/{repo}`
    pub fn repo_api_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// `{uploads_url}/repos/{owner}/{repo}`
    pub fn repo_uploads_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.uploads_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// One layer of configuration. Every field is optional so layers coming from
/// a JSON file, the environment and command-line flags can be stacked with
/// [`PartialConfig::merge`] before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub token: Option<String>,
    #[serde(alias = "user")]
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub tag: Option<String>,
    #[serde(alias = "desc")]
    pub description: Option<String>,
    pub files: Option<Vec<PathBuf>>,
    pub target: Option<String>,
    pub api_url: Option<String>,
    pub uploads_url: Option<String>,
    pub user_agent: Option<String>,
}

impl PartialConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: PartialConfig) -> PartialConfig {
        PartialConfig {
            token: other.token.or(self.token),
            owner: other.owner.or(self.owner),
            repo: other.repo.or(self.repo),
            tag: other.tag.or(self.tag),
            description: other.description.or(self.description),
            files: other.files.or(self.files),
            target: other.target.or(self.target),
            api_url: other.api_url.or(self.api_url),
            uploads_url: other.uploads_url.or(self.uploads_url),
            user_agent: other.user_agent.or(self.user_agent),
        }
    }

    /// Validates the layer and fills in defaults.
    ///
    /// Token, files, repo and owner are required; a blank value counts as
    /// missing.
    pub fn into_config(self) -> Result<DeployConfig, ConfigError> {
        let token = required(self.token, "token")?;
        let files = self
            .files
            .filter(|files| !files.is_empty())
            .ok_or(ConfigError::Missing("files"))?;
        let repo = required(self.repo, "repo")?;
        let owner = required(self.owner, "user")?;

        Ok(DeployConfig {
            token,
            owner,
            repo,
            tag: non_blank(self.tag).unwrap_or_else(|| DEFAULT_TAG.to_string()),
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            files,
            target: non_blank(self.target).unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            api_url: non_blank(self.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            uploads_url: non_blank(self.uploads_url)
                .unwrap_or_else(|| DEFAULT_UPLOADS_URL.to_string()),
            user_agent: non_blank(self.user_agent).unwrap_or_else(default_user_agent),
        })
    }
}

/// Splits a comma separated file list, trimming whitespace and dropping
/// empty entries.
pub fn parse_file_list(files: &str) -> Vec<PathBuf> {
    files
        .split(',')
        .map(str::trim)
        .filter(|file| !file.is_empty())
        .map(PathBuf::from)
        .collect()
}

pub fn default_user_agent() -> String {
    format!("relsync/{}", env!("CARGO_PKG_VERSION"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    non_blank(value).ok_or(ConfigError::Missing(field))
}
