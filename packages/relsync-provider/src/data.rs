use serde::{Deserialize, Serialize};

/// A release as reported by the hosting service.
///
/// `id` is assigned by the service; every asset operation addresses the
/// release through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub target_commitish: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
}

/// Payload for creating a release. Same shape as [`Release`] minus `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl NewRelease {
    /// A published prerelease named after its tag.
    pub fn prerelease(tag: &str, description: &str, target: &str) -> Self {
        Self {
            tag_name: tag.to_string(),
            target_commitish: target.to_string(),
            name: tag.to_string(),
            body: description.to_string(),
            draft: false,
            prerelease: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    /// The asset's own API address, used for deletion.
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
}
