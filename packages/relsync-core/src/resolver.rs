use relsync_provider::{NewRelease, Release, ReleaseService, ServiceError};
use tracing::info;

/// Outcome of [`resolve_release`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Existing(Release),
    Created(Release),
}

impl Resolution {
    pub fn release(&self) -> &Release {
        match self {
            Resolution::Existing(release) | Resolution::Created(release) => release,
        }
    }

    pub fn into_release(self) -> Release {
        match self {
            Resolution::Existing(release) | Resolution::Created(release) => release,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolution::Created(_))
    }
}

/// Returns the release tagged `tag`, creating a prerelease pointing at
/// `target` when none exists.
///
/// The first listed release with an exactly matching tag wins. An existing
/// release is returned untouched even if its body differs from
/// `description`.
pub async fn resolve_release(
    service: &dyn ReleaseService,
    tag: &str,
    description: &str,
    target: &str,
) -> Result<Resolution, ServiceError> {
    let releases = service.list_releases().await?;
    if let Some(release) = releases.into_iter().find(|release| release.tag_name == tag) {
        info!(%tag, id = release.id, "found existing release");
        return Ok(Resolution::Existing(release));
    }

    let created = service
        .create_release(&NewRelease::prerelease(tag, description, target))
        .await?;
    info!(%tag, id = created.id, "created release");
    Ok(Resolution::Created(created))
}
