//! Find-or-create of the release for a tag.

use crate::config::RepoSlug;
use crate::error::{Error, Result};
use crate::host::{NewRelease, ReleaseHost, find_existing};
use tracing::info;

/// The release every asset of the run is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedRelease {
    /// Release id
    pub id: u64,
    /// Whether the release was created by this run
    pub created: bool,
}

/// Looks up the release for `release.tag`, creating it when the lookup fails.
///
/// Any lookup failure counts as "does not exist", so at most one creation
/// call is made and an existing release is never modified.
///
/// # Errors
///
/// Returns [`Error::ReleaseCreation`] when the creation call fails.
pub async fn resolve_or_create(
    host: &dyn ReleaseHost,
    repo: &RepoSlug,
    release: &NewRelease,
) -> Result<ResolvedRelease> {
    let lookup = host.get_release_by_tag(repo, &release.tag);
    if let Some(found) = find_existing("release", lookup).await {
        info!(release_id = found.id, tag = %release.tag, "Found existing release");
        return Ok(ResolvedRelease {
            id: found.id,
            created: false,
        });
    }

    info!(
        tag = %release.tag,
        "No existing release found, creating a new one"
    );

    let created = host
        .create_release(repo, release)
        .await
        .map_err(|e| Error::release_creation(&release.tag, e.to_string()))?;

    info!(release_id = created.id, tag = %release.tag, "Created new release");

    Ok(ResolvedRelease {
        id: created.id,
        created: true,
    })
}
