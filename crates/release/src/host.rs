//! Remote hosting interfaces.
//!
//! [`ReleaseHost`] covers the release calls (lookup, creation, asset upload)
//! and [`ContentStore`] the repository contents calls used for formula
//! updates. Provider crates implement both; tests use in-memory fakes.

use crate::config::RepoSlug;
use crate::error::Result;
use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Content type sent with every uploaded asset.
pub const ASSET_CONTENT_TYPE: &str = "application/octet-stream";

/// Boxed future returned by host calls.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// A release as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Opaque numeric id
    pub id: u64,
}

/// Parameters for creating a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    /// Tag name
    pub tag: String,
    /// Release title
    pub name: String,
    /// Release body
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

/// A single asset upload.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    /// Release the asset is attached to
    pub release_id: u64,
    /// Asset name
    pub name: String,
    /// File contents
    pub content: Bytes,
    /// MIME type
    pub content_type: &'static str,
    /// Byte length of `content`
    pub size: u64,
}

impl AssetUpload {
    /// Creates a binary asset upload for the given release.
    #[must_use]
    pub fn new(release_id: u64, name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            release_id,
            name: name.into(),
            size: content.len() as u64,
            content,
            content_type: ASSET_CONTENT_TYPE,
        }
    }
}

/// An asset that was uploaded successfully.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UploadedAsset {
    /// Asset name as stored by the host
    pub name: String,
    /// Public download URL
    pub browser_download_url: String,
}

/// Metadata of an existing remote file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Revision marker (blob SHA) required to update the file
    pub sha: String,
}

/// A create-or-update write of a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    /// Path inside the repository
    pub path: String,
    /// Commit message
    pub message: String,
    /// Plain file content; transport encoding is the store's job
    pub content: String,
    /// Branch to commit to
    pub branch: String,
    /// Revision marker of the file being replaced, `None` to create it
    pub sha: Option<String>,
}

/// Release operations of a hosting platform.
pub trait ReleaseHost: Send + Sync {
    /// Fetches the release whose tag equals `tag`.
    fn get_release_by_tag<'a>(&'a self, repo: &'a RepoSlug, tag: &'a str)
    -> HostFuture<'a, Release>;

    /// Creates a new release.
    fn create_release<'a>(
        &'a self,
        repo: &'a RepoSlug,
        release: &'a NewRelease,
    ) -> HostFuture<'a, Release>;

    /// Uploads one asset to a release.
    fn upload_asset<'a>(
        &'a self,
        repo: &'a RepoSlug,
        upload: AssetUpload,
    ) -> HostFuture<'a, UploadedAsset>;
}

/// Repository contents operations of a hosting platform.
pub trait ContentStore: Send + Sync {
    /// Fetches metadata of the file at `path` on `branch`.
    fn get_file<'a>(
        &'a self,
        repo: &'a RepoSlug,
        path: &'a str,
        branch: &'a str,
    ) -> HostFuture<'a, RemoteFile>;

    /// Creates or updates a file with a single commit.
    fn put_file<'a>(&'a self, repo: &'a RepoSlug, write: FileWrite) -> HostFuture<'a, ()>;
}

/// Looks a resource up, treating every failure as "absent".
///
/// Not found, network and authorization errors are deliberately not told
/// apart: a transient error during the lookup reads as a missing resource.
pub async fn find_existing<T, F>(what: &str, call: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    match call.await {
        Ok(found) => Some(found),
        Err(e) => {
            debug!(resource = what, error = %e, "Lookup failed, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_asset_upload_sets_size_and_content_type() {
        let upload = AssetUpload::new(7, "app.tar.gz", vec![1u8, 2, 3, 4]);
        assert_eq!(upload.release_id, 7);
        assert_eq!(upload.name, "app.tar.gz");
        assert_eq!(upload.size, 4);
        assert_eq!(upload.content_type, "application/octet-stream");
    }

    #[test]
    fn test_asset_upload_empty_file() {
        let upload = AssetUpload::new(1, "empty", Vec::new());
        assert_eq!(upload.size, 0);
    }

    #[tokio::test]
    async fn test_find_existing_success() {
        let found = find_existing("release", async { Ok::<_, Error>(42u64) }).await;
        assert_eq!(found, Some(42));
    }

    #[tokio::test]
    async fn test_find_existing_collapses_any_error() {
        let not_found = find_existing("release", async {
            Err::<u64, _>(Error::backend("github", "Not Found", None))
        })
        .await;
        assert!(not_found.is_none());

        let transient = find_existing("release", async {
            Err::<u64, _>(Error::Io(std::io::Error::other("connection reset")))
        })
        .await;
        assert!(transient.is_none());
    }
}
