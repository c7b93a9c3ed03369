//! Post-upload release backends.
//!
//! A [`ReleaseBackend`] runs after the assets are uploaded and receives the
//! uploaded assets in upload order. Backends are best-effort: the
//! orchestrator downgrades any error they return to a warning.
//!
//! Provider crates implement `ReleaseBackend`:
//! - `tagship-homebrew` - Homebrew formula updates
//!
//! # Example
//!
//! ```rust,ignore
//! use tagship_release::backends::{BackendContext, PublishResult, ReleaseBackend};
//! use tagship_release::UploadedAsset;
//!
//! struct MyBackend;
//!
//! impl ReleaseBackend for MyBackend {
//!     fn name(&self) -> &'static str { "my-backend" }
//!
//!     fn publish<'a>(
//!         &'a self,
//!         ctx: &'a BackendContext,
//!         assets: &'a [UploadedAsset],
//!     ) -> Pin<Box<dyn Future<Output = Result<PublishResult>> + Send + 'a>> {
//!         Box::pin(async move {
//!             Ok(PublishResult::success("my-backend", "Published"))
//!         })
//!     }
//! }
//! ```

use crate::config::RepoSlug;
use crate::error::Result;
use crate::host::UploadedAsset;
use crate::version::release_version;
use std::future::Future;
use std::pin::Pin;

/// Release facts shared with every backend.
#[derive(Debug, Clone)]
pub struct BackendContext {
    /// Repository the release lives in
    pub repository: RepoSlug,
    /// Release tag
    pub tag: String,
    /// Version derived from the tag (without a leading 'v')
    pub version: String,
    /// Id of the release the assets were attached to
    pub release_id: u64,
}

impl BackendContext {
    /// Creates a backend context, deriving the version from the tag.
    #[must_use]
    pub fn new(repository: RepoSlug, tag: impl Into<String>, release_id: u64) -> Self {
        let tag = tag.into();
        Self {
            repository,
            version: release_version(&tag).to_string(),
            tag,
            release_id,
        }
    }
}

/// Result of a backend publish operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PublishResult {
    /// Name of the backend
    pub backend: String,
    /// Whether publishing succeeded
    pub success: bool,
    /// URL of the published artifact (if any)
    pub url: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl PublishResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            success: true,
            url: None,
            message: message.into(),
        }
    }

    /// Creates a successful result with URL.
    #[must_use]
    pub fn success_with_url(
        backend: impl Into<String>,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            success: true,
            url: Some(url.into()),
            message: message.into(),
        }
    }

    /// Creates a failure result.
    #[must_use]
    pub fn failure(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            success: false,
            url: None,
            message: message.into(),
        }
    }
}

/// Trait for post-upload release backends.
pub trait ReleaseBackend: Send + Sync {
    /// Returns the name of this backend (e.g., "Homebrew").
    fn name(&self) -> &'static str;

    /// Publishes the release using the assets that were uploaded.
    ///
    /// # Arguments
    /// * `ctx` - Release facts (repository, tag, version, release id)
    /// * `assets` - Uploaded assets, in upload order
    fn publish<'a>(
        &'a self,
        ctx: &'a BackendContext,
        assets: &'a [UploadedAsset],
    ) -> Pin<Box<dyn Future<Output = Result<PublishResult>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_context_new() {
        let ctx = BackendContext::new(RepoSlug::new("owner", "app"), "v1.0.0", 42);
        assert_eq!(ctx.repository.to_string(), "owner/app");
        assert_eq!(ctx.tag, "v1.0.0");
        assert_eq!(ctx.version, "1.0.0");
        assert_eq!(ctx.release_id, 42);
    }

    #[test]
    fn test_backend_context_unprefixed_tag() {
        let ctx = BackendContext::new(RepoSlug::new("owner", "app"), "2024.01.15", 1);
        assert_eq!(ctx.version, "2024.01.15");
    }

    #[test]
    fn test_publish_result_success() {
        let result = PublishResult::success("Homebrew", "Updated formula");
        assert!(result.success);
        assert_eq!(result.backend, "Homebrew");
        assert_eq!(result.message, "Updated formula");
        assert!(result.url.is_none());
    }

    #[test]
    fn test_publish_result_success_with_url() {
        let result = PublishResult::success_with_url(
            "Homebrew",
            "Updated",
            "https://github.com/o/tap/blob/main/Formula/app.rb",
        );
        assert!(result.success);
        assert_eq!(
            result.url.as_deref(),
            Some("https://github.com/o/tap/blob/main/Formula/app.rb")
        );
    }

    #[test]
    fn test_publish_result_failure() {
        let result = PublishResult::failure("Homebrew", "conflict");
        assert!(!result.success);
        assert_eq!(result.message, "conflict");
        assert!(result.url.is_none());
    }
}
