//! Release orchestrator.
//!
//! Runs the publishing pipeline in order: validate inputs, match files,
//! find or create the release, upload assets, then hand the uploaded
//! assets to every configured backend.

use crate::backends::{BackendContext, PublishResult, ReleaseBackend};
use crate::config::{Inputs, RepoSlug};
use crate::error::Result;
use crate::host::{NewRelease, ReleaseHost};
use crate::matcher::expand_patterns;
use crate::resolver::{ResolvedRelease, resolve_or_create};
use crate::uploader::{UploadReport, upload_assets};
use std::sync::Arc;
use tracing::{info, warn};

/// Report from a release run.
#[derive(Debug)]
pub struct ReleaseReport {
    /// Release the assets were attached to
    pub release: ResolvedRelease,
    /// Number of files matched by the patterns
    pub matched: usize,
    /// Upload outcome per file
    pub uploads: UploadReport,
    /// Results from each backend
    pub backend_results: Vec<PublishResult>,
}

impl ReleaseReport {
    /// Whether every upload and every backend succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.uploads.failures.is_empty() && self.backend_results.iter().all(|r| r.success)
    }
}

/// Release orchestrator.
pub struct ReleaseOrchestrator {
    inputs: Inputs,
    repository: RepoSlug,
    host: Arc<dyn ReleaseHost>,
    backends: Vec<Box<dyn ReleaseBackend>>,
}

impl ReleaseOrchestrator {
    /// Creates a new release orchestrator.
    #[must_use]
    pub fn new(inputs: Inputs, repository: RepoSlug, host: Arc<dyn ReleaseHost>) -> Self {
        Self {
            inputs,
            repository,
            host,
            backends: Vec::new(),
        }
    }

    /// Adds a backend to the orchestrator.
    #[must_use]
    pub fn with_backend(mut self, backend: Box<dyn ReleaseBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Runs the whole pipeline.
    ///
    /// Upload and backend failures are reported in the returned
    /// [`ReleaseReport`] and never fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the token or the file patterns are missing (before any remote call)
    /// - a file pattern is not valid glob syntax
    /// - the release did not exist and could not be created
    pub async fn run(&self) -> Result<ReleaseReport> {
        let patterns = self.inputs.validate()?;
        let files = expand_patterns(&patterns)?;

        info!(
            repository = %self.repository,
            tag = %self.inputs.tag,
            files = files.len(),
            "Publishing release"
        );

        let release = resolve_or_create(
            self.host.as_ref(),
            &self.repository,
            &self.new_release(),
        )
        .await?;

        let uploads =
            upload_assets(self.host.as_ref(), &self.repository, release.id, &files).await;

        let ctx = BackendContext::new(self.repository.clone(), &self.inputs.tag, release.id);
        let backend_results = self.publish_backends(&ctx, &uploads).await;

        Ok(ReleaseReport {
            release,
            matched: files.len(),
            uploads,
            backend_results,
        })
    }

    fn new_release(&self) -> NewRelease {
        NewRelease {
            tag: self.inputs.tag.clone(),
            name: self.inputs.tag.clone(),
            body: self.inputs.note.clone(),
            draft: self.inputs.is_draft(),
            prerelease: self.inputs.is_prerelease(),
        }
    }

    async fn publish_backends(
        &self,
        ctx: &BackendContext,
        uploads: &UploadReport,
    ) -> Vec<PublishResult> {
        let mut results = Vec::new();

        for backend in &self.backends {
            info!(backend = backend.name(), "Publishing to backend");

            match backend.publish(ctx, &uploads.uploaded).await {
                Ok(result) => {
                    if result.success {
                        info!(
                            backend = backend.name(),
                            message = %result.message,
                            url = ?result.url,
                            "Backend publish succeeded"
                        );
                    } else {
                        warn!(
                            backend = backend.name(),
                            message = %result.message,
                            "Backend publish failed"
                        );
                    }
                    results.push(result);
                }
                Err(e) => {
                    warn!("Failed to update {}: {e}", backend.name());
                    results.push(PublishResult::failure(backend.name(), e.to_string()));
                }
            }
        }

        results
    }
}
