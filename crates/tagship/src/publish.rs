//! The publish command: resolve inputs, run the release pipeline against
//! GitHub, and summarize the outcome.

use crate::cli::{Cli, CliError};
use serde::Serialize;
use std::sync::Arc;
use tagship_github::GitHubClient;
use tagship_homebrew::HomebrewBackend;
use tagship_release::{
    ContentStore, Environment, HomebrewSettings, Inputs, PublishResult, ReleaseHost,
    ReleaseOrchestrator, ReleaseReport, RepoSlug, ResolvedRelease, UploadedAsset,
};
use tracing::{info, warn};

/// Everything needed to run, checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    /// Resolved inputs
    pub inputs: Inputs,
    /// Repository the release lives in
    pub repository: RepoSlug,
    /// Formula update settings, when configured
    pub homebrew: Option<HomebrewSettings>,
    /// GitHub API base URL, `None` for api.github.com
    pub api_url: Option<String>,
}

impl PublishPlan {
    /// Resolves and validates the run configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError::Config`] when the token, the file patterns or
    /// the repository are missing or malformed.
    pub fn prepare(cli: &Cli, env: &Environment) -> Result<Self, CliError> {
        let inputs = Inputs::resolve(cli, env);
        inputs.validate()?;

        let repository = cli
            .repository
            .as_deref()
            .or(env.repository.as_deref())
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| {
                CliError::config_with_help(
                    "Repository is required",
                    "Pass --repository owner/name or set GITHUB_REPOSITORY",
                )
            })
            .and_then(|r| RepoSlug::parse(r).map_err(CliError::from))?;

        let homebrew = inputs.homebrew();
        let api_url = cli.api_url.clone().filter(|url| !url.trim().is_empty());

        Ok(Self {
            inputs,
            repository,
            homebrew,
            api_url,
        })
    }

    /// Builds the orchestrator, adding the formula backend when configured.
    #[must_use]
    pub fn orchestrator(
        &self,
        host: Arc<dyn ReleaseHost>,
        store: Arc<dyn ContentStore>,
    ) -> ReleaseOrchestrator {
        let orchestrator =
            ReleaseOrchestrator::new(self.inputs.clone(), self.repository.clone(), host);

        match &self.homebrew {
            Some(settings) => orchestrator.with_backend(Box::new(HomebrewBackend::new(
                settings.clone().into(),
                store,
            ))),
            None => orchestrator,
        }
    }
}

/// An upload that failed, as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub struct FailedUpload {
    /// Asset name
    pub name: String,
    /// Local file path
    pub path: String,
    /// Error message
    pub error: String,
}

/// Summary of a run, printed as JSON with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Repository in `owner/name` form
    pub repository: String,
    /// Release tag
    pub tag: String,
    /// Release the assets went to
    pub release: ResolvedRelease,
    /// Files matched by the patterns
    pub matched: usize,
    /// Uploaded assets, in upload order
    pub uploaded: Vec<UploadedAsset>,
    /// Uploads that failed
    pub failed: Vec<FailedUpload>,
    /// Post-upload backend results
    pub backends: Vec<PublishResult>,
}

impl RunSummary {
    /// Builds the summary of a finished run.
    #[must_use]
    pub fn new(plan: &PublishPlan, report: &ReleaseReport) -> Self {
        Self {
            repository: plan.repository.to_string(),
            tag: plan.inputs.tag.clone(),
            release: report.release,
            matched: report.matched,
            uploaded: report.uploads.uploaded.clone(),
            failed: report
                .uploads
                .failures
                .iter()
                .map(|f| FailedUpload {
                    name: f.name.clone(),
                    path: f.path.display().to_string(),
                    error: f.error.to_string(),
                })
                .collect(),
            backends: report.backend_results.clone(),
        }
    }
}

/// Runs the pipeline against GitHub.
///
/// # Errors
///
/// Returns an error if the API client cannot be built or the release could
/// not be found or created. Upload and formula failures are warnings only.
pub async fn execute(plan: &PublishPlan) -> Result<RunSummary, CliError> {
    let client = GitHubClient::new(plan.inputs.token.clone(), plan.api_url.as_deref())?;
    let client = Arc::new(client);
    let host: Arc<dyn ReleaseHost> = client.clone();
    let store: Arc<dyn ContentStore> = client;

    let report = plan.orchestrator(host, store).run().await?;
    let summary = RunSummary::new(plan, &report);

    if report.is_clean() {
        info!(
            release_id = summary.release.id,
            created = summary.release.created,
            uploaded = summary.uploaded.len(),
            "Release published"
        );
    } else {
        warn!(
            release_id = summary.release.id,
            uploaded = summary.uploaded.len(),
            failed_uploads = summary.failed.len(),
            failed_backends = summary.backends.iter().filter(|b| !b.success).count(),
            "Release published with warnings"
        );
    }

    Ok(summary)
}
