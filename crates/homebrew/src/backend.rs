//! Homebrew backend for tagship releases.
//!
//! Renders a formula template with the release version and asset URLs and
//! commits it to a tap repository.

use crate::formula::{formula_name, formula_path, render_commit_message, render_formula};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tagship_release::UploadedAsset;
use tagship_release::backends::{BackendContext, PublishResult, ReleaseBackend};
use tagship_release::config::{
    DEFAULT_COMMIT_FORMAT, DEFAULT_HOMEBREW_BRANCH, DEFAULT_HOMEBREW_PATH, HomebrewSettings,
    RepoSlug,
};
use tagship_release::error::{Error, Result};
use tagship_release::host::{ContentStore, FileWrite, find_existing};
use tracing::{debug, info};

/// Configuration for the Homebrew backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomebrewConfig {
    /// Local formula template
    pub template: PathBuf,
    /// Tap repository in "owner/repo" format (e.g., "acme/homebrew-tap")
    pub tap: String,
    /// Branch to commit to (default: `main`)
    pub branch: String,
    /// Formula directory inside the tap (default: `Formula`)
    pub path: String,
    /// Commit message format with `{{ formula }}` and `{{ version }}`
    pub commit_format: String,
}

impl HomebrewConfig {
    /// Creates a new Homebrew configuration with default branch, path and
    /// commit format.
    #[must_use]
    pub fn new(template: impl Into<PathBuf>, tap: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            tap: tap.into(),
            branch: DEFAULT_HOMEBREW_BRANCH.to_string(),
            path: DEFAULT_HOMEBREW_PATH.to_string(),
            commit_format: DEFAULT_COMMIT_FORMAT.to_string(),
        }
    }

    /// Sets the branch.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Sets the formula directory.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the commit message format.
    #[must_use]
    pub fn with_commit_format(mut self, format: impl Into<String>) -> Self {
        self.commit_format = format.into();
        self
    }
}

impl From<HomebrewSettings> for HomebrewConfig {
    fn from(settings: HomebrewSettings) -> Self {
        Self {
            template: settings.template,
            tap: settings.tap,
            branch: settings.branch,
            path: settings.path,
            commit_format: settings.commit_format,
        }
    }
}

/// Homebrew backend for updating tap repositories.
pub struct HomebrewBackend {
    config: HomebrewConfig,
    store: Arc<dyn ContentStore>,
}

impl HomebrewBackend {
    /// Creates a new Homebrew backend writing through `store`.
    #[must_use]
    pub fn new(config: HomebrewConfig, store: Arc<dyn ContentStore>) -> Self {
        Self { config, store }
    }

    /// Reads and renders the formula without publishing it.
    ///
    /// Returns the formula name and the rendered content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] if the template does not exist,
    /// or an I/O error if it cannot be read as text.
    pub async fn generate_formula(
        &self,
        version: &str,
        assets: &[UploadedAsset],
    ) -> Result<(String, String)> {
        let template_path = &self.config.template;
        if !tokio::fs::try_exists(template_path).await.unwrap_or(false) {
            return Err(Error::template_not_found(template_path));
        }

        let template = tokio::fs::read_to_string(template_path).await?;
        let name = formula_name(template_path).ok_or_else(|| {
            Error::backend(
                "Homebrew",
                format!(
                    "Cannot derive a formula name from '{}'",
                    template_path.display()
                ),
                None,
            )
        })?;

        let content = render_formula(&template, version, assets)?;
        Ok((name, content))
    }

    /// Pushes the formula to the tap repository.
    async fn push_formula(
        &self,
        tap: &RepoSlug,
        formula: &str,
        content: String,
        version: &str,
    ) -> Result<String> {
        let branch = &self.config.branch;
        let path = formula_path(&self.config.path, formula);

        debug!(tap = %tap, path = %path, branch = %branch, "Pushing formula to tap");

        let existing = find_existing("formula", self.store.get_file(tap, &path, branch)).await;
        let sha = existing.map(|file| file.sha);
        match &sha {
            Some(sha) => debug!(sha = %sha, "Updating existing formula"),
            None => debug!("Creating new formula"),
        }

        let message = render_commit_message(&self.config.commit_format, formula, version)?;
        self.store
            .put_file(
                tap,
                FileWrite {
                    path: path.clone(),
                    message,
                    content,
                    branch: branch.clone(),
                    sha,
                },
            )
            .await?;

        let formula_url = format!("https://github.com/{tap}/blob/{branch}/{path}");
        info!(url = %formula_url, "Formula pushed to tap");

        Ok(formula_url)
    }
}

impl ReleaseBackend for HomebrewBackend {
    fn name(&self) -> &'static str {
        "Homebrew formula"
    }

    fn publish<'a>(
        &'a self,
        ctx: &'a BackendContext,
        assets: &'a [UploadedAsset],
    ) -> Pin<Box<dyn Future<Output = Result<PublishResult>> + Send + 'a>> {
        Box::pin(async move {
            let (formula, content) = self.generate_formula(&ctx.version, assets).await?;

            debug!(
                formula = %formula,
                formula_len = content.len(),
                "Rendered formula"
            );

            let tap = RepoSlug::parse(&self.config.tap)?;
            let formula_url = self
                .push_formula(&tap, &formula, content, &ctx.version)
                .await?;

            Ok(PublishResult::success_with_url(
                self.name(),
                format!("Updated formula {formula} in {tap} to {}", ctx.version),
                formula_url,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HomebrewConfig::new("homebrew/app.rb", "owner/homebrew-tap");
        assert_eq!(config.template, PathBuf::from("homebrew/app.rb"));
        assert_eq!(config.tap, "owner/homebrew-tap");
        assert_eq!(config.branch, "main");
        assert_eq!(config.path, "Formula");
        assert_eq!(config.commit_format, "update: {{ formula }} to {{ version }}");
    }

    #[test]
    fn test_config_builder() {
        let config = HomebrewConfig::new("app.rb", "owner/tap")
            .with_branch("master")
            .with_path("Casks")
            .with_commit_format("bump {{ formula }}");

        assert_eq!(config.branch, "master");
        assert_eq!(config.path, "Casks");
        assert_eq!(config.commit_format, "bump {{ formula }}");
    }

    #[test]
    fn test_config_from_settings() {
        let settings = HomebrewSettings {
            template: PathBuf::from("f/app.rb"),
            tap: "o/t".to_string(),
            branch: "dev".to_string(),
            path: "Formula".to_string(),
            commit_format: "x".to_string(),
        };
        let config = HomebrewConfig::from(settings);
        assert_eq!(config.template, PathBuf::from("f/app.rb"));
        assert_eq!(config.tap, "o/t");
        assert_eq!(config.branch, "dev");
        assert_eq!(config.commit_format, "x");
    }
}
