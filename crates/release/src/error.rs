//! Error types for release publishing operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while publishing a release.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Inputs are missing or unusable. Raised before any network call.
    #[error("Invalid inputs: {message}")]
    #[diagnostic(code(tagship::release::validation), help("{help}"))]
    Validation {
        /// The error message
        message: String,
        /// Help text for the user
        help: String,
    },

    /// The release did not exist and creating it failed.
    #[error("Failed to create release {tag}: {message}")]
    #[diagnostic(
        code(tagship::release::create),
        help("Check that the token has write access to the repository contents")
    )]
    ReleaseCreation {
        /// Tag of the release that could not be created
        tag: String,
        /// The error message
        message: String,
    },

    /// A single asset could not be read or uploaded.
    #[error("Failed to upload {name}: {message}")]
    #[diagnostic(code(tagship::release::upload))]
    AssetUpload {
        /// Display name of the asset
        name: String,
        /// The error message
        message: String,
    },

    /// The formula template does not exist on disk.
    #[error("Homebrew formula template file not found: {}", path.display())]
    #[diagnostic(
        code(tagship::release::template_not_found),
        help("Check the homebrewFormula input points at a file in the workspace")
    )]
    TemplateNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A repository identifier was not in `owner/name` form.
    #[error("Invalid repository '{value}'. Expected format: owner/repo")]
    #[diagnostic(code(tagship::release::invalid_repository))]
    InvalidRepository {
        /// The rejected value
        value: String,
    },

    /// Remote call error (GitHub, Homebrew tap, ...).
    #[error("{backend} backend error: {message}")]
    #[diagnostic(code(tagship::release::backend))]
    Backend {
        /// The backend that failed
        backend: String,
        /// The error message
        message: String,
        /// Help text for the user
        help: Option<String>,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(tagship::release::io))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a new release creation error.
    #[must_use]
    pub fn release_creation(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReleaseCreation {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Create a new asset upload error.
    #[must_use]
    pub fn asset_upload(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssetUpload {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new template-not-found error.
    #[must_use]
    pub fn template_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create a new invalid repository error.
    #[must_use]
    pub fn invalid_repository(value: impl Into<String>) -> Self {
        Self::InvalidRepository {
            value: value.into(),
        }
    }

    /// Create a new backend error.
    #[must_use]
    pub fn backend(
        backend: impl Into<String>,
        message: impl Into<String>,
        help: Option<String>,
    ) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.into(),
            help,
        }
    }

    /// Whether this error ends the run with a failure status.
    ///
    /// Everything else is reported as a warning by the stage that hit it.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::ReleaseCreation { .. })
    }
}
