//! Command line interface: arguments, error mapping, exit codes and output
//! envelopes.

use crate::annotations::workflow_command;
use crate::tracing::{LogLevel, TracingFormat};
use clap::Parser;
use miette::{Diagnostic, Report};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tagship_release::InputSource;
use tagship_release::config::names;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// Input or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Release creation or other fatal error exit code
pub const EXIT_RELEASE: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// Input or configuration error (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tagship::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// The release could not be found or created (exit code 3)
    #[error("Release error: {message}")]
    #[diagnostic(code(tagship::cli::release))]
    Release {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(tagship::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new release error
    #[must_use]
    pub fn release(message: impl Into<String>) -> Self {
        Self::Release {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new other error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }

    /// Help text attached to the error, if any.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        match self {
            Self::Config { help, .. } | Self::Release { help, .. } | Self::Other { help, .. } => {
                help.as_deref()
            }
        }
    }

    /// Add help text to an existing error, returning a new error with the help text set.
    #[must_use]
    pub fn with_help(self, help_text: impl Into<String>) -> Self {
        let help = Some(help_text.into());
        match self {
            Self::Config { message, .. } => Self::Config { message, help },
            Self::Release { message, .. } => Self::Release { message, help },
            Self::Other { message, .. } => Self::Other { message, help },
        }
    }
}

/// Convert `tagship_release::Error` to the matching `CliError` variant.
///
/// - Validation and repository format errors -> Config (exit code 2)
/// - Release creation errors -> Release (exit code 3)
/// - Everything else -> Other (exit code 3)
impl From<tagship_release::Error> for CliError {
    fn from(err: tagship_release::Error) -> Self {
        use tagship_release::Error;

        match err {
            Error::Validation { message, help } => Self::config_with_help(message, help),
            Error::InvalidRepository { .. } => Self::config_with_help(
                err.to_string(),
                "Pass --repository owner/name or set GITHUB_REPOSITORY",
            ),
            Error::ReleaseCreation { .. } => Self::release(err.to_string()).with_help(
                "Check that the token has write access to the repository contents",
            ),
            Error::Backend { ref help, .. } => match help.clone() {
                Some(h) => Self::other(err.to_string()).with_help(h),
                None => Self::other(err.to_string()),
            },
            Error::AssetUpload { .. } | Error::TemplateNotFound { .. } | Error::Io(_) => {
                Self::other(err.to_string())
            }
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Release { .. } | CliError::Other { .. } => EXIT_RELEASE,
    }
}

/// Short machine-readable code of an error.
#[must_use]
pub const fn error_code(err: &CliError) -> &'static str {
    match err {
        CliError::Config { .. } => "config",
        CliError::Release { .. } => "release",
        CliError::Other { .. } => "other",
    }
}

/// Where the terminal error of a failed run is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOutput {
    /// miette report on stderr
    Report,
    /// JSON error envelope on stdout
    Json,
    /// `::error::` workflow command on stdout
    Annotation,
}

impl ErrorOutput {
    /// Picks the output for the `--json` flag and the active log format.
    #[must_use]
    pub const fn select(json_mode: bool, format: TracingFormat) -> Self {
        if json_mode {
            Self::Json
        } else if matches!(format, TracingFormat::Actions) {
            Self::Annotation
        } else {
            Self::Report
        }
    }
}

/// Workflow command reporting `err`, help text included.
#[must_use]
pub fn error_annotation(err: &CliError) -> String {
    let message = match err.help() {
        Some(help) => format!("{err}\nhelp: {help}"),
        None => err.to_string(),
    };
    workflow_command("error", &message)
}

/// Writes the terminal error once, to the selected output.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn render_error(err: &CliError, output: ErrorOutput) {
    match output {
        ErrorOutput::Json => {
            let error_envelope = ErrorEnvelope::new(serde_json::json!({
                "code": error_code(err),
                "message": err.to_string()
            }));

            match serde_json::to_string(&error_envelope) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("Error serializing error response"),
            }
        }
        ErrorOutput::Annotation => println!("{}", error_annotation(err)),
        ErrorOutput::Report => {
            let report = Report::new(err.clone());
            eprintln!("{report:?}");
            let _ = io::stderr().flush();
        }
    }
}

/// Success response envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success
    pub status: &'static str,
    /// The actual data payload
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope<E> {
    /// Status indicator - always "error" for failures
    pub status: &'static str,
    /// The error details
    pub error: E,
}

impl<E> ErrorEnvelope<E> {
    /// Create a new error envelope
    #[must_use]
    pub const fn new(error: E) -> Self {
        Self {
            status: "error",
            error,
        }
    }
}

/// Publish release assets to GitHub and optionally update a Homebrew formula.
///
/// Every input can also be given through the matching `INPUT_*` environment
/// variable, as set by the GitHub Actions runner.
#[derive(Parser, Debug, Default)]
#[command(name = "tagship")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Glob patterns of files to upload, one per line.
    #[arg(long, env = "INPUT_FILES", value_name = "PATTERNS")]
    pub files: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN).
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Release tag (falls back to GITHUB_REF without `refs/tags/`).
    #[arg(long, env = "INPUT_TAG")]
    pub tag: Option<String>,

    /// Create the release as a draft ("true" to enable).
    #[arg(long, env = "INPUT_DRAFT", num_args = 0..=1, default_missing_value = "true")]
    pub draft: Option<String>,

    /// Mark the release as a prerelease ("true" to enable).
    #[arg(
        long,
        env = "INPUT_PRERELEASE",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub prerelease: Option<String>,

    /// Release notes used as the body of a newly created release.
    #[arg(long, env = "INPUT_NOTE")]
    pub note: Option<String>,

    /// Local Homebrew formula template.
    #[arg(long, env = "INPUT_HOMEBREWFORMULA", value_name = "PATH")]
    pub homebrew_formula: Option<String>,

    /// Homebrew tap repository (owner/name).
    #[arg(long, env = "INPUT_HOMEBREWREPO", value_name = "OWNER/NAME")]
    pub homebrew_repo: Option<String>,

    /// Branch of the tap to commit to [default: main].
    #[arg(long, env = "INPUT_HOMEBREWBRANCH")]
    pub homebrew_branch: Option<String>,

    /// Formula directory inside the tap [default: Formula].
    #[arg(long, env = "INPUT_HOMEBREWPATH")]
    pub homebrew_path: Option<String>,

    /// Commit message format with {{ formula }} and {{ version }}.
    #[arg(long, env = "INPUT_HOMEBREWCOMMITFORMAT", value_name = "FORMAT")]
    pub homebrew_commit_format: Option<String>,

    /// Repository the release belongs to (owner/name).
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    pub repository: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise Server [default: api.github.com].
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Logging verbosity level.
    #[arg(short = 'L', long, default_value = "info", value_enum)]
    pub level: LogLevel,

    /// Log output format [default: actions under GitHub Actions, else compact].
    #[arg(long, value_enum)]
    pub log_format: Option<TracingFormat>,

    /// Print a JSON summary envelope on stdout.
    #[arg(long)]
    pub json: bool,
}

impl InputSource for Cli {
    fn input(&self, name: &str) -> Option<String> {
        let value = match name {
            names::FILES => &self.files,
            names::TOKEN => &self.token,
            names::TAG => &self.tag,
            names::DRAFT => &self.draft,
            names::PRERELEASE => &self.prerelease,
            names::NOTE => &self.note,
            names::HOMEBREW_FORMULA => &self.homebrew_formula,
            names::HOMEBREW_REPO => &self.homebrew_repo,
            names::HOMEBREW_BRANCH => &self.homebrew_branch,
            names::HOMEBREW_PATH => &self.homebrew_path,
            names::HOMEBREW_COMMIT_FORMAT => &self.homebrew_commit_format,
            _ => return None,
        };
        value.clone()
    }
}

/// Parse command line arguments into CLI structure
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
