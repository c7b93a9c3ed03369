//! Run configuration.
//!
//! Inputs arrive as named string values (CLI flags, `INPUT_*` variables, or
//! any other [`InputSource`]) and are resolved once into an immutable
//! [`Inputs`] record. Boolean flags stay strings and are compared against
//! `"true"` where they are used.

use crate::error::{Error, Result};
use crate::version::release_version;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Input names, as they appear in the action metadata.
pub mod names {
    /// Newline separated glob patterns.
    pub const FILES: &str = "files";
    /// GitHub token.
    pub const TOKEN: &str = "token";
    /// Release tag.
    pub const TAG: &str = "tag";
    /// Draft flag.
    pub const DRAFT: &str = "draft";
    /// Prerelease flag.
    pub const PRERELEASE: &str = "prerelease";
    /// Release body.
    pub const NOTE: &str = "note";
    /// Local formula template path.
    pub const HOMEBREW_FORMULA: &str = "homebrewFormula";
    /// Tap repository (`owner/name`).
    pub const HOMEBREW_REPO: &str = "homebrewRepo";
    /// Tap branch.
    pub const HOMEBREW_BRANCH: &str = "homebrewBranch";
    /// Formula directory inside the tap.
    pub const HOMEBREW_PATH: &str = "homebrewPath";
    /// Commit message template.
    pub const HOMEBREW_COMMIT_FORMAT: &str = "homebrewCommitFormat";
}

/// Default tap branch.
pub const DEFAULT_HOMEBREW_BRANCH: &str = "main";
/// Default formula directory inside the tap.
pub const DEFAULT_HOMEBREW_PATH: &str = "Formula";
/// Default commit message template for formula updates.
pub const DEFAULT_COMMIT_FORMAT: &str = "update: {{ formula }} to {{ version }}";

/// A source of named input values.
///
/// `None` means the input is absent, which is different from an explicitly
/// empty value: defaults only replace absent values.
pub trait InputSource {
    /// Looks up an input by name.
    fn input(&self, name: &str) -> Option<String>;
}

impl InputSource for HashMap<String, String> {
    fn input(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// `GITHUB_TOKEN`
    pub token: Option<String>,
    /// `GITHUB_REF`, e.g. `refs/tags/v1.0.0`
    pub github_ref: Option<String>,
    /// `GITHUB_REPOSITORY`, e.g. `owner/repo`
    pub repository: Option<String>,
}

impl Environment {
    /// Captures the relevant variables from the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            token: std::env::var("GITHUB_TOKEN").ok(),
            github_ref: std::env::var("GITHUB_REF").ok(),
            repository: std::env::var("GITHUB_REPOSITORY").ok(),
        }
    }

    /// Tag name derived from `GITHUB_REF`.
    #[must_use]
    pub fn ref_tag(&self) -> Option<String> {
        self.github_ref
            .as_deref()
            .map(|r| r.strip_prefix("refs/tags/").unwrap_or(r).to_string())
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Newline separated glob patterns, unparsed
    pub files: String,
    /// GitHub token
    pub token: String,
    /// Release tag
    pub tag: String,
    /// `"true"` to create the release as a draft
    pub draft: String,
    /// `"true"` to mark the release as a prerelease
    pub prerelease: String,
    /// Release body
    pub note: String,
    /// Local formula template path (empty when unset)
    pub homebrew_formula: String,
    /// Tap repository in `owner/name` form (empty when unset)
    pub homebrew_repo: String,
    /// Tap branch
    pub homebrew_branch: String,
    /// Formula directory inside the tap
    pub homebrew_path: String,
    /// Commit message template
    pub homebrew_commit_format: String,
}

impl Inputs {
    /// Resolves every input, applying defaults and environment fallbacks.
    ///
    /// Defaults apply only to absent values. `token` and `tag` also fall
    /// back to the environment when explicitly empty.
    pub fn resolve(source: &impl InputSource, env: &Environment) -> Self {
        let or_default =
            |name: &str, default: &str| source.input(name).unwrap_or_else(|| default.to_string());

        let token = source
            .input(names::TOKEN)
            .filter(|t| !t.is_empty())
            .or_else(|| env.token.clone())
            .unwrap_or_default();

        let tag = source
            .input(names::TAG)
            .filter(|t| !t.is_empty())
            .or_else(|| env.ref_tag())
            .unwrap_or_default();

        Self {
            files: or_default(names::FILES, ""),
            token,
            tag,
            draft: or_default(names::DRAFT, "false"),
            prerelease: or_default(names::PRERELEASE, "false"),
            note: or_default(names::NOTE, ""),
            homebrew_formula: or_default(names::HOMEBREW_FORMULA, ""),
            homebrew_repo: or_default(names::HOMEBREW_REPO, ""),
            homebrew_branch: or_default(names::HOMEBREW_BRANCH, DEFAULT_HOMEBREW_BRANCH),
            homebrew_path: or_default(names::HOMEBREW_PATH, DEFAULT_HOMEBREW_PATH),
            homebrew_commit_format: or_default(
                names::HOMEBREW_COMMIT_FORMAT,
                DEFAULT_COMMIT_FORMAT,
            ),
        }
    }

    /// Splits `files` into trimmed, non-empty patterns.
    #[must_use]
    pub fn file_patterns(&self) -> Vec<String> {
        self.files
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }

    /// Checks the mandatory inputs and returns the file patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the token is empty or no file
    /// pattern is left after trimming.
    pub fn validate(&self) -> Result<Vec<String>> {
        if self.token.is_empty() {
            return Err(Error::validation(
                "GitHub token is required",
                "Pass --token, set INPUT_TOKEN, or export GITHUB_TOKEN",
            ));
        }

        let patterns = self.file_patterns();
        if patterns.is_empty() {
            return Err(Error::validation(
                "No file patterns provided",
                "Pass one glob pattern per line in the files input",
            ));
        }

        Ok(patterns)
    }

    /// Whether the release should be created as a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.draft == "true"
    }

    /// Whether the release should be marked as a prerelease.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.prerelease == "true"
    }

    /// Version string derived from the tag.
    #[must_use]
    pub fn version(&self) -> &str {
        release_version(&self.tag)
    }

    /// Formula update settings, when both a template and a tap are set.
    #[must_use]
    pub fn homebrew(&self) -> Option<HomebrewSettings> {
        if self.homebrew_formula.is_empty() || self.homebrew_repo.is_empty() {
            return None;
        }

        Some(HomebrewSettings {
            template: PathBuf::from(&self.homebrew_formula),
            tap: self.homebrew_repo.clone(),
            branch: self.homebrew_branch.clone(),
            path: self.homebrew_path.clone(),
            commit_format: self.homebrew_commit_format.clone(),
        })
    }
}

/// Settings for the optional formula update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomebrewSettings {
    /// Local template file
    pub template: PathBuf,
    /// Tap repository, unparsed (`owner/name` expected)
    pub tap: String,
    /// Branch to commit to
    pub branch: String,
    /// Formula directory inside the tap
    pub path: String,
    /// Commit message template
    pub commit_format: String,
}

/// A repository identity in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Creates a slug from its parts.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRepository`] unless the value has exactly one
    /// `/` with non-empty text on both sides.
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::invalid_repository(value)),
        }
    }
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
