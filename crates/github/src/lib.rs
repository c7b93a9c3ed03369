//! GitHub provider for tagship.
//!
//! [`GitHubClient`] implements both host interfaces from `tagship-release`
//! on top of octocrab:
//! - [`ReleaseHost`](tagship_release::ReleaseHost) - release lookup by tag,
//!   release creation and asset uploads
//! - [`ContentStore`](tagship_release::ContentStore) - single-file commits
//!   through the repository contents API, used for Homebrew tap updates

#![warn(missing_docs)]

mod client;
mod contents;
mod release;

pub use client::GitHubClient;
