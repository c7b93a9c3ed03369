//! Release publishing for tagship.
//!
//! This crate holds the provider-independent half of tagship: resolving the
//! run inputs, expanding file patterns, finding or creating the release for a
//! tag, uploading assets one by one, and running post-upload backends such
//! as the Homebrew formula update.
//!
//! # Architecture
//!
//! - [`config`] - input resolution, defaults, validation
//! - [`matcher`] - glob expansion of the `files` input
//! - [`host`] - [`ReleaseHost`] / [`ContentStore`] traits implemented by providers
//! - [`resolver`] - find-or-create of the release
//! - [`uploader`] - per-file uploads collected into an [`UploadReport`]
//! - [`backends`] - [`ReleaseBackend`] trait for post-upload steps
//! - [`orchestrator`] - the pipeline tying it all together
//!
//! # Example
//!
//! ```rust,ignore
//! use tagship_release::{Environment, Inputs, ReleaseOrchestrator, RepoSlug};
//!
//! let inputs = Inputs::resolve(&source, &Environment::from_process());
//! let report = ReleaseOrchestrator::new(inputs, RepoSlug::parse("owner/app")?, host)
//!     .run()
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod backends;
pub mod config;
pub mod error;
pub mod host;
pub mod matcher;
pub mod orchestrator;
pub mod resolver;
pub mod uploader;
pub mod version;

pub use backends::{BackendContext, PublishResult, ReleaseBackend};
pub use config::{Environment, HomebrewSettings, InputSource, Inputs, RepoSlug};
pub use error::{Error, Result};
pub use host::{
    AssetUpload, ContentStore, FileWrite, HostFuture, NewRelease, Release, ReleaseHost,
    RemoteFile, UploadedAsset,
};
pub use matcher::MatchedFile;
pub use orchestrator::{ReleaseOrchestrator, ReleaseReport};
pub use resolver::ResolvedRelease;
pub use uploader::{UploadFailure, UploadReport};
pub use version::release_version;
