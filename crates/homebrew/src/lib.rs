//! Homebrew tap provider for tagship.
//!
//! This crate provides the [`HomebrewBackend`], a post-upload
//! [`ReleaseBackend`](tagship_release::ReleaseBackend) that renders a local
//! formula template and commits it to a tap repository.
//!
//! # Features
//!
//! - `{{ version }}` and `{{ <asset>_url }}` placeholder substitution
//! - Create-or-update commits through any
//!   [`ContentStore`](tagship_release::ContentStore)
//! - Configurable branch, formula directory and commit message
//!
//! # Example
//!
//! ```rust,ignore
//! use tagship_homebrew::{HomebrewBackend, HomebrewConfig};
//!
//! let config = HomebrewConfig::new("homebrew/app.rb", "acme/homebrew-tap")
//!     .with_branch("main");
//!
//! let backend = HomebrewBackend::new(config, store);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod backend;
pub mod formula;

pub use backend::{HomebrewBackend, HomebrewConfig};
