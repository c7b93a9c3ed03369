//! tagship CLI library.
//!
//! The binary is a thin wrapper: parse [`cli::Cli`], initialize
//! [`tracing`](crate::tracing), then run [`publish::execute`].

#![warn(missing_docs)]

pub mod annotations;
pub mod cli;
pub mod publish;
pub mod tracing;
