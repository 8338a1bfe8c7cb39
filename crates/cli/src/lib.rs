//! CompliantToken CLI - command orchestration
//!
//! This crate provides the `ctoken` binary. Every command reloads the token
//! from its journal, so the data directory is the only state.

pub mod commands;
pub mod context;

pub use context::{AppContext, CommitError};
