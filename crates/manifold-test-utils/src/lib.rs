//! Shared test utilities for the manifold workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`git`] — git repositories with committed content, built with `git2`
//! - [`fixtures`] — overlay trees used across the workspace tests

pub mod fixtures;
pub mod git;

pub use git::TestRepo;
