//! repo-stats crate
//!
//! Collects daily statistics for a hosted repository (stars, commits, contributors, traffic views
//! and clones), merges them into a dataset file kept in a repository, and commits the result.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Hosting API client and metric collection
//! - [`dataset`]: Daily records and the JSON/CSV merge logic
//! - [`publish`]: Reading and committing the dataset file on a branch
//! - [`reports`]: Console summary and CI output values
//!
//! This crate's API is fluid and may change without warning and in a semver-incompatible way.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod dataset;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod publish;

#[doc(hidden)]
pub mod reports;

pub use crate::commands::{Host, run};
