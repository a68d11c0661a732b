//! Data collection from the hosting platform.
//!
//! The [`Collector`] gathers one day's worth of metrics for a repository through the hosting
//! [`Client`](hosting::Client): traffic views and clones for the reference date, plus lifetime
//! totals for stars, commits and contributors. The three lookups are issued concurrently and
//! any failure aborts the collection.

mod collector;
pub mod hosting;
mod repo_spec;
mod repo_stats;
mod traffic;

pub use collector::{Collector, RepoMetrics};
pub use repo_spec::RepoSpec;
pub use repo_stats::RepoStats;
pub use traffic::DailyCount;
