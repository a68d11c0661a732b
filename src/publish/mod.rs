//! Reading and committing the dataset file on a branch.
//!
//! Publishing is a read-modify-write over the Git data API: read the branch tip, layer a new tree
//! holding the file on top of the tip's tree, commit it, and advance the branch. The ref update is
//! fast-forward only, so a concurrent writer that moved the branch in between makes the update
//! fail instead of discarding that writer's commit.

mod git_types;
mod publisher;

pub use publisher::{BranchState, Publisher};
