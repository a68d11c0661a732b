//! Command-line interface and orchestration
//!
//! Two subcommands drive the pipeline:
//!
//! - **update**: collect the day's metrics, report them, merge them into the dataset file kept on
//!   the storage branch, and commit the result. With `--dry-run` the merged dataset is printed
//!   instead of committed.
//! - **collect**: collect and report only. Storage is never touched.
//!
//! Configuration comes from flags with environment fallbacks, so the tool runs unchanged inside a
//! CI step that exports its inputs as `INPUT_*` variables. Every failure is surfaced once, as a
//! workflow error annotation on the host's error stream, before `run` returns it.

mod collect;
mod common;
mod host;
mod run;
mod update;

pub use collect::{CollectArgs, collect_stats};
pub use common::{Common, CommonArgs, LogLevel, yesterday};
pub use host::Host;
pub use run::run;
pub use update::{UpdateArgs, update_stats};
