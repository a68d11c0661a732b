//! Daily records and the datasets that accumulate them.
//!
//! A dataset is the full history of [`DailyRecord`]s for one repository, serialized either as a
//! pretty-printed JSON array or as a CSV table. [`merge`] folds one new record into an existing
//! serialized dataset, replacing any record already present for the same date.

mod daily_record;
mod format;
mod merge;
mod storage_path;

pub use daily_record::{CSV_HEADER, DailyRecord};
pub use format::Format;
pub use merge::merge;
pub use storage_path::storage_path;
