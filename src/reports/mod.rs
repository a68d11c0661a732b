//! Reporting of collected metrics.
//!
//! Two consumers see the numbers gathered for a run: whoever reads the job log gets a
//! human-readable summary, and later workflow steps get the same values as `name=value`
//! output pairs.

mod action_outputs;
mod console;

pub use action_outputs::{append_outputs, format_outputs};
pub use console::generate as generate_console;
