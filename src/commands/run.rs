//! Command dispatch logic for repo-stats

use super::{CollectArgs, UpdateArgs, collect_stats, update_stats};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-stats", version, author, long_about = None)]
#[command(about = "Record daily repository statistics into a dataset file committed to a branch")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: StatsSubcommand,
}

#[derive(Subcommand, Debug)]
enum StatsSubcommand {
    /// Collect today's record, merge it into the dataset file, and commit the result
    Update(Box<UpdateArgs>),
    /// Collect and report metrics without touching the dataset file
    Collect(Box<CollectArgs>),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// Any failure is written to the host's error stream as a workflow error annotation and then
/// returned, so the process exits with a non-zero status.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    let result = match &cli.command {
        StatsSubcommand::Update(update_args) => update_stats(host, update_args).await,
        StatsSubcommand::Collect(collect_args) => collect_stats(host, collect_args).await,
    };

    if let Err(e) = &result {
        let _ = writeln!(host.error(), "::error::Stats update failed: {e:#}");
    }

    result
}
