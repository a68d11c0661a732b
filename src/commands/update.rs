use super::{Common, CommonArgs, Host};
use crate::Result;
use crate::dataset::{DailyRecord, Format, merge, storage_path};
use crate::facts::RepoSpec;
use crate::publish::Publisher;
use clap::Args;
use std::io::Write;

const LOG_TARGET: &str = "    update";

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Branch that holds the dataset file
    #[arg(long, value_name = "BRANCH", env = "INPUT_BRANCH")]
    pub branch: String,

    /// Directory under which the dataset file is kept
    #[arg(long, value_name = "PATH", env = "INPUT_DIRECTORY")]
    pub directory: String,

    /// Dataset format, either `json` or `csv`
    #[arg(long, value_name = "FORMAT", env = "INPUT_FORMAT")]
    pub format: String,

    /// Repository receiving the commit, as `owner/name` (default is the measured repository)
    #[arg(long, value_name = "OWNER/NAME", env = "GITHUB_REPOSITORY")]
    pub storage_repository: Option<String>,

    /// Branch whose tip seeds the dataset branch when it does not exist yet
    #[arg(long, value_name = "BRANCH", env = "INPUT_BASE_BRANCH", default_value = "main")]
    pub base_branch: String,

    /// Print the merged dataset instead of committing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Collect the reference day's record, merge it into the dataset file, and commit the result.
pub async fn update_stats<H: Host>(host: &mut H, args: &UpdateArgs) -> Result<()> {
    // configuration errors surface before any request is sent
    let format: Format = args.format.parse()?;
    let mut common = Common::new(host, &args.common)?;
    let path = storage_path(&args.directory, &common.repo, format)?;
    let storage = match &args.storage_repository {
        Some(spec) => spec.parse::<RepoSpec>()?,
        None => common.repo.clone(),
    };

    let metrics = common.collect().await?;
    let record = DailyRecord::from_metrics(common.date, &metrics);

    let publisher = Publisher::new(&common.client, &storage);
    let existing = publisher.read_file(&path, &args.branch).await?;

    log::info!(target: LOG_TARGET, "Merging record for {} into '{path}'", record.date_string());
    let merged = merge(existing.as_deref(), format, &record)?;

    if args.dry_run {
        log::info!(target: LOG_TARGET, "Dry run, not committing '{path}' to '{storage}'");
        let _ = writeln!(common.host().output(), "{merged}");
        return Ok(());
    }

    publisher.ensure_branch(&args.branch, &args.base_branch).await?;

    let message = format!("Update stats file for {}", common.repo);
    let sha = publisher.publish(&args.branch, &path, &merged, &message).await?;

    log::info!(target: LOG_TARGET, "Stats for {} committed to '{storage}' as {sha}", record.date_string());
    Ok(())
}
