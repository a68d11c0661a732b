//! Setup shared by the update and collect commands.

use super::Host;
use crate::Result;
use crate::facts::hosting::{Client, DEFAULT_API_URL};
use crate::facts::{Collector, RepoMetrics, RepoSpec};
use crate::reports::{append_outputs, generate_console};
use camino::Utf8PathBuf;
use chrono::{DateTime, Days, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::io::Write;

const LOG_TARGET: &str = "  commands";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the update and collect commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Token used to authenticate API calls
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Account owning the measured repository
    #[arg(long, value_name = "OWNER", env = "INPUT_OWNER")]
    pub owner: String,

    /// Name of the measured repository
    #[arg(long, value_name = "NAME", env = "INPUT_REPOSITORY")]
    pub repository: String,

    /// Day to record, as YYYY-MM-DD (default is yesterday, UTC)
    #[arg(long, value_name = "DATE", env = "INPUT_DATE")]
    pub date: Option<NaiveDate>,

    /// Root URL of the REST API
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// GraphQL endpoint (default is `<api-url>/graphql`)
    #[arg(long, value_name = "URL", env = "GITHUB_GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    /// File that receives `name=value` output lines
    #[arg(long, value_name = "PATH", env = "GITHUB_OUTPUT")]
    pub github_output: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: LogLevel,
}

/// State shared by both commands once configuration has been validated
pub struct Common<'a, H: Host> {
    pub client: Client,
    pub repo: RepoSpec,
    pub date: NaiveDate,
    host: &'a mut H,
    github_output: Option<Utf8PathBuf>,
}

impl<'a, H: Host> Common<'a, H> {
    /// Initialize logging, validate the repository and date, and create the API client.
    ///
    /// Nothing here touches the network.
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let repo = RepoSpec::new(&args.owner, &args.repository)?;
        let date = match args.date {
            Some(date) => date,
            None => yesterday(Utc::now())?,
        };

        let client = Client::new(Some(&args.token), &args.api_url, args.graphql_url.as_deref())?;

        log::debug!(target: LOG_TARGET, "Using API at {} and GraphQL at {}", client.api_url(), client.graphql_url());

        Ok(Self {
            client,
            repo,
            date,
            host,
            github_output: args.github_output.clone(),
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // a second run in the same process keeps the first logger
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Collect the metrics for the reference date and report them.
    pub async fn collect(&mut self) -> Result<RepoMetrics> {
        let metrics = Collector::new(&self.client, &self.repo).collect(self.date).await?;
        self.report(&metrics)?;
        Ok(metrics)
    }

    fn report(&mut self, metrics: &RepoMetrics) -> Result<()> {
        let mut summary = String::new();
        generate_console(metrics, &mut summary)?;
        let _ = write!(self.host.output(), "{summary}");

        if let Some(path) = &self.github_output {
            append_outputs(path, metrics)?;
            log::debug!(target: LOG_TARGET, "Wrote output values to '{path}'");
        }

        Ok(())
    }

    pub fn host(&mut self) -> &mut H {
        self.host
    }
}

/// The calendar day before `now`, in UTC.
pub fn yesterday(now: DateTime<Utc>) -> Result<NaiveDate> {
    now.date_naive()
        .checked_sub_days(Days::new(1))
        .into_app_err("computing the day before today")
}
