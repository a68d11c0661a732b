use super::hosting::Client;
use super::repo_stats::{HISTORY_DEPTH, REPO_STATS_QUERY, RepoStatsData};
use super::traffic::{ClonesResponse, ViewsResponse, select_day};
use super::{DailyCount, RepoSpec, RepoStats};
use crate::Result;
use chrono::NaiveDate;
use ohno::{EnrichableExt, IntoAppError};
use serde::{Deserialize, Serialize};
use serde_json::json;

const LOG_TARGET: &str = "   collect";

/// Everything collected for one repository and reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetrics {
    pub stats: RepoStats,
    pub traffic: DailyCount,
    pub clones: DailyCount,
}

/// Collects metrics for a single repository
#[derive(Debug, Clone)]
pub struct Collector<'a> {
    client: &'a Client,
    repo: &'a RepoSpec,
}

impl<'a> Collector<'a> {
    #[must_use]
    pub const fn new(client: &'a Client, repo: &'a RepoSpec) -> Self {
        Self { client, repo }
    }

    /// Collect traffic and clones for `date` together with the repository's lifetime totals.
    ///
    /// The three lookups run concurrently; the first failure aborts the collection.
    pub async fn collect(&self, date: NaiveDate) -> Result<RepoMetrics> {
        log::info!(target: LOG_TARGET, "Querying statistics for repository '{}' on {date}", self.repo);

        let (traffic, clones, stats) = tokio::try_join!(self.traffic(date), self.clones(date), self.repo_stats())?;

        log::debug!(target: LOG_TARGET, "Collected statistics for repository '{}'", self.repo);

        Ok(RepoMetrics { stats, traffic, clones })
    }

    /// Views recorded on `date`, or zero when the series has no entry for that day.
    pub async fn traffic(&self, date: NaiveDate) -> Result<DailyCount> {
        let url = self.traffic_url("views");
        let response: ViewsResponse = self
            .client
            .get_json(url)
            .await
            .into_result("traffic views")
            .map_err(|e| e.enrich_with(|| format!("fetching traffic views for repository '{}'", self.repo)))?;

        Ok(select_day(&response.views, date))
    }

    /// Clones recorded on `date`, or zero when the series has no entry for that day.
    pub async fn clones(&self, date: NaiveDate) -> Result<DailyCount> {
        let url = self.traffic_url("clones");
        let response: ClonesResponse = self
            .client
            .get_json(url)
            .await
            .into_result("clone traffic")
            .map_err(|e| e.enrich_with(|| format!("fetching clone traffic for repository '{}'", self.repo)))?;

        Ok(select_day(&response.clones, date))
    }

    /// Star count, default-branch commit count, and distinct recent contributors.
    pub async fn repo_stats(&self) -> Result<RepoStats> {
        let variables = json!({
            "owner": self.repo.owner(),
            "name": self.repo.repo(),
            "historyDepth": HISTORY_DEPTH,
        });

        let data: RepoStatsData = self
            .client
            .graphql(REPO_STATS_QUERY, variables)
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching repository statistics for '{}'", self.repo)))?;

        let repository = data
            .repository
            .into_app_err_with(|| format!("repository '{}' not found", self.repo))?;

        Ok(repository.stats())
    }

    fn traffic_url(&self, kind: &str) -> url::Url {
        let mut url = self
            .client
            .endpoint(["repos", self.repo.owner(), self.repo.repo(), "traffic", kind]);
        let _ = url.query_pairs_mut().append_pair("per", "day");
        url
    }
}
