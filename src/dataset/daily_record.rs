use crate::facts::RepoMetrics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header line of a CSV dataset. Columns follow the field order of [`DailyRecord`].
pub const CSV_HEADER: &str = "date,stargazers,commits,contributors,traffic_views,traffic_uniques,clones_count,clones_uniques";

/// One day's snapshot of repository metrics.
///
/// Stars, commits and contributors are cumulative totals at the time the record was created,
/// while the traffic and clone fields count activity on `date` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub stargazers: u64,
    pub commits: u64,
    pub contributors: u64,
    pub traffic_views: u64,
    pub traffic_uniques: u64,
    pub clones_count: u64,
    pub clones_uniques: u64,
}

impl DailyRecord {
    /// Build the record for `date` from freshly collected metrics.
    #[must_use]
    pub const fn from_metrics(date: NaiveDate, metrics: &RepoMetrics) -> Self {
        Self {
            date,
            stargazers: metrics.stats.stargazer_count,
            commits: metrics.stats.commit_count,
            contributors: metrics.stats.contributors_count,
            traffic_views: metrics.traffic.count,
            traffic_uniques: metrics.traffic.uniques,
            clones_count: metrics.clones.count,
            clones_uniques: metrics.clones.uniques,
        }
    }

    /// The record's date in `YYYY-MM-DD` form, as it appears in both dataset formats.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{DailyCount, RepoStats};

    fn sample() -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            stargazers: 10,
            commits: 100,
            contributors: 2,
            traffic_views: 84,
            traffic_uniques: 1,
            clones_count: 10,
            clones_uniques: 1,
        }
    }

    #[test]
    fn test_from_metrics() {
        let metrics = RepoMetrics {
            stats: RepoStats {
                stargazer_count: 10,
                commit_count: 100,
                contributors_count: 2,
            },
            traffic: DailyCount { count: 84, uniques: 1 },
            clones: DailyCount { count: 10, uniques: 1 },
        };

        let record = DailyRecord::from_metrics(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(), &metrics);
        assert_eq!(record, sample());
    }

    #[test]
    fn test_json_key_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-09-02","stargazers":10,"commits":100,"contributors":2,"traffic_views":84,"traffic_uniques":1,"clones_count":10,"clones_uniques":1}"#
        );
    }

    #[test]
    fn test_csv_header_matches_field_order() {
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            writer.serialize(sample()).unwrap();
            writer.flush().unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some(CSV_HEADER));
        assert_eq!(text.lines().nth(1), Some("2024-09-02,10,100,2,84,1,10,1"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = r#"{"date":"2024-09-02","stargazers":1,"commits":1,"contributors":1,"traffic_views":1,"traffic_uniques":1,"clones_count":1,"clones_uniques":1,"forks":3}"#;
        let _ = serde_json::from_str::<DailyRecord>(json).unwrap_err();
    }

    #[test]
    fn test_date_string() {
        assert_eq!(sample().date_string(), "2024-09-02");
    }
}
