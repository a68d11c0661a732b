use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A day's tally of views or clones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub count: u64,
    pub uniques: u64,
}

/// One bucket of a per-day traffic series
#[derive(Debug, Deserialize)]
pub struct TrafficEntry {
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    pub uniques: u64,
}

/// Response of the `traffic/views` endpoint
#[derive(Debug, Deserialize)]
pub struct ViewsResponse {
    #[serde(default)]
    pub views: Vec<TrafficEntry>,
}

/// Response of the `traffic/clones` endpoint
#[derive(Debug, Deserialize)]
pub struct ClonesResponse {
    #[serde(default)]
    pub clones: Vec<TrafficEntry>,
}

/// Pick the bucket for `day` out of a per-day series, or zero counts if the day has none.
#[must_use]
pub fn select_day(entries: &[TrafficEntry], day: NaiveDate) -> DailyCount {
    entries
        .iter()
        .find(|e| e.timestamp.date_naive() == day)
        .map_or_else(DailyCount::default, |e| DailyCount {
            count: e.count,
            uniques: e.uniques,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_select_matching_day() {
        let json = r#"{
            "count": 100,
            "uniques": 5,
            "views": [
                {"timestamp": "2024-08-31T00:00:00Z", "count": 16, "uniques": 4},
                {"timestamp": "2024-09-01T00:00:00Z", "count": 84, "uniques": 1}
            ]
        }"#;

        let response: ViewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(select_day(&response.views, day(1)), DailyCount { count: 84, uniques: 1 });
    }

    #[test]
    fn test_select_missing_day_defaults_to_zero() {
        let json = r#"{"clones": [{"timestamp": "2024-08-30T00:00:00Z", "count": 3, "uniques": 2}]}"#;

        let response: ClonesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(select_day(&response.clones, day(1)), DailyCount::default());
    }

    #[test]
    fn test_select_from_empty_series() {
        let response: ClonesResponse = serde_json::from_str(r#"{"count": 0, "uniques": 0, "clones": []}"#).unwrap();
        assert_eq!(select_day(&response.clones, day(1)), DailyCount { count: 0, uniques: 0 });
    }

    #[test]
    fn test_missing_series_field_is_empty() {
        let response: ViewsResponse = serde_json::from_str(r#"{"count": 0, "uniques": 0}"#).unwrap();
        assert!(response.views.is_empty());
    }

    #[test]
    fn test_select_uses_utc_calendar_day() {
        let json = r#"{"views": [{"timestamp": "2024-09-01T23:59:59Z", "count": 2, "uniques": 2}]}"#;

        let response: ViewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(select_day(&response.views, day(1)), DailyCount { count: 2, uniques: 2 });
        assert_eq!(select_day(&response.views, day(2)), DailyCount::default());
    }
}
