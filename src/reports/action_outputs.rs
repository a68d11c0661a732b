use crate::Result;
use crate::facts::RepoMetrics;
use camino::Utf8Path;
use core::fmt::Write as _;
use ohno::IntoAppError;
use std::fs::OpenOptions;
use std::io::Write as _;

/// Render `metrics` as `name=value` lines, in the order later steps expect them.
#[must_use]
pub fn format_outputs(metrics: &RepoMetrics) -> String {
    let values = [
        ("stargazers", metrics.stats.stargazer_count),
        ("commits", metrics.stats.commit_count),
        ("contributors", metrics.stats.contributors_count),
        ("traffic_views", metrics.traffic.count),
        ("traffic_uniques", metrics.traffic.uniques),
        ("clones_count", metrics.clones.count),
        ("clones_uniques", metrics.clones.uniques),
    ];

    let mut out = String::new();
    for (name, value) in values {
        let _ = writeln!(out, "{name}={value}");
    }
    out
}

/// Append the output lines for `metrics` to the file at `path`, creating it if needed.
pub fn append_outputs(path: &Utf8Path, metrics: &RepoMetrics) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .into_app_err_with(|| format!("opening outputs file '{path}'"))?;

    file.write_all(format_outputs(metrics).as_bytes())
        .into_app_err_with(|| format!("writing outputs file '{path}'"))
}
