use crate::Result;
use crate::facts::RepoMetrics;
use core::fmt::Write;

/// Write a summary of `metrics`, one total per line.
pub fn generate<W: Write>(metrics: &RepoMetrics, writer: &mut W) -> Result<()> {
    let lines = [
        ("Total Stargazers", metrics.stats.stargazer_count),
        ("Total Commits", metrics.stats.commit_count),
        ("Total Contributors", metrics.stats.contributors_count),
        ("Total Views Yesterday", metrics.traffic.count),
        ("Total Unique Views Yesterday", metrics.traffic.uniques),
        ("Total Clones Yesterday", metrics.clones.count),
        ("Total Unique Clones Yesterday", metrics.clones.uniques),
    ];

    for (label, value) in lines {
        writeln!(writer, "{label}: {value}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{DailyCount, RepoStats};

    #[test]
    fn test_generate_lists_every_total() {
        let metrics = RepoMetrics {
            stats: RepoStats {
                stargazer_count: 10,
                commit_count: 100,
                contributors_count: 2,
            },
            traffic: DailyCount { count: 84, uniques: 1 },
            clones: DailyCount { count: 10, uniques: 3 },
        };

        let mut out = String::new();
        generate(&metrics, &mut out).unwrap();

        assert_eq!(
            out,
            "Total Stargazers: 10\n\
             Total Commits: 100\n\
             Total Contributors: 2\n\
             Total Views Yesterday: 84\n\
             Total Unique Views Yesterday: 1\n\
             Total Clones Yesterday: 10\n\
             Total Unique Clones Yesterday: 3\n"
        );
    }
}
