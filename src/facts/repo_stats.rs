use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of most recent default-branch commits scanned for distinct authors.
pub const HISTORY_DEPTH: u32 = 100;

pub const REPO_STATS_QUERY: &str = "
query($owner: String!, $name: String!, $historyDepth: Int!) {
  repository(owner: $owner, name: $name) {
    stargazerCount
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $historyDepth) {
            totalCount
            nodes {
              author {
                user {
                  login
                }
              }
            }
          }
        }
      }
    }
  }
}";

/// Lifetime totals for a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub stargazer_count: u64,
    pub commit_count: u64,
    pub contributors_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct RepoStatsData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub stargazer_count: u64,
    pub default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub target: Option<CommitTarget>,
}

/// The `history` member is absent when the branch points at something other than a commit
#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub history: Option<History>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<HistoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryNode {
    pub author: Option<Author>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub login: String,
}

impl RepositoryNode {
    /// Reduce the query result to the totals we record.
    #[must_use]
    pub fn stats(&self) -> RepoStats {
        let history = self
            .default_branch_ref
            .as_ref()
            .and_then(|b| b.target.as_ref())
            .and_then(|t| t.history.as_ref());

        RepoStats {
            stargazer_count: self.stargazer_count,
            commit_count: history.map_or(0, |h| h.total_count),
            contributors_count: history.map_or(0, |h| count_contributors(&h.nodes)),
        }
    }
}

/// Count distinct author logins. Commits without a resolvable user are skipped.
#[must_use]
pub fn count_contributors(nodes: &[HistoryNode]) -> u64 {
    let logins: HashSet<&str> = nodes
        .iter()
        .filter_map(|n| n.author.as_ref()?.user.as_ref())
        .map(|u| u.login.as_str())
        .collect();

    logins.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RepositoryNode {
        let data: RepoStatsData = serde_json::from_str(json).unwrap();
        data.repository.unwrap()
    }

    #[test]
    fn test_two_distinct_contributors() {
        let repo = parse(
            r#"{"repository": {"stargazerCount": 10, "defaultBranchRef": {"target": {"history": {
                "totalCount": 100,
                "nodes": [
                    {"author": {"user": {"login": "contributor1"}}},
                    {"author": {"user": {"login": "contributor2"}}}
                ]
            }}}}}"#,
        );

        assert_eq!(
            repo.stats(),
            RepoStats {
                stargazer_count: 10,
                commit_count: 100,
                contributors_count: 2,
            }
        );
    }

    #[test]
    fn test_unresolvable_authors_are_excluded() {
        let repo = parse(
            r#"{"repository": {"stargazerCount": 3, "defaultBranchRef": {"target": {"history": {
                "totalCount": 4,
                "nodes": [
                    {"author": {"user": {"login": "contributor1"}}},
                    {"author": {"user": null}},
                    {"author": null},
                    {"author": {"user": {"login": "contributor1"}}}
                ]
            }}}}}"#,
        );

        assert_eq!(repo.stats().contributors_count, 1);
        assert_eq!(repo.stats().commit_count, 4);
    }

    #[test]
    fn test_empty_history() {
        let repo = parse(
            r#"{"repository": {"stargazerCount": 0, "defaultBranchRef": {"target": {"history": {
                "totalCount": 0,
                "nodes": []
            }}}}}"#,
        );

        assert_eq!(repo.stats(), RepoStats::default());
    }

    #[test]
    fn test_repository_without_default_branch() {
        let repo = parse(r#"{"repository": {"stargazerCount": 7, "defaultBranchRef": null}}"#);

        assert_eq!(
            repo.stats(),
            RepoStats {
                stargazer_count: 7,
                commit_count: 0,
                contributors_count: 0,
            }
        );
    }

    #[test]
    fn test_non_commit_target() {
        let repo = parse(r#"{"repository": {"stargazerCount": 1, "defaultBranchRef": {"target": {}}}}"#);
        assert_eq!(repo.stats().commit_count, 0);
    }

    #[test]
    fn test_missing_repository() {
        let data: RepoStatsData = serde_json::from_str(r#"{"repository": null}"#).unwrap();
        assert!(data.repository.is_none());
    }
}
