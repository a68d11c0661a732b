use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::bail;
use std::sync::Arc;

/// Identifies a repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        let owner = owner.trim();
        let repo = repo.trim().trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository: empty owner or repo name in '{owner}/{repo}'");
        }

        if owner.contains('/') || repo.contains('/') {
            bail!("invalid repository: '{owner}/{repo}' has too many path segments");
        }

        Ok(Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    /// Parse the `owner/name` form used by CI runners.
    pub fn parse(spec: &str) -> Result<Self> {
        let Some((owner, repo)) = spec.split_once('/') else {
            bail!("invalid repository '{spec}': expected 'owner/name'");
        };

        Self::new(owner, repo)
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl FromStr for RepoSpec {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_and_name() {
        let spec = RepoSpec::parse("tokio-rs/tokio").unwrap();

        assert_eq!(spec.owner(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
    }

    #[test]
    fn test_parse_strips_git_extension() {
        let spec = RepoSpec::parse("serde-rs/serde.git").unwrap();
        assert_eq!(spec.repo(), "serde");
    }

    #[test]
    fn test_parse_missing_separator() {
        let _ = RepoSpec::parse("tokio").unwrap_err();
    }

    #[test]
    fn test_parse_empty_owner() {
        let _ = RepoSpec::parse("/tokio").unwrap_err();
    }

    #[test]
    fn test_parse_empty_repo() {
        let _ = RepoSpec::parse("tokio-rs/").unwrap_err();
    }

    #[test]
    fn test_parse_extra_segments() {
        let _ = RepoSpec::parse("tokio-rs/tokio/tree").unwrap_err();
    }

    #[test]
    fn test_new_rejects_slash_in_owner() {
        let _ = RepoSpec::new("a/b", "c").unwrap_err();
    }

    #[test]
    fn test_display_trait() {
        let spec = RepoSpec::new("tokio-rs", "tokio").unwrap();
        assert_eq!(spec.to_string(), "tokio-rs/tokio");
    }

    #[test]
    fn test_from_str() {
        let spec: RepoSpec = "octo-org/widgets".parse().unwrap();
        assert_eq!(spec, RepoSpec::new("octo-org", "widgets").unwrap());
    }
}
