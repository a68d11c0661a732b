use super::git_types::{CreateBlob, CreateCommit, CreateRef, CreateTree, FILE_MODE, GitCommit, GitObject, GitRef, TreeEntry, UpdateRef};
use crate::Result;
use crate::facts::RepoSpec;
use crate::facts::hosting::{ApiResult, Client};
use ohno::{EnrichableExt, bail};
use reqwest::Method;
use url::Url;

const LOG_TARGET: &str = "   publish";

/// Existence of a branch as seen by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchState {
    /// The branch exists and points at this commit
    Exists(String),

    /// The branch does not exist
    Missing,
}

/// Reads and writes files on branches of the storage repository
#[derive(Debug, Clone)]
pub struct Publisher<'a> {
    client: &'a Client,
    repo: &'a RepoSpec,
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub const fn new(client: &'a Client, repo: &'a RepoSpec) -> Self {
        Self { client, repo }
    }

    /// Raw contents of the file at `path` on `branch`, or `None` if there is no such file.
    ///
    /// Only a 404 means "absent"; every other failure is returned as an error.
    pub async fn read_file(&self, path: &str, branch: &str) -> Result<Option<String>> {
        let mut url = self.repo_endpoint(["contents"].into_iter().chain(path.split('/')));
        let _ = url.query_pairs_mut().append_pair("ref", branch);

        log::debug!(target: LOG_TARGET, "Reading '{path}' from branch '{branch}' of '{}'", self.repo);

        let content = self
            .client
            .get_raw(url)
            .await
            .found()
            .map_err(|e| e.enrich_with(|| format!("reading '{path}' from branch '{branch}' of '{}'", self.repo)))?;

        if content.is_none() {
            log::info!(target: LOG_TARGET, "No file '{path}' on branch '{branch}' of '{}'", self.repo);
        }

        Ok(content)
    }

    /// Look up `branch`. Only a 404 is reported as [`BranchState::Missing`].
    pub async fn branch_state(&self, branch: &str) -> Result<BranchState> {
        let url = self.ref_url("ref", branch);

        let state = match self.client.get_json::<GitRef>(url).await {
            ApiResult::Success(git_ref) => BranchState::Exists(git_ref.object.sha),
            ApiResult::NotFound => BranchState::Missing,
            ApiResult::Failed(e) => {
                return Err(e.enrich_with(|| format!("looking up branch '{branch}' of '{}'", self.repo)));
            }
        };

        Ok(state)
    }

    /// Make sure `branch` exists, creating it at the tip of `base` when it does not.
    pub async fn ensure_branch(&self, branch: &str, base: &str) -> Result<()> {
        if let BranchState::Exists(sha) = self.branch_state(branch).await? {
            log::debug!(target: LOG_TARGET, "Branch '{branch}' exists at {sha}");
            return Ok(());
        }

        let BranchState::Exists(base_sha) = self.branch_state(base).await? else {
            bail!("cannot create branch '{branch}': base branch '{base}' of '{}' not found", self.repo);
        };

        let body = CreateRef {
            git_ref: format!("refs/heads/{branch}"),
            sha: &base_sha,
        };

        let _: GitRef = self
            .client
            .send_json(Method::POST, self.git_url("refs"), &body)
            .await
            .into_result("refs endpoint")
            .map_err(|e| e.enrich_with(|| format!("creating branch '{branch}' of '{}'", self.repo)))?;

        log::info!(target: LOG_TARGET, "Branch '{branch}' created from '{base}' at {base_sha}");
        Ok(())
    }

    /// Commit `content` as the file at `path` on top of `branch` and advance the branch.
    ///
    /// Returns the SHA of the new commit.
    pub async fn publish(&self, branch: &str, path: &str, content: &str, message: &str) -> Result<String> {
        self.publish_inner(branch, path, content, message)
            .await
            .map_err(|e| e.enrich_with(|| format!("committing '{path}' to branch '{branch}' of '{}'", self.repo)))
    }

    async fn publish_inner(&self, branch: &str, path: &str, content: &str, message: &str) -> Result<String> {
        let BranchState::Exists(parent_sha) = self.branch_state(branch).await? else {
            bail!("branch '{branch}' not found");
        };

        let commit_url = self.repo_endpoint(["git", "commits", parent_sha.as_str()]);
        let parent: GitCommit = self.client.get_json(commit_url).await.into_result("parent commit")?;
        log::debug!(target: LOG_TARGET, "Branch '{branch}' is at {parent_sha} with tree {}", parent.tree.sha);

        let blob = CreateBlob { content, encoding: "utf-8" };
        let blob: GitObject = self
            .client
            .send_json(Method::POST, self.git_url("blobs"), &blob)
            .await
            .into_result("blobs endpoint")?;

        let tree = CreateTree {
            base_tree: &parent.tree.sha,
            tree: vec![TreeEntry {
                path,
                mode: FILE_MODE,
                kind: "blob",
                sha: &blob.sha,
            }],
        };
        let tree: GitObject = self
            .client
            .send_json(Method::POST, self.git_url("trees"), &tree)
            .await
            .into_result("trees endpoint")?;

        let commit = CreateCommit {
            message,
            tree: &tree.sha,
            parents: vec![&parent_sha],
        };
        let commit: GitObject = self
            .client
            .send_json(Method::POST, self.git_url("commits"), &commit)
            .await
            .into_result("commits endpoint")?;

        let update = UpdateRef {
            sha: &commit.sha,
            force: false,
        };
        let _: GitRef = self
            .client
            .send_json(Method::PATCH, self.ref_url("refs", branch), &update)
            .await
            .into_result(&format!("branch '{branch}'"))?;

        log::info!(target: LOG_TARGET, "Committed '{path}' to branch '{branch}' as {}", commit.sha);
        Ok(commit.sha)
    }

    fn repo_endpoint<'s>(&'s self, segments: impl IntoIterator<Item = &'s str>) -> Url {
        self.client
            .endpoint(["repos", self.repo.owner(), self.repo.repo()].into_iter().chain(segments))
    }

    fn git_url(&self, kind: &str) -> Url {
        self.repo_endpoint(["git", kind])
    }

    /// `git/<kind>/heads/<branch>`, where `kind` is `ref` for lookups and `refs` for updates
    fn ref_url(&self, kind: &str, branch: &str) -> Url {
        self.repo_endpoint(["git", kind, "heads"].into_iter().chain(branch.split('/')))
    }
}
