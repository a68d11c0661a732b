use super::Format;
use crate::Result;
use crate::facts::RepoSpec;
use camino::{Utf8Component, Utf8Path};
use ohno::bail;

/// Repository path of the dataset file for `repo`: `<directory>/<owner>/<repo>/stats.<format>`.
///
/// The result is a path inside a repository tree, so `.` components and redundant separators are
/// dropped, a leading `/` is ignored, and `..` is refused.
pub fn storage_path(directory: &str, repo: &RepoSpec, format: Format) -> Result<String> {
    let file_name = format!("stats.{}", format.extension());
    let joined = Utf8Path::new(directory).join(repo.owner()).join(repo.repo()).join(file_name);

    let mut parts = Vec::new();
    for component in joined.components() {
        match component {
            Utf8Component::Normal(part) => parts.push(part),
            Utf8Component::CurDir | Utf8Component::RootDir => {}
            Utf8Component::ParentDir => bail!("stats directory '{directory}' must not contain '..'"),
            Utf8Component::Prefix(prefix) => bail!("stats directory '{directory}' has unsupported prefix '{}'", prefix.as_str()),
        }
    }

    Ok(parts.join("/"))
}
