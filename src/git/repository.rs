use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, CommitWalk, TagRef};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn resolve_commit(&self, rev: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(rev)
            .map_err(|e| ChangelogError::branch(format!("Cannot find branch '{}': {}", rev, e)))?;

        let commit = object.peel_to_commit().map_err(|e| {
            ChangelogError::branch(format!("'{}' does not point at a commit: {}", rev, e))
        })?;

        Ok(commit.id())
    }

    fn commit_info(&self, oid: Oid) -> Result<CommitInfo> {
        let commit = self.repo.find_commit(oid)?;

        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let parents = commit.parent_ids().map(|id| id.to_string()).collect();

        Ok(CommitInfo {
            hash: oid.to_string(),
            message,
            parents,
        })
    }

    fn tag_ref(&self, name: &str) -> Result<Option<TagRef>> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

        let commit = match reference.peel_to_commit() {
            Ok(commit) => commit,
            Err(e) => {
                debug!(tag = name, error = %e, "tag does not point at a commit, skipped");
                return Ok(None);
            }
        };

        // Lightweight tags reference the commit directly; only annotated
        // tags have a tag object with a tagger.
        let tagged_at = reference
            .target()
            .and_then(|oid| self.repo.find_tag(oid).ok())
            .and_then(|tag| tag.tagger().map(|sig| sig.when().seconds()));

        Ok(Some(TagRef {
            name: name.to_string(),
            target: commit.id().to_string(),
            tagged_at,
        }))
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::with_capacity(names.len());
        for name in names.iter().flatten() {
            if let Some(tag) = self.tag_ref(name)? {
                tags.push(tag);
            }
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn walk_branch(&self, rev: &str) -> Result<CommitWalk<'_>> {
        let head = self.resolve_commit(rev)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        Ok(Box::new(revwalk.map(move |oid_result| -> Result<CommitInfo> {
            let oid = oid_result?;
            self.commit_info(oid)
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;

    #[test]
    fn test_open_missing_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Git2Repository::open(dir.path().join("nowhere"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_branch_is_branch_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(dir.path()).unwrap());

        let result = repo.walk_branch("does-not-exist");

        assert!(matches!(result, Err(ChangelogError::Branch(_))));
    }

    #[test]
    fn test_empty_repository_has_no_tags() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(dir.path()).unwrap());

        assert!(repo.list_tags().unwrap().is_empty());
    }
}
