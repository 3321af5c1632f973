use crate::error::{ChangelogError, Result};
use crate::git::{CommitInfo, CommitWalk, Repository, TagRef};
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<TagRef>,
    branches: HashMap<String, Vec<CommitInfo>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            branches: HashMap::new(),
        }
    }

    /// Add a tag pointing at a commit hash, annotated when `tagged_at` is set
    pub fn add_tag(
        &mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        tagged_at: Option<i64>,
    ) {
        self.tags.push(TagRef {
            name: name.into(),
            target: target.into(),
            tagged_at,
        });
    }

    /// Set the commits of a branch, newest first
    pub fn set_branch(&mut self, branch: impl Into<String>, commits: Vec<CommitInfo>) {
        self.branches.insert(branch.into(), commits);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let mut tags = self.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn walk_branch(&self, rev: &str) -> Result<CommitWalk<'_>> {
        let commits = self
            .branches
            .get(rev)
            .ok_or_else(|| ChangelogError::branch(format!("Branch not found: {}", rev)))?;

        Ok(Box::new(commits.iter().cloned().map(Ok::<_, ChangelogError>)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str) -> CommitInfo {
        CommitInfo {
            hash: hash.to_string(),
            message: "test commit".to_string(),
            parents: vec![],
        }
    }

    #[test]
    fn test_mock_repository_walk_keeps_order() {
        let mut repo = MockRepository::new();
        repo.set_branch("main", vec![commit("c2"), commit("c1")]);

        let hashes: Vec<String> = repo
            .walk_branch("main")
            .unwrap()
            .map(|c| c.unwrap().hash)
            .collect();

        assert_eq!(hashes, vec!["c2", "c1"]);
    }

    #[test]
    fn test_mock_repository_unknown_branch() {
        let repo = MockRepository::new();
        assert!(matches!(
            repo.walk_branch("main"),
            Err(ChangelogError::Branch(_))
        ));
    }

    #[test]
    fn test_mock_repository_list_tags_sorted() {
        let mut repo = MockRepository::new();
        repo.add_tag("v2.0.0", "b", None);
        repo.add_tag("v1.0.0", "a", Some(0));

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "v1.0.0");
        assert_eq!(tags[0].tagged_at, Some(0));
        assert_eq!(tags[1].name, "v2.0.0");
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
    }
}
