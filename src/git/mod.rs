//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository reads
//! the changelog needs, allowing both real Git repositories and in-memory
//! mocks for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Code should depend on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use pr_changelog::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tags()?;
//! for commit in repo.walk_branch("main")? {
//!     let commit = commit?;
//!     println!("{} has {} parent(s)", commit.hash, commit.parents.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information needed for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The raw commit message
    pub message: String,
    /// Parent commit hashes, in order
    pub parents: Vec<String>,
}

/// A tag as stored in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Tag name without the `refs/tags/` prefix
    pub name: String,
    /// Hash of the commit the tag peels to
    pub target: String,
    /// Tagger timestamp (seconds since the epoch), annotated tags only
    pub tagged_at: Option<i64>,
}

/// Lazily produced commits, newest first
pub type CommitWalk<'a> = Box<dyn Iterator<Item = Result<CommitInfo>> + 'a>;

/// Read-only repository operations used to build a changelog
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations should map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::ChangelogError] variants.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation for mocking Git operations
pub trait Repository {
    /// Get all tags in the repository
    ///
    /// Tags that do not point (possibly through an annotation) at a commit
    /// are left out.
    ///
    /// # Returns
    /// * `Ok(Vec<TagRef>)` - Tags sorted by name
    /// * `Err` - If there's a Git error
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Walk the commits reachable from a revision
    ///
    /// Commits are produced newest first, children always before their
    /// parents. Errors met while walking are yielded in the stream.
    ///
    /// # Arguments
    /// * `rev` - Branch name or any other revision expression (e.g., "main", "origin/main")
    ///
    /// # Returns
    /// * `Ok(CommitWalk)` - Lazy iterator over the commits
    /// * `Err` - If the revision cannot be resolved to a commit
    fn walk_branch(&self, rev: &str) -> Result<CommitWalk<'_>>;
}
