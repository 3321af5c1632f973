//! Grouping of pull requests by the release they shipped in.
//!
//! Commits are walked newest first. A tagged commit is a boundary: pull
//! requests seen before reaching it belong to the newer bucket, the tagged
//! commit itself and everything older belong to the tag's bucket, until the
//! next boundary.
//!
//! A boundary reached while the current bucket is still empty does not move
//! the label. The pull requests that follow stay with the newer label and
//! the tag gets no section of its own.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::commit::{MergeShape, PullRequest};
use crate::domain::tag::Tag;
use crate::error::Result;
use crate::git::CommitInfo;

/// Pull requests attributed to one release, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBucket {
    pub tag: Tag,
    pub pull_requests: Vec<PullRequest>,
}

impl ReleaseBucket {
    pub fn new(tag: Tag) -> Self {
        ReleaseBucket {
            tag,
            pull_requests: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pull_requests.is_empty()
    }
}

/// Non-empty release buckets, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    buckets: Vec<ReleaseBucket>,
}

impl History {
    pub fn buckets(&self) -> &[ReleaseBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn pull_request_count(&self) -> usize {
        self.buckets.iter().map(|b| b.pull_requests.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReleaseBucket> {
        self.buckets.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a ReleaseBucket;
    type IntoIter = std::slice::Iter<'a, ReleaseBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Accumulator threaded through the commit walk: sealed buckets plus the
/// bucket still being filled.
#[derive(Debug)]
struct HistoryWalk<'t> {
    tags: &'t HashMap<String, Tag>,
    sealed: Vec<ReleaseBucket>,
    pending: ReleaseBucket,
}

impl<'t> HistoryWalk<'t> {
    fn new(tags: &'t HashMap<String, Tag>, target: Tag) -> Self {
        HistoryWalk {
            tags,
            sealed: Vec::new(),
            pending: ReleaseBucket::new(target),
        }
    }

    fn step(mut self, commit: &CommitInfo) -> Self {
        if let Some(tag) = self.tags.get(&commit.hash).cloned() {
            self.cross_boundary(tag);
        }

        match MergeShape::of(commit).into_pull_request() {
            Some(pr) => self.pending.pull_requests.push(pr),
            None if commit.parents.len() > 1 => {
                trace!(commit = %commit.hash, "merge commit is not a pull request merge");
            }
            None => {}
        }

        self
    }

    // The label only advances when a non-empty bucket is sealed.
    fn cross_boundary(&mut self, tag: Tag) {
        if self.pending.is_empty() {
            debug!(
                tag = %tag.name,
                label = %self.pending.tag.name,
                "boundary with no pull requests, label kept"
            );
            return;
        }

        debug!(tag = %tag.name, "crossed release boundary");
        let finished = std::mem::replace(&mut self.pending, ReleaseBucket::new(tag));
        self.sealed.push(finished);
    }

    fn finish(mut self) -> History {
        if !self.pending.is_empty() {
            self.sealed.push(self.pending);
        }
        History {
            buckets: self.sealed,
        }
    }
}

/// Group pull requests from a newest-first commit stream by release tag.
///
/// `tags` maps commit ids to release tags, `target` labels everything merged
/// after the newest tag. Failures from the stream abort the walk.
pub fn process_commits<I>(
    commits: I,
    tags: &HashMap<String, Tag>,
    target: Tag,
) -> Result<History>
where
    I: IntoIterator<Item = Result<CommitInfo>>,
{
    let walk = commits
        .into_iter()
        .try_fold(HistoryWalk::new(tags, target), |walk, commit| {
            commit.map(|c| walk.step(&c))
        })?;

    Ok(walk.finish())
}

/// Infallible variant of [`process_commits`] for commits already in memory
pub fn group_commits<I>(commits: I, tags: &HashMap<String, Tag>, target: Tag) -> History
where
    I: IntoIterator<Item = CommitInfo>,
{
    commits
        .into_iter()
        .fold(HistoryWalk::new(tags, target), |walk, commit| walk.step(&commit))
        .finish()
}
