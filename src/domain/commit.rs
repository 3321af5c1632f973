use std::sync::LazyLock;

use regex::Regex;

use crate::git::CommitInfo;

/// `Merge pull request #<N> from <branch>`, blank line, title line.
static PR_MERGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge pull request #([0-9]+) from.*\n\n(.*)").expect("merge pattern is valid")
});

/// `<title> (#<N>)`, blank line, body line.
static SQUASH_MERGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*) \(#([0-9]+)\)\n\n(.*)").expect("squash pattern is valid")
});

/// A pull request recovered from a merge commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub message: String,
}

impl PullRequest {
    pub fn new(number: u64, message: impl Into<String>) -> Self {
        PullRequest {
            number,
            message: message.into(),
        }
    }
}

/// How a commit landed on the branch.
///
/// The variant is chosen by parent count first and then confirmed by the
/// message convention of that shape. A commit that does not fit its shape's
/// convention is `Unclassified`, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeShape {
    /// Two or more parents: `Merge pull request #N from ...`
    PullRequestMerge(PullRequest),
    /// Exactly one parent: `Title (#N)`
    SquashMerge(PullRequest),
    Unclassified,
}

impl MergeShape {
    /// Classify a commit from its message and parent count
    pub fn of(commit: &CommitInfo) -> Self {
        Self::from_parts(&commit.message, commit.parents.len())
    }

    /// Classify from the raw pieces a commit is made of
    ///
    /// Root commits (no parents) never represent a pull request.
    pub fn from_parts(message: &str, parent_count: usize) -> Self {
        match parent_count {
            0 => MergeShape::Unclassified,
            1 => parse_squash_merge(message)
                .map(MergeShape::SquashMerge)
                .unwrap_or(MergeShape::Unclassified),
            _ => parse_pr_merge(message)
                .map(MergeShape::PullRequestMerge)
                .unwrap_or(MergeShape::Unclassified),
        }
    }

    pub fn into_pull_request(self) -> Option<PullRequest> {
        match self {
            MergeShape::PullRequestMerge(pr) | MergeShape::SquashMerge(pr) => Some(pr),
            MergeShape::Unclassified => None,
        }
    }
}

/// Extract the pull request a commit merged, if any
pub fn classify(commit: &CommitInfo) -> Option<PullRequest> {
    MergeShape::of(commit).into_pull_request()
}

fn parse_pr_merge(message: &str) -> Option<PullRequest> {
    let captures = PR_MERGE_RE.captures(message)?;
    // Digit runs too long for u64 are treated as non-matching.
    let number = captures.get(1)?.as_str().parse().ok()?;
    let title = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    Some(PullRequest::new(number, title))
}

fn parse_squash_merge(message: &str) -> Option<PullRequest> {
    let captures = SQUASH_MERGE_RE.captures(message)?;
    let title = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let number = captures.get(2)?.as_str().parse().ok()?;

    Some(PullRequest::new(number, title))
}
