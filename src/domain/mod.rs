//! Domain logic - pure changelog rules independent of git operations

pub mod commit;
pub mod history;
pub mod tag;

pub use commit::{classify, MergeShape, PullRequest};
pub use history::{group_commits, process_commits, History, ReleaseBucket};
pub use tag::{fetch_release_tags, index_by_commit, Tag, TagPattern, DEFAULT_TAG_PATTERN};
