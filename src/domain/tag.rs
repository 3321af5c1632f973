use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::git::TagRef;

/// Default release tag naming: `v<major>.<minor>.<patch>`
pub const DEFAULT_TAG_PATTERN: &str = r"^v\d+\.\d+\.\d+$";

/// A release tag, or the synthetic bucket for the upcoming release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Commit the tag points at; `None` for the unreleased bucket
    pub commit_id: Option<String>,
    /// Annotation date, absent for lightweight tags
    pub date: Option<NaiveDate>,
}

impl Tag {
    pub fn new(
        name: impl Into<String>,
        commit_id: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Tag {
            name: name.into(),
            commit_id: Some(commit_id.into()),
            date,
        }
    }

    /// The bucket collecting pull requests merged after the newest tag
    pub fn unreleased(name: impl Into<String>, today: NaiveDate) -> Self {
        Tag {
            name: name.into(),
            commit_id: None,
            date: Some(today),
        }
    }
}

/// Release tag naming pattern (a regular expression)
#[derive(Debug, Clone)]
pub struct TagPattern {
    source: String,
    regex: Regex,
}

impl TagPattern {
    /// Compile a tag pattern; malformed patterns are configuration errors
    ///
    /// The pattern must match the whole tag name, anchors are implied.
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)?;
        Ok(TagPattern {
            source: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Validate if a whole tag name matches this pattern
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new(DEFAULT_TAG_PATTERN).expect("default tag pattern is valid")
    }
}

/// Keep the tags whose name matches `pattern` and resolve their dates.
///
/// Annotated tags get the UTC calendar date of their tagger timestamp,
/// lightweight tags get no date.
pub fn fetch_release_tags(tags: &[TagRef], pattern: &TagPattern) -> Vec<Tag> {
    tags.iter()
        .filter(|t| pattern.matches(&t.name))
        .map(|t| Tag {
            name: t.name.clone(),
            commit_id: Some(t.target.clone()),
            date: t.tagged_at.and_then(utc_date),
        })
        .collect()
}

/// Lookup table from commit id to the release tag pointing at it.
///
/// When several tags share a commit the last one in `tags` wins.
pub fn index_by_commit(tags: Vec<Tag>) -> HashMap<String, Tag> {
    let mut index = HashMap::with_capacity(tags.len());
    for tag in tags {
        if let Some(id) = tag.commit_id.clone() {
            if let Some(previous) = index.insert(id, tag) {
                debug!(tag = %previous.name, "tag shadowed by another tag on the same commit");
            }
        }
    }
    index
}

fn utc_date(seconds: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}
