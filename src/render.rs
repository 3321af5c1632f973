//! Markdown rendering of a grouped release history.
//!
//! Output layout:
//!
//! ```text
//! # Changelog
//!
//! ## [v1.2.0](https://github.com/org/repo/tree/v1.2.0) (2023-03-01)
//!
//! [Full Changelog](https://github.com/org/repo/compare/v1.1.0...v1.2.0)
//!
//! **Merged pull requests:**
//!
//! - Add X [#5](https://github.com/org/repo/pull/5)
//! ```

use std::collections::HashMap;
use std::io::Write;

use crate::domain::{History, PullRequest, Tag};
use crate::error::Result;

/// Title of the top-level heading
pub const DEFAULT_HEADING: &str = "Changelog";

/// Shown in place of a pull request title that is empty
pub const UNKNOWN_MESSAGE: &str = "UNKNOWN";

const ESCAPED_CHARS: [char; 8] = ['(', ')', '_', '[', ']', '*', '<', '>'];

/// Backslash-escape characters with a meaning in Markdown link text
pub fn escape_message(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        if ESCAPED_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `- <title> [#<n>](<repo>/pull/<n>)`
pub fn format_pr(pr: &PullRequest, repo_url: &str) -> String {
    let escaped = escape_message(&pr.message);
    let message = match escaped.trim() {
        "" => UNKNOWN_MESSAGE,
        trimmed => trimmed,
    };

    format!("- {} [#{}]({}/pull/{})", message, pr.number, repo_url, pr.number)
}

/// `## [<tag>](<repo>/tree/<tag>)`, followed by ` (<date>)` when dated
pub fn format_tag(tag: &Tag, repo_url: &str) -> String {
    let date = tag
        .date
        .map(|d| format!(" ({})", d.format("%Y-%m-%d")))
        .unwrap_or_default();

    format!("## [{}]({}/tree/{}){}", tag.name, repo_url, tag.name, date)
}

pub fn format_full_changelog(tag_name: &str, preceding_tag_name: &str, repo_url: &str) -> String {
    format!(
        "[Full Changelog]({}/compare/{}...{})",
        repo_url, preceding_tag_name, tag_name
    )
}

/// Write the changelog for `history` with the default heading
pub fn format_history<W: Write + ?Sized>(
    history: &History,
    repo_url: &str,
    out: &mut W,
) -> Result<()> {
    write_changelog(history, repo_url, DEFAULT_HEADING, out)
}

/// Write the changelog for `history`, buckets in history order.
///
/// Each bucket links to the comparison with the bucket after it; the last
/// (oldest) bucket has none, but keeps the blank line that would follow the
/// link. Pull requests are listed highest number first.
pub fn write_changelog<W: Write + ?Sized>(
    history: &History,
    repo_url: &str,
    heading: &str,
    out: &mut W,
) -> Result<()> {
    let preceding = preceding_tag_names(history);

    writeln!(out, "# {}", heading)?;
    for bucket in history {
        writeln!(out)?;
        writeln!(out, "{}", format_tag(&bucket.tag, repo_url))?;
        writeln!(out)?;
        if let Some(previous) = preceding.get(bucket.tag.name.as_str()) {
            writeln!(
                out,
                "{}",
                format_full_changelog(&bucket.tag.name, previous, repo_url)
            )?;
        }
        writeln!(out)?;
        writeln!(out, "**Merged pull requests:**")?;
        writeln!(out)?;

        let mut pull_requests: Vec<&PullRequest> = bucket.pull_requests.iter().collect();
        pull_requests.sort_by(|a, b| b.number.cmp(&a.number));
        for pr in pull_requests {
            writeln!(out, "{}", format_pr(pr, repo_url))?;
        }
    }

    Ok(())
}

// Pairs every bucket name with the name of the next older bucket. A repeated
// name keeps its last pairing.
fn preceding_tag_names(history: &History) -> HashMap<&str, &str> {
    let names: Vec<&str> = history.iter().map(|b| b.tag.name.as_str()).collect();
    names.windows(2).map(|pair| (pair[0], pair[1])).collect()
}
