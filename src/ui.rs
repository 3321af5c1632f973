//! Human-facing status lines.
//!
//! Everything goes to stderr; stdout may be carrying the changelog itself.

use console::style;

use crate::cli::orchestration::ChangelogSummary;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One-line recap of what was written and where.
pub fn format_summary(summary: &ChangelogSummary, destination: &str) -> String {
    let releases = match summary.releases {
        1 => "1 release".to_string(),
        n => format!("{} releases", n),
    };
    let pull_requests = match summary.pull_requests {
        1 => "1 pull request".to_string(),
        n => format!("{} pull requests", n),
    };

    format!("Wrote {} with {} to {}", pull_requests, releases, destination)
}

pub fn display_summary(summary: &ChangelogSummary, destination: &str) {
    display_success(&format_summary(summary, destination));
}
