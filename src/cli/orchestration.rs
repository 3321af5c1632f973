//! Main workflow orchestration logic
//!
//! This module wires the components together for one run: resolve settings,
//! select release tags, group the branch history and render it. It is kept
//! apart from `main.rs` so the workflow can be driven without clap.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{fetch_release_tags, index_by_commit, process_commits, Tag, TagPattern};
use crate::error::{ChangelogError, Result};
use crate::git::{Git2Repository, Repository};
use crate::render::write_changelog;

/// Arguments for the changelog workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// Optional values fall back to the configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangelogWorkflowArgs {
    /// Branch whose history is described
    pub branch: Option<String>,

    /// Name of the upcoming release, used for unreleased pull requests
    pub next_tag: String,

    /// Base URL of the hosted repository
    pub repo_url: Option<String>,

    /// Release tag pattern overriding the configured one
    pub tag_pattern: Option<String>,

    /// Local repository location overriding the configured one
    pub repo_path: Option<PathBuf>,

    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
}

/// Fully resolved settings for one changelog
#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    pub branch: String,
    pub next_tag: String,
    pub repo_url: String,
    pub tag_pattern: TagPattern,
    pub heading: String,
    pub repo_path: PathBuf,
}

impl ChangelogRequest {
    /// Merge command line arguments over the configuration
    ///
    /// Fails when the branch or repository URL is given by neither, or the
    /// tag pattern does not compile.
    pub fn resolve(args: &ChangelogWorkflowArgs, config: &Config) -> Result<Self> {
        let branch = args
            .branch
            .clone()
            .or_else(|| config.repository.branch.clone())
            .ok_or_else(|| ChangelogError::config("No branch given (use --branch)"))?;

        let repo_url = args
            .repo_url
            .clone()
            .or_else(|| config.repository.url.clone())
            .ok_or_else(|| ChangelogError::config("No repository URL given (use --repo-url)"))?;

        let tag_pattern = match &args.tag_pattern {
            Some(pattern) => TagPattern::new(pattern)?,
            None => config.tags.compile()?,
        };

        Ok(ChangelogRequest {
            branch,
            next_tag: args.next_tag.clone(),
            repo_url,
            tag_pattern,
            heading: config.output.heading.clone(),
            repo_path: args
                .repo_path
                .clone()
                .unwrap_or_else(|| config.repository.path.clone()),
        })
    }
}

/// Counts reported after a changelog was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangelogSummary {
    pub releases: usize,
    pub pull_requests: usize,
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub summary: ChangelogSummary,

    /// Where the changelog went, for display
    pub destination: String,
}

/// Build the changelog for `request` from `repo` and write it to `out`.
///
/// `today` dates the unreleased bucket.
pub fn generate_changelog<R, W>(
    repo: &R,
    request: &ChangelogRequest,
    today: NaiveDate,
    out: &mut W,
) -> Result<ChangelogSummary>
where
    R: Repository + ?Sized,
    W: Write + ?Sized,
{
    let tags = fetch_release_tags(&repo.list_tags()?, &request.tag_pattern);
    info!(
        count = tags.len(),
        pattern = request.tag_pattern.as_str(),
        "selected release tags"
    );
    let tags_by_commit = index_by_commit(tags);

    let target = Tag::unreleased(request.next_tag.clone(), today);
    let history = process_commits(repo.walk_branch(&request.branch)?, &tags_by_commit, target)?;
    debug!(
        branch = %request.branch,
        releases = history.len(),
        "grouped branch history"
    );

    write_changelog(&history, &request.repo_url, &request.heading, out)?;

    Ok(ChangelogSummary {
        releases: history.len(),
        pull_requests: history.pull_request_count(),
    })
}

/// Main changelog workflow
///
/// Orchestrates one run:
/// 1. Resolve arguments against the configuration
/// 2. Open the git repository
/// 3. Open the output sink (file or stdout)
/// 4. Generate the changelog and flush the sink
///
/// Configuration problems are reported before the output is touched.
pub fn run_changelog_workflow(
    args: &ChangelogWorkflowArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<WorkflowResult> {
    let request = ChangelogRequest::resolve(args, config)?;
    let repo = Git2Repository::open(&request.repo_path)?;

    let (mut out, destination): (Box<dyn Write>, String) = match &args.output {
        Some(path) => (
            Box::new(BufWriter::new(File::create(path)?)),
            path.display().to_string(),
        ),
        None => (
            Box::new(BufWriter::new(io::stdout().lock())),
            "stdout".to_string(),
        ),
    };

    let summary = generate_changelog(&repo, &request, today, &mut out)?;
    out.flush()?;

    info!(
        releases = summary.releases,
        pull_requests = summary.pull_requests,
        destination = %destination,
        "changelog written"
    );

    Ok(WorkflowResult {
        summary,
        destination,
    })
}
