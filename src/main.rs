use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use pr_changelog::cli::orchestration::{run_changelog_workflow, ChangelogWorkflowArgs};
use pr_changelog::{config, telemetry, ui};

#[derive(clap::Parser)]
#[command(
    name = "pr-changelog",
    version,
    about = "Generate a Markdown changelog from merged pull requests"
)]
struct Args {
    #[arg(short, long, help = "Branch whose history is described")]
    branch: Option<String>,

    #[arg(short, long, help = "Name of the upcoming release")]
    next_tag: String,

    #[arg(short, long, help = "Base URL of the hosted repository")]
    repo_url: Option<String>,

    #[arg(short, long, help = "Write the changelog to this file instead of stdout")]
    file: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Regular expression release tags must match")]
    tag_pattern: Option<String>,

    #[arg(long, help = "Path to the git repository")]
    repo_path: Option<PathBuf>,

    #[arg(short, long, help = "Print debug diagnostics to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_tracing(if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    });

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = ChangelogWorkflowArgs {
        branch: args.branch,
        next_tag: args.next_tag,
        repo_url: args.repo_url,
        tag_pattern: args.tag_pattern,
        repo_path: args.repo_path,
        output: args.file,
    };

    ui::display_status(&format!(
        "Collecting pull requests for {}",
        workflow_args.next_tag
    ));
    let today = chrono::Utc::now().date_naive();
    match run_changelog_workflow(&workflow_args, &config, today) {
        Ok(result) => {
            ui::display_summary(&result.summary, &result.destination);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
