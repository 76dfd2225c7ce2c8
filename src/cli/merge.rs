//! Merge command implementation

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::MergeStats;
use crate::error::MergeError;
use crate::render::{dependency_union, render_merged_bytes, write_merged, write_report};
use crate::scan::TreeWalker;

#[derive(Args)]
pub struct MergeArgs {
    /// Project directory to merge
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub root: Option<PathBuf>,

    /// Output file (default: merged_project.go in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the merged file to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let Some(root) = args.root.clone() else {
        return Err(MergeError::Usage.into());
    };

    let start_time = Instant::now();
    let file_config = load_config(args.config.as_deref())?;
    let cli_overrides = CliOverrides {
        root: Some(root.clone()),
        output: args.output.clone(),
        report: args.report.clone(),
        dry_run: if args.dry_run { Some(true) } else { None },
    };
    let config = merge_cli_with_config(file_config, cli_overrides);

    info!(root = %root.display(), "walking project");
    let mut walker = TreeWalker::new(&root, &config.dialect);
    let registry = walker.walk()?;
    let mut stats: MergeStats = walker.into_stats();
    stats.unique_dependencies = dependency_union(&registry).len();
    info!(units = registry.len(), "walk complete");
    if registry.is_empty() {
        warn!(root = %root.display(), "no files with a package clause found");
    }

    if config.dry_run {
        let (merged, synthesized) = render_merged_bytes(&registry, &config.dialect);
        stats.entry_point_synthesized = synthesized;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&merged)?;
        stdout.flush()?;
    } else {
        stats.entry_point_synthesized = write_merged(&config.output, &registry, &config.dialect)?;
        println!("Merged Go files written to {}", config.output.display());
    }

    if let Some(report_path) = config.report.as_deref() {
        write_report(report_path, &stats, &config)?;
        info!(path = %report_path.display(), "report written");
    }

    if !config.dry_run {
        print_summary(&stats, start_time.elapsed().as_secs_f64());
    }

    Ok(())
}

fn print_summary(stats: &MergeStats, elapsed: f64) {
    println!();
    println!("Statistics:");
    println!("  Files read:        {}", stats.files_read);
    println!("  Units merged:      {}", stats.units_merged);
    if stats.files_skipped_test > 0 {
        println!("  Test files skipped: {}", stats.files_skipped_test);
    }
    if stats.files_without_package > 0 {
        println!("  No package clause: {}", stats.files_without_package);
    }
    println!(
        "  Imports:           {} ({} unique)",
        stats.dependency_lines, stats.unique_dependencies
    );
    if stats.entry_point_synthesized {
        println!("  Entry point:       synthesized");
    }
    println!("  Processing time:   {:.2}s", elapsed);
}
