//! CLI argument merging with config

use crate::domain::MergeConfig;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub dry_run: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: MergeConfig, cli: CliOverrides) -> MergeConfig {
    if let Some(root) = cli.root {
        base_config.root = Some(root);
    }
    if let Some(output) = cli.output {
        base_config.output = output;
    }
    if let Some(report) = cli.report {
        base_config.report = Some(report);
    }
    if let Some(dry_run) = cli.dry_run {
        base_config.dry_run = dry_run;
    }

    base_config
}
