//! JSON run report

use crate::domain::{MergeConfig, MergeStats};
use crate::error::{MergeError, Result};
use std::fs;
use std::path::Path;

pub fn write_report(path: &Path, stats: &MergeStats, config: &MergeConfig) -> Result<()> {
    let value = stats.to_report_value(config);
    let mut text = serde_json::to_string_pretty(&value)
        .map_err(|e| MergeError::emit(path, std::io::Error::other(e)))?;
    text.push('\n');
    fs::write(path, text).map_err(|e| MergeError::emit(path, e))
}
