//! Directory walking and registry population

use crate::domain::{Dialect, MergeStats, Registry};
use crate::error::{MergeError, Result};
use crate::extract::UnitExtractor;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Walks a root directory and collects one unit per eligible source file.
pub struct TreeWalker<'a> {
    root: &'a Path,
    dialect: &'a Dialect,
    stats: MergeStats,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &'a Path, dialect: &'a Dialect) -> Self {
        Self { root, dialect, stats: MergeStats::default() }
    }

    /// Visit every entry under the root in file-name order.
    ///
    /// The first traversal or read error aborts the walk.
    pub fn walk(&mut self) -> Result<Registry> {
        let extractor = UnitExtractor::new(self.dialect);
        let mut registry = Registry::new();

        for entry in WalkDir::new(self.root).sort_by_file_name() {
            let entry = entry.map_err(|source| MergeError::Walk {
                path: source.path().unwrap_or(self.root).to_path_buf(),
                source,
            })?;
            self.stats.entries_visited += 1;

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let path_str = path.to_string_lossy();
            if !self.dialect.is_source_file(&path_str) {
                if path_str.ends_with(&self.dialect.test_suffix) {
                    debug!(path = %path.display(), "skipping test file");
                    self.stats.files_skipped_test += 1;
                }
                continue;
            }

            let bytes = fs::read(path)
                .map_err(|source| MergeError::Read { path: path.to_path_buf(), source })?;
            self.stats.files_read += 1;

            let unit = extractor.extract(&bytes);
            let module_name = unit.display_name().into_owned();
            if registry.push(unit) {
                debug!(path = %path.display(), package = %module_name, "extracted unit");
            } else {
                debug!(path = %path.display(), "no package clause, dropping file");
                self.stats.files_without_package += 1;
            }
        }

        self.stats.units_merged = registry.len();
        self.stats.dependency_lines = registry.iter().map(|u| u.dependencies.len()).sum();
        Ok(registry)
    }

    pub fn into_stats(self) -> MergeStats {
        self.stats
    }
}
