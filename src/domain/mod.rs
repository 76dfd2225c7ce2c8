//! Core domain types and models
//!
//! Defines the extracted `Unit`, the per-run `Registry`, the `Dialect` tokens
//! that drive extraction and emission, and the run configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default name of the merged output artifact.
pub const DEFAULT_OUTPUT_FILE: &str = "merged_project.go";

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One eligible source file, split into declaration, dependencies and body.
///
/// Lines are raw bytes so that content which is not valid UTF-8 passes
/// through the merge unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    /// Declared package name; empty when the file has no recognized declaration
    pub module_name: Vec<u8>,

    /// Trimmed lines found inside dependency blocks, in source order
    pub dependencies: Vec<Vec<u8>>,

    /// Every other line, untrimmed, without its line terminator, in source order
    pub body: Vec<Vec<u8>>,
}

impl Unit {
    pub fn has_module_name(&self) -> bool {
        !self.module_name.is_empty()
    }

    /// Package name for logs and messages.
    pub fn display_name(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.module_name)
    }
}

/// Ordered, append-only collection of the units found during one run.
///
/// Order is the walker's traversal order. Units without a module name are
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    units: Vec<Unit>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit. Returns `false` (and drops the unit) when it has no module name.
    pub fn push(&mut self, unit: Unit) -> bool {
        if !unit.has_module_name() {
            return false;
        }
        self.units.push(unit);
        true
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }
}

/// Textual tokens used to classify input lines and to build the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Prefix of a module declaration line, including the trailing space
    #[serde(default = "default_package_prefix")]
    pub package_prefix: String,

    /// Whole-line token that opens a dependency block
    #[serde(default = "default_block_opener")]
    pub block_opener: String,

    /// Whole-line token that closes a dependency block
    #[serde(default = "default_block_closer")]
    pub block_closer: String,

    /// Prefix of a trimmed body line that defines the entry point
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Suffix a file name must end with to be read
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,

    /// Suffix that excludes a file even when it ends with `source_suffix`
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,

    /// Package name written at the top of the merged output
    #[serde(default = "default_output_package")]
    pub output_package: String,

    /// Comment prefix written before each unit's original package name
    #[serde(default = "default_annotation_prefix")]
    pub annotation_prefix: String,

    /// Lines appended after a blank line when no entry point exists
    #[serde(default = "default_entry_point_stub")]
    pub entry_point_stub: Vec<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            package_prefix: default_package_prefix(),
            block_opener: default_block_opener(),
            block_closer: default_block_closer(),
            entry_point: default_entry_point(),
            source_suffix: default_source_suffix(),
            test_suffix: default_test_suffix(),
            output_package: default_output_package(),
            annotation_prefix: default_annotation_prefix(),
            entry_point_stub: default_entry_point_stub(),
        }
    }
}

impl Dialect {
    /// Suffix test on the full path string, not extension-aware.
    pub fn is_source_file(&self, path: &str) -> bool {
        path.ends_with(&self.source_suffix) && !path.ends_with(&self.test_suffix)
    }
}

fn default_package_prefix() -> String {
    "package ".to_string()
}
fn default_block_opener() -> String {
    "import (".to_string()
}
fn default_block_closer() -> String {
    ")".to_string()
}
fn default_entry_point() -> String {
    "func main()".to_string()
}
fn default_source_suffix() -> String {
    ".go".to_string()
}
fn default_test_suffix() -> String {
    "_test.go".to_string()
}
fn default_output_package() -> String {
    "main".to_string()
}
fn default_annotation_prefix() -> String {
    "// Original package: ".to_string()
}
fn default_entry_point_stub() -> Vec<String> {
    vec!["func main() {".into(), "\t// TODO: Add main logic here".into(), "}".into()]
}

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Root directory to walk; only ever set from the command line
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Output artifact path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional JSON run report path
    #[serde(default)]
    pub report: Option<PathBuf>,

    /// Print merged text instead of writing the artifact
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub dialect: Dialect,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            root: None,
            output: default_output(),
            report: None,
            dry_run: false,
            dialect: Dialect::default(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// Counters collected while walking and emitting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Filesystem entries visited, directories included
    pub entries_visited: usize,

    /// Source files read and extracted
    pub files_read: usize,

    /// Files skipped because they matched the test suffix
    pub files_skipped_test: usize,

    /// Files read but dropped for lacking a module declaration
    pub files_without_package: usize,

    /// Units stored in the registry
    pub units_merged: usize,

    /// Dependency lines across all units, duplicates included
    pub dependency_lines: usize,

    /// Dependency lines after deduplication
    pub unique_dependencies: usize,

    /// Whether a placeholder entry point was appended
    pub entry_point_synthesized: bool,
}

impl MergeStats {
    /// Report payload written by `--report`.
    pub fn to_report_value(&self, config: &MergeConfig) -> serde_json::Value {
        serde_json::json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "config": {
                "root":   config.root.as_ref().map(|p| p.to_string_lossy().to_string()),
                "output": config.output.to_string_lossy(),
                "dry_run": config.dry_run,
                "dialect": config.dialect,
            },
            "stats": self,
        })
    }
}
