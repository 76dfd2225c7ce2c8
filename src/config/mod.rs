//! Configuration loading
//!
//! Defaults are layered with an optional TOML file, then CLI overrides.

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use crate::domain::MergeConfig;
use crate::error::{MergeError, Result};
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;

/// Load configuration from defaults plus an optional explicit TOML file.
pub fn load_config(config_path: Option<&Path>) -> Result<MergeConfig> {
    let mut figment = Figment::from(Serialized::defaults(MergeConfig::default()));

    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(MergeError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment.extract().map_err(|e| MergeError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use crate::domain::MergeConfig;
    use crate::error::MergeError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn no_file_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config, MergeConfig::default());
        assert_eq!(config.output, PathBuf::from("merged_project.go"));
    }

    #[test]
    fn toml_file_overrides_selected_keys() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("go-merge.toml");
        fs::write(
            &path,
            "output = \"bundle.go\"\n\n[dialect]\noutput_package = \"bundle\"\ntest_suffix = \"_spec.go\"\n",
        )
        .expect("write config");

        let config = load_config(Some(path.as_path())).expect("load");
        assert_eq!(config.output, PathBuf::from("bundle.go"));
        assert_eq!(config.dialect.output_package, "bundle");
        assert_eq!(config.dialect.test_suffix, "_spec.go");
        assert_eq!(config.dialect.block_opener, "import (");
    }

    #[test]
    fn root_key_in_file_is_ignored() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("go-merge.toml");
        fs::write(&path, "root = \"/somewhere/else\"\noutput = \"x.go\"\n").expect("write config");

        let config = load_config(Some(path.as_path())).expect("load");
        assert!(config.root.is_none());
        assert_eq!(config.output, PathBuf::from("x.go"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_config(Some(tmp.path().join("absent.toml").as_path())).expect_err("missing");
        assert!(matches!(err, MergeError::Config(_)));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "output = [1, 2\n").expect("write config");
        let err = load_config(Some(path.as_path())).expect_err("malformed");
        assert!(matches!(err, MergeError::Config(_)));
    }
}
