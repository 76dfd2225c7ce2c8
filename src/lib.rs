//! go-merge: Merge the Go source files of a project into one file
//!
//! Walks a directory tree, splits every Go file into its package clause,
//! import block and remaining body, then writes a single `package main` file
//! with a deduplicated import block and the concatenated bodies.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod render;
pub mod scan;
