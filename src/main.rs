//! go-merge: Merge the Go source files of a project into one file

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod error;
mod extract;
mod render;
mod scan;

fn main() -> Result<()> {
    cli::run()
}
