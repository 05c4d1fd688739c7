
use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::compare::CompareSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2020-{} scorediff contributors, released under the MIT license.
Reports differences between pipeline runs to support review; it does not
re-score variants, and rank scores are taken as given by the pipeline.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// scorediff, a tool for comparing rank scores between two pipeline runs.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Compares the variant calls and rank scores of two scored VCFs
    Compare(Box<CompareSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise return an error
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Derives display labels for two inputs.
/// File names are used when they differ, otherwise the full paths are needed to tell them apart.
/// # Arguments
/// * `first` - the first input path
/// * `second` - the second input path
pub fn default_labels(first: &Path, second: &Path) -> (String, String) {
    match (first.file_name(), second.file_name()) {
        (Some(name1), Some(name2)) if name1 != name2 => {
            (name1.to_string_lossy().to_string(), name2.to_string_lossy().to_string())
        },
        _ => (first.display().to_string(), second.display().to_string())
    }
}
