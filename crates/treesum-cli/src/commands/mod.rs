//! Command implementations for treesum-cli

pub mod diff;
pub mod inspect;
pub mod verify;

pub use diff::run_diff;
pub use inspect::run_inspect;
pub use verify::run_verify;

use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};
use serde::Serialize;

use treesum_core::{IgnoreMatcher, Settings};

use crate::error::{CliError, Result};

/// Settings from `--config`, or the defaults when none was given
pub(crate) fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

/// Ignore list from the command line, falling back to the settings file
pub(crate) fn load_ignore(flag: Option<&Path>, settings: &Settings) -> Result<IgnoreMatcher> {
    let path: Option<PathBuf> = flag
        .map(Path::to_path_buf)
        .or_else(|| settings.ignore_file.clone());
    let ignore = IgnoreMatcher::load(path.as_deref())?;
    tracing::debug!(patterns = ignore.len(), "Ignore list ready");
    Ok(ignore)
}

pub(crate) fn require_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Directory {} does not exist",
            path.display()
        )))
    }
}

/// Print the closing counter block to stderr
///
/// Each line is paired with the count it reports; non-zero counts are
/// highlighted with `style`.
pub(crate) fn print_summary(
    lines: &[String],
    counts: &[usize],
    style: impl Fn(usize, &str) -> ColoredString,
) {
    eprintln!("{}", "Summary:".bold());
    for (idx, line) in lines.iter().map(String::as_str).enumerate() {
        let count = counts.get(idx).copied().unwrap_or(0);
        if count == 0 {
            eprintln!("   {}", line.dimmed());
        } else {
            eprintln!("   {}", style(idx, line));
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
