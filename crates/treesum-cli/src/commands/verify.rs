//! Verify command implementation

use std::path::Path;

use colored::Colorize;

use treesum_core::{VerifyOptions, verify_tree};

use super::{load_ignore, load_settings, print_json, print_summary, require_directory};
use crate::cli::VerifyArgs;
use crate::error::Result;

/// Run the verify command
///
/// Checks every file under the directory against the database and rewrites
/// the database when the enabled options changed it.
pub fn run_verify(config: Option<&Path>, args: &VerifyArgs) -> Result<()> {
    let settings = load_settings(config)?;
    let options = apply_flags(settings.verify, args);
    require_directory(&args.directory)?;
    let ignore = load_ignore(args.ignorelist_file.as_deref(), &settings)?;

    let report = verify_tree(&args.directory, &args.database, &ignore, options)?;

    if args.json {
        return print_json(&report);
    }

    let counts = [
        report.verified,
        report.failed,
        report.added,
        report.removed,
        report.ignored,
    ];
    print_summary(&report.summary_lines(&options), &counts, |idx, line| match idx {
        0 => line.green(),
        1 => line.red().bold(),
        _ => line.yellow(),
    });
    Ok(())
}

/// Layer command-line flags over the settings file
///
/// A flag can only move its option away from the default.
fn apply_flags(mut options: VerifyOptions, args: &VerifyArgs) -> VerifyOptions {
    if args.no_verify_existing {
        options.verify_existing = false;
    }
    if args.no_add_new {
        options.add_new = false;
    }
    if args.remove_deleted {
        options.remove_deleted = true;
    }
    if args.update_changed {
        options.update_changed = true;
    }
    if args.clean_ignored {
        options.clean_ignored = true;
    }
    options
}
