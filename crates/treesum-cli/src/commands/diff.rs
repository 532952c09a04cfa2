//! Diff command implementation

use std::path::Path;

use colored::Colorize;

use treesum_core::{ChecksumStore, DiffOptions, generate_patch};

use super::{load_ignore, load_settings, print_json, print_summary, require_directory};
use crate::cli::DiffArgs;
use crate::error::Result;

/// Run the diff command
///
/// Writes a patch archive that turns the remote tree into the local one.
/// Neither database is modified.
pub fn run_diff(config: Option<&Path>, args: &DiffArgs) -> Result<()> {
    let settings = load_settings(config)?;
    let options = apply_flags(settings.diff, args);
    require_directory(&args.local_directory)?;
    let ignore = load_ignore(args.ignorelist_file.as_deref(), &settings)?;

    let local = ChecksumStore::load(&args.local_db)?;
    let mut remote = ChecksumStore::load(&args.remote_db)?;

    let report = generate_patch(
        &local,
        &mut remote,
        &args.local_directory,
        &args.patch_file,
        &ignore,
        options,
    )?;

    if args.json {
        return print_json(&report);
    }

    let mut counts = Vec::new();
    if options.diff_new {
        counts.push(report.new);
    }
    if options.diff_changed {
        counts.push(report.changed);
    }
    if options.diff_deleted {
        counts.push(report.deleted);
    }
    print_summary(&report.summary_lines(&options), &counts, |_, line| {
        line.cyan()
    });
    eprintln!(
        "{} {}",
        "Patch written to".green(),
        args.patch_file.display().to_string().cyan()
    );
    Ok(())
}

/// Layer command-line flags over the settings file
fn apply_flags(mut options: DiffOptions, args: &DiffArgs) -> DiffOptions {
    if args.no_diff_new {
        options.diff_new = false;
    }
    if args.diff_changed {
        options.diff_changed = true;
    }
    if args.diff_deleted {
        options.diff_deleted = true;
    }
    if args.verify_payload {
        options.verify_payload = true;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn flags_layer_over_settings() {
        let args = DiffArgs {
            local_db: PathBuf::from("l"),
            remote_db: PathBuf::from("r"),
            local_directory: PathBuf::from("tree"),
            patch_file: PathBuf::from("p.zip"),
            ignorelist_file: None,
            no_diff_new: true,
            diff_changed: false,
            diff_deleted: true,
            verify_payload: false,
            json: false,
        };
        let from_file = DiffOptions {
            diff_changed: true,
            ..Default::default()
        };

        let options = apply_flags(from_file, &args);

        assert!(!options.diff_new);
        assert!(options.diff_changed);
        assert!(options.diff_deleted);
        assert!(!options.verify_payload);
    }
}
