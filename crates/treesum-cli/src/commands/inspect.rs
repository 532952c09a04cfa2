//! Inspect command implementation

use std::path::Path;

use colored::Colorize;

use treesum_core::{PatchKind, read_manifest};

use super::print_json;
use crate::error::Result;

/// Run the inspect command
///
/// Lists the operations of a patch in application order.
pub fn run_inspect(patch_file: &Path, json: bool) -> Result<()> {
    let manifest = read_manifest(patch_file)?;

    if json {
        return print_json(&manifest);
    }

    if manifest.is_empty() {
        println!("{} Patch contains no operations", "=>".blue().bold());
        return Ok(());
    }

    for entry in &manifest {
        let op = &entry.operation;
        let kind = match op.kind {
            PatchKind::Add => op.kind.as_str().green(),
            PatchKind::Replace => op.kind.as_str().yellow(),
            PatchKind::Delete => op.kind.as_str().red(),
        };
        match entry.payload_len {
            Some(len) => println!("{:>4}  {:<7}  {} ({} bytes)", op.index, kind, op.path, len),
            None => println!("{:>4}  {:<7}  {}", op.index, kind, op.path),
        }
    }
    Ok(())
}
