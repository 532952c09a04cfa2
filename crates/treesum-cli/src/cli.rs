//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// treesum - Verify directory trees against checksum databases
#[derive(Parser, Debug)]
#[command(name = "treesum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Display status messages for all operations instead of just exceptional conditions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (.toml, .json, .yaml) providing defaults for the pass options
    #[arg(long, global = true, value_name = "FILE", env = "TREESUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Verify a directory tree against a checksum database
    ///
    /// Examples:
    ///   treesum verify ./photos photos.md5
    ///   treesum verify ./photos photos.md5 --remove-deleted --update-changed
    Verify(VerifyArgs),

    /// Write a patch that brings a remote tree in line with the local one
    ///
    /// Examples:
    ///   treesum diff local.md5 remote.md5 ./site patch.zip
    ///   treesum diff local.md5 remote.md5 ./site patch.zip --diff-changed --diff-deleted
    Diff(DiffArgs),

    /// List the operations recorded in a patch file
    Inspect {
        /// Patch file to read
        patch_file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct VerifyArgs {
    /// Root of the tree to verify
    pub directory: PathBuf,

    /// Checksum database file (created when missing)
    pub database: PathBuf,

    /// File of shell glob patterns, one per line, excluded from the pass
    #[arg(long, value_name = "FILE")]
    pub ignorelist_file: Option<PathBuf>,

    /// Do not hash files that already have a database entry
    #[arg(long)]
    pub no_verify_existing: bool,

    /// Do not record files missing from the database
    #[arg(long)]
    pub no_add_new: bool,

    /// Drop entries for files that no longer exist
    #[arg(long)]
    pub remove_deleted: bool,

    /// Store the new digest of files that failed verification
    #[arg(long)]
    pub update_changed: bool,

    /// Drop entries whose path matches the ignore list
    #[arg(long)]
    pub clean_ignored: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DiffArgs {
    /// Checksum database describing the local tree
    pub local_db: PathBuf,

    /// Checksum database describing the remote tree
    pub remote_db: PathBuf,

    /// Root of the local tree that supplies payloads
    pub local_directory: PathBuf,

    /// Patch file to write
    pub patch_file: PathBuf,

    /// File of shell glob patterns, one per line, excluded from the patch
    #[arg(long, value_name = "FILE")]
    pub ignorelist_file: Option<PathBuf>,

    /// Do not emit operations for files missing on the remote
    #[arg(long)]
    pub no_diff_new: bool,

    /// Emit operations for files whose digests differ
    #[arg(long)]
    pub diff_changed: bool,

    /// Emit operations for files missing locally
    #[arg(long)]
    pub diff_deleted: bool,

    /// Re-hash each payload and fail if it no longer matches the local database
    #[arg(long)]
    pub verify_payload: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
