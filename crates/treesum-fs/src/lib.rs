//! Filesystem layer for treesum
//!
//! Provides content digests, deterministic tree walking, forward-slash
//! relative paths and atomic file rewrites.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use checksum::{DIGEST_WIDTH, Digest, InvalidDigest};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::{TreeFile, TreeWalker};
