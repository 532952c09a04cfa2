//! Ignore-list matching
//!
//! An ignore list is a file with one shell-style glob per line. A path is
//! ignored when it matches any pattern; patterns are applied to the whole
//! relative path, so `*` also crosses `/`. Lines the glob syntax rejects are
//! read the way shell `fnmatch` reads them, with a warning.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use treesum_fs::io;

use crate::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compiled ignore list
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// A matcher that ignores nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load patterns from `path`
    ///
    /// No path, or a path that does not exist, yields an empty matcher.
    ///
    /// # Errors
    ///
    /// An ignore list that exists but cannot be read is an I/O error. A line
    /// that cannot be compiled even leniently is [`Error::InvalidPattern`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };
        let Some(content) = io::read_text_if_exists(path)? else {
            tracing::info!(path = %path.display(), "Ignore list not found, ignoring nothing");
            return Ok(Self::empty());
        };
        let matcher = Self::parse(&content, path)?;
        tracing::debug!(path = %path.display(), patterns = matcher.len(), "Loaded ignore list");
        Ok(matcher)
    }

    /// Compile ignore-list text. `source` is only used for error reporting.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        let mut patterns = Vec::new();
        for (idx, raw) in content.split('\n').enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let pattern = compile(line).map_err(|e| Error::InvalidPattern {
                path: source.to_path_buf(),
                line: idx + 1,
                pattern: line.to_string(),
                message: e.msg.to_string(),
            })?;
            if pattern.as_str() != line {
                tracing::warn!(
                    "Ignore pattern {:?} at {}:{} is not a strict glob, matching it as {:?}",
                    line,
                    source.display(),
                    idx + 1,
                    pattern.as_str()
                );
            }
            patterns.push(pattern);
        }
        Ok(Self { patterns })
    }

    /// Whether `path` matches at least one pattern
    pub fn matches(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the list has no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Compile one line with shell `fnmatch` leniency
///
/// Lines the glob syntax rejects are retried with runs of `*` collapsed to
/// one `*` (a `**` inside a segment), then with brackets made literal (an
/// unclosed `[`). `*` and `?` stay wildcards throughout.
fn compile(line: &str) -> std::result::Result<Pattern, glob::PatternError> {
    let first = match Pattern::new(line) {
        Ok(pattern) => return Ok(pattern),
        Err(e) => e,
    };

    let mut collapsed = String::with_capacity(line.len());
    for c in line.chars() {
        if !(c == '*' && collapsed.ends_with('*')) {
            collapsed.push(c);
        }
    }
    if let Ok(pattern) = Pattern::new(&collapsed) {
        return Ok(pattern);
    }

    let literal_brackets: String = collapsed
        .chars()
        .map(|c| match c {
            '[' => "[[]".to_string(),
            ']' => "[]]".to_string(),
            other => other.to_string(),
        })
        .collect();
    Pattern::new(&literal_brackets).map_err(|_| first)
}
