//! Patch operations and their archive encoding

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const META_SUFFIX: &str = "meta";
const DATA_SUFFIX: &str = "data";

/// What a patch operation does to the remote tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchKind {
    /// Create a file that the remote does not have
    Add,
    /// Overwrite a file whose content differs
    Replace,
    /// Remove a file that no longer exists locally
    Delete,
}

impl PatchKind {
    /// The keyword written on the first line of a meta blob
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Delete => "delete",
        }
    }

    /// Whether the operation carries file content
    pub fn has_payload(&self) -> bool {
        !matches!(self, Self::Delete)
    }
}

impl std::str::FromStr for PatchKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown operation {other:?}")),
        }
    }
}

impl std::fmt::Display for PatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One indexed instruction of a patch archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// Position in the patch; indices start at 0 and have no gaps
    pub index: usize,
    /// What to do
    pub kind: PatchKind,
    /// Tree-relative path the operation applies to
    pub path: String,
}

impl PatchOperation {
    pub fn new(index: usize, kind: PatchKind, path: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            path: path.into(),
        }
    }

    /// Archive name of the meta blob, e.g. `0meta`
    pub fn meta_name(&self) -> String {
        format!("{}{META_SUFFIX}", self.index)
    }

    /// Archive name of the payload blob, e.g. `0data`
    pub fn data_name(&self) -> String {
        format!("{}{DATA_SUFFIX}", self.index)
    }

    /// Meta blob content: `<kind>\n<path>` as UTF-8
    pub fn meta_bytes(&self) -> Vec<u8> {
        format!("{}\n{}", self.kind, self.path).into_bytes()
    }

    /// Decode a meta blob stored under index `index`
    pub fn parse_meta(index: usize, bytes: &[u8]) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedPatch {
            name: format!("{index}{META_SUFFIX}"),
            reason,
        };
        let text = std::str::from_utf8(bytes).map_err(|e| malformed(e.to_string()))?;
        let (kind, path) = text
            .split_once('\n')
            .ok_or_else(|| malformed("missing newline after operation".into()))?;
        let kind = kind.parse::<PatchKind>().map_err(malformed)?;
        if path.is_empty() {
            return Err(malformed("empty path".into()));
        }
        Ok(Self::new(index, kind, path))
    }
}

/// Archive entry name split into index and blob role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryRole {
    Meta(usize),
    Data(usize),
}

impl EntryRole {
    pub(crate) fn parse(name: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedPatch {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        let (digits, is_meta) = if let Some(d) = name.strip_suffix(META_SUFFIX) {
            (d, true)
        } else if let Some(d) = name.strip_suffix(DATA_SUFFIX) {
            (d, false)
        } else {
            return Err(malformed("expected a meta or data suffix"));
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("expected a decimal index prefix"));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|_| malformed("index out of range"))?;
        Ok(if is_meta {
            Self::Meta(index)
        } else {
            Self::Data(index)
        })
    }
}
