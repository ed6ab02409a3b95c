//! Error types for tree operations

use std::fmt;

/// A field name outside the kind's effective field sequence was supplied at
/// construction (or to [`Node::set`](super::node::Node::set)).
///
/// Always a caller error in the producing grammar layer; never recovered
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraneousFieldError {
    /// Name of the kind being constructed.
    pub kind: String,
    /// Every offending field name, in the order supplied.
    pub fields: Vec<String>,
}

impl fmt::Display for ExtraneousFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extraneous fields for {}: {}",
            self.kind,
            self.fields.join(", ")
        )
    }
}

impl std::error::Error for ExtraneousFieldError {}

/// Failure while encoding a tree snapshot to bytes.
#[derive(Debug)]
pub enum EncodeError {
    /// The underlying writer or the JSON encoder failed.
    Json(serde_json::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Json(err) => write!(f, "failed to encode tree snapshot: {}", err),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err)
    }
}

/// Failure while reconstructing a tree from bytes.
///
/// Decoding is all-or-nothing: on any of these, no partially reconstructed
/// tree escapes.
#[derive(Debug)]
pub enum DecodeError {
    /// Corrupt or truncated byte stream (or a failing reader).
    Json(serde_json::Error),
    /// The snapshot was written by an unsupported format version.
    Version { found: u32, supported: u32 },
    /// A node referenced a kind-table entry that does not exist, or a kind
    /// referenced a parent at or after its own position.
    KindIndex { index: usize, table_len: usize },
    /// A node carried a different number of field values than its kind's
    /// effective field sequence.
    FieldCount {
        kind: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Json(err) => write!(f, "failed to decode tree snapshot: {}", err),
            DecodeError::Version { found, supported } => {
                write!(
                    f,
                    "unsupported snapshot version {} (supported: {})",
                    found, supported
                )
            }
            DecodeError::KindIndex { index, table_len } => {
                write!(
                    f,
                    "kind reference {} outside kind table of length {}",
                    index, table_len
                )
            }
            DecodeError::FieldCount {
                kind,
                expected,
                found,
            } => {
                write!(
                    f,
                    "node of kind {} carries {} field values, expected {}",
                    kind, found, expected
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err)
    }
}
