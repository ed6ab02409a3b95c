//! Syntax tree core - kinds, nodes, traversal, and persistence
//!
//! This module provides the generic node algebra that every AIDL syntax-tree
//! node is an instance of, along with the utilities for working with whole
//! trees.
//!
//! ## Modules
//!
//! - `kind` - Kind descriptors with declaration-time field inheritance
//! - `value` - The tagged union of legal field values
//! - `node` - Node instances: construction, equality, rendering, spans
//! - `span` - Source position types attached by the external parser
//! - `walk` - Depth-first traversal with ancestor paths, and filtering
//! - `snapshot` - Normalized serde representation and the byte codec
//! - `error` - Error types for tree operations

pub mod error;
pub mod kind;
pub mod node;
pub mod snapshot;
pub mod span;
pub mod value;
pub mod walk;

// Re-export commonly used types at module root
pub use error::{DecodeError, EncodeError, ExtraneousFieldError};
pub use kind::Kind;
pub use node::Node;
pub use snapshot::{deserialize, read_tree, serialize, write_tree, TreeSnapshot};
pub use span::{Position, Span};
pub use value::Value;
pub use walk::{filter, walk, walk_list, Filter, Pattern, Step, Walk};
