//! # aidl-tree
//!
//! The in-memory representation of a parsed AIDL compilation unit, plus an
//! extractor for the structured javadoc comments attached to declarations.
//!
//! The crate has two halves:
//!
//! - [`tree`] - a generic syntax-tree node algebra: kind descriptors with
//!   field inheritance, keyword-style construction, structural equality,
//!   deterministic rendering, depth-first traversal with ancestor paths,
//!   pattern-based filtering, and whole-tree snapshot (de)serialization.
//! - [`javadoc`] - a standalone pipeline that turns a raw `/** ... */`
//!   comment into a structured [`javadoc::DocBlock`] record.
//!
//! The tokenizer and the recursive-descent grammar parser that populate a
//! tree live outside this crate; they consume [`tree::Node::new`] and the
//! kind-declaration API, and attach source spans after construction.

pub mod javadoc;
pub mod tree;
