//! Tree snapshot - a normalized serializable representation of a whole tree
//!
//! Serialization goes through an intermediate [`TreeSnapshot`]: a versioned,
//! serde-derived structure holding an interned kind table plus the node tree
//! referencing kinds by index. The snapshot walks the same kind metadata that
//! equality and rendering use, so what gets persisted is exactly what those
//! consider "the data". Encoding a tree and decoding the bytes yields an
//! independent deep copy that compares structurally equal, spans included.
//!
//! The kind table is emitted in topological order (parent before child), so
//! decoding rebuilds kind handles in a single forward pass.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use super::error::{DecodeError, EncodeError};
use super::kind::Kind;
use super::node::Node;
use super::span::Span;
use super::value::Value;

/// Format version written into every snapshot. Bump on any incompatible
/// change to the snapshot structures below.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A whole tree in normalized, serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub version: u32,
    /// Interned kind descriptors; a parent always precedes its refinements.
    pub kinds: Vec<KindSnapshot>,
    pub root: NodeSnapshot,
}

/// One kind descriptor in the interned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSnapshot {
    pub name: String,
    /// Index of the parent kind in the table, if any.
    pub parent: Option<usize>,
    /// Only the newly declared fields; effective sequences are recomputed on
    /// decode from the parent chain.
    pub own_fields: Vec<String>,
}

/// One node, with field values in effective-field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub kind: usize,
    pub fields: Vec<ValueSnapshot>,
    pub span: Option<Span>,
}

/// Mirror of [`Value`] with nested nodes in snapshot form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueSnapshot {
    Absent,
    Bool(bool),
    Int(i64),
    Str(String),
    Node(Box<NodeSnapshot>),
    List(Vec<ValueSnapshot>),
}

impl TreeSnapshot {
    /// Capture a tree into snapshot form.
    pub fn capture(root: &Node) -> TreeSnapshot {
        let mut interner = KindInterner::default();
        let root = interner.encode_node(root);
        TreeSnapshot {
            version: SNAPSHOT_VERSION,
            kinds: interner.table,
            root,
        }
    }

    /// Rebuild the tree this snapshot describes.
    pub fn restore(&self) -> Result<Node, DecodeError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(DecodeError::Version {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut kinds: Vec<Kind> = Vec::with_capacity(self.kinds.len());
        for (index, entry) in self.kinds.iter().enumerate() {
            let kind = match entry.parent {
                None => Kind::new(entry.name.clone(), entry.own_fields.iter().cloned()),
                Some(parent) => {
                    // Forward references would mean a cycle; reject them the
                    // same way as out-of-range indices.
                    if parent >= index {
                        return Err(DecodeError::KindIndex {
                            index: parent,
                            table_len: index,
                        });
                    }
                    kinds[parent].derive(entry.name.clone(), entry.own_fields.iter().cloned())
                }
            };
            kinds.push(kind);
        }

        decode_node(&self.root, &kinds)
    }
}

#[derive(Default)]
struct KindInterner {
    table: Vec<KindSnapshot>,
    seen: Vec<Kind>,
}

impl KindInterner {
    fn intern(&mut self, kind: &Kind) -> usize {
        if let Some(index) = self.seen.iter().position(|k| k == kind) {
            return index;
        }
        let parent = kind.parent().cloned().map(|p| self.intern(&p));
        self.table.push(KindSnapshot {
            name: kind.name().to_string(),
            parent,
            own_fields: kind.own_fields().to_vec(),
        });
        self.seen.push(kind.clone());
        self.seen.len() - 1
    }

    fn encode_node(&mut self, node: &Node) -> NodeSnapshot {
        NodeSnapshot {
            kind: self.intern(node.kind()),
            fields: node.children().iter().map(|v| self.encode_value(v)).collect(),
            span: node.span().copied(),
        }
    }

    fn encode_value(&mut self, value: &Value) -> ValueSnapshot {
        match value {
            Value::Absent => ValueSnapshot::Absent,
            Value::Bool(b) => ValueSnapshot::Bool(*b),
            Value::Int(i) => ValueSnapshot::Int(*i),
            Value::Str(s) => ValueSnapshot::Str(s.clone()),
            Value::Node(node) => ValueSnapshot::Node(Box::new(self.encode_node(node))),
            Value::List(values) => {
                ValueSnapshot::List(values.iter().map(|v| self.encode_value(v)).collect())
            }
        }
    }
}

fn decode_node(snapshot: &NodeSnapshot, kinds: &[Kind]) -> Result<Node, DecodeError> {
    let kind = kinds.get(snapshot.kind).ok_or(DecodeError::KindIndex {
        index: snapshot.kind,
        table_len: kinds.len(),
    })?;
    if snapshot.fields.len() != kind.fields().len() {
        return Err(DecodeError::FieldCount {
            kind: kind.name().to_string(),
            expected: kind.fields().len(),
            found: snapshot.fields.len(),
        });
    }
    let values = snapshot
        .fields
        .iter()
        .map(|v| decode_value(v, kinds))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::from_parts(kind.clone(), values, snapshot.span))
}

fn decode_value(snapshot: &ValueSnapshot, kinds: &[Kind]) -> Result<Value, DecodeError> {
    Ok(match snapshot {
        ValueSnapshot::Absent => Value::Absent,
        ValueSnapshot::Bool(b) => Value::Bool(*b),
        ValueSnapshot::Int(i) => Value::Int(*i),
        ValueSnapshot::Str(s) => Value::Str(s.clone()),
        ValueSnapshot::Node(node) => Value::Node(Box::new(decode_node(node, kinds)?)),
        ValueSnapshot::List(values) => Value::List(
            values
                .iter()
                .map(|v| decode_value(v, kinds))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    })
}

/// Encode a whole tree to bytes.
pub fn serialize(root: &Node) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&TreeSnapshot::capture(root))?)
}

/// Rebuild a tree from bytes produced by [`serialize`].
pub fn deserialize(bytes: &[u8]) -> Result<Node, DecodeError> {
    let snapshot: TreeSnapshot = serde_json::from_slice(bytes)?;
    snapshot.restore()
}

/// Encode a whole tree to a byte stream. The writer is used only for the
/// duration of the call and errors propagate on every path.
pub fn write_tree<W: Write>(root: &Node, writer: W) -> Result<(), EncodeError> {
    Ok(serde_json::to_writer(writer, &TreeSnapshot::capture(root))?)
}

/// Rebuild a tree from a byte stream produced by [`write_tree`].
pub fn read_tree<R: Read>(reader: R) -> Result<Node, DecodeError> {
    let snapshot: TreeSnapshot = serde_json::from_reader(reader)?;
    snapshot.restore()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_table_lists_parents_before_children() {
        let base = Kind::new("Node", Vec::<String>::new());
        let decl = base.derive("Declaration", ["name"]);
        let node = Node::new(&decl, [("name", Value::from("IFoo"))]).unwrap();

        let snapshot = TreeSnapshot::capture(&node);
        assert_eq!(snapshot.kinds.len(), 2);
        assert_eq!(snapshot.kinds[0].name, "Node");
        assert_eq!(snapshot.kinds[0].parent, None);
        assert_eq!(snapshot.kinds[1].name, "Declaration");
        assert_eq!(snapshot.kinds[1].parent, Some(0));
    }

    #[test]
    fn forward_parent_reference_is_rejected() {
        let snapshot = TreeSnapshot {
            version: SNAPSHOT_VERSION,
            kinds: vec![KindSnapshot {
                name: "Loop".to_string(),
                parent: Some(0),
                own_fields: vec![],
            }],
            root: NodeSnapshot {
                kind: 0,
                fields: vec![],
                span: None,
            },
        };

        assert!(matches!(
            snapshot.restore(),
            Err(DecodeError::KindIndex { .. })
        ));
    }
}
