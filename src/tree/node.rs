//! Node instances
//!
//! A [`Node`] pairs a [`Kind`] handle with one [`Value`] per effective field,
//! stored positionally in effective-field order, plus an optional source
//! span. Construction is keyword-style: callers supply `(name, value)` pairs
//! and anything outside the kind's field set is rejected up front.

use std::fmt;

use super::error::ExtraneousFieldError;
use super::kind::Kind;
use super::span::Span;
use super::value::Value;
use super::walk::{self, Filter, Pattern, Walk};

/// A single syntax-tree node.
#[derive(Clone)]
pub struct Node {
    kind: Kind,
    values: Vec<Value>,
    span: Option<Span>,
}

impl Node {
    /// Construct a node of `kind` from `(field, value)` pairs.
    ///
    /// Fields not supplied default to [`Value::Absent`]; that is never an
    /// error. Supplying a field name outside the kind's effective field
    /// sequence fails with [`ExtraneousFieldError`] naming every offender.
    pub fn new<I, S>(kind: &Kind, fields: I) -> Result<Node, ExtraneousFieldError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut values = vec![Value::Absent; kind.fields().len()];
        let mut extraneous = Vec::new();
        for (name, value) in fields {
            let name = name.into();
            match kind.field_index(&name) {
                Some(index) => values[index] = value,
                None => extraneous.push(name),
            }
        }
        if !extraneous.is_empty() {
            return Err(ExtraneousFieldError {
                kind: kind.name().to_string(),
                fields: extraneous,
            });
        }
        Ok(Node {
            kind: kind.clone(),
            values,
            span: None,
        })
    }

    /// Construct a node with every field absent.
    pub fn empty(kind: &Kind) -> Node {
        Node {
            kind: kind.clone(),
            values: vec![Value::Absent; kind.fields().len()],
            span: None,
        }
    }

    /// Used by the snapshot decoder, which has already validated arity.
    pub(crate) fn from_parts(kind: Kind, values: Vec<Value>, span: Option<Span>) -> Node {
        debug_assert_eq!(values.len(), kind.fields().len());
        Node { kind, values, span }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The value of `field`, or `None` if the kind has no such field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.kind.field_index(field).map(|i| &self.values[i])
    }

    /// Replace the value of `field`. Unknown fields are rejected the same way
    /// construction rejects them.
    pub fn set(
        &mut self,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), ExtraneousFieldError> {
        match self.kind.field_index(field) {
            Some(index) => {
                self.values[index] = value.into();
                Ok(())
            }
            None => Err(ExtraneousFieldError {
                kind: self.kind.name().to_string(),
                fields: vec![field.to_string()],
            }),
        }
    }

    /// Field values in declaration (effective field sequence) order, as
    /// stored - absent values and scalars included. Traversing callers skip
    /// non-traversable leaves themselves; [`walk`](Node::walk) does.
    pub fn children(&self) -> &[Value] {
        &self.values
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    /// Attach a source span. The grammar parser calls this once per node,
    /// after construction.
    pub fn set_span(&mut self, span: Span) {
        self.span = Some(span);
    }

    /// Builder form of [`set_span`](Node::set_span).
    pub fn with_span(mut self, span: Span) -> Node {
        self.span = Some(span);
        self
    }

    /// Depth-first pre-order traversal of this node and every descendant
    /// node, each yielded with the path of ancestors leading to it.
    pub fn walk(&self) -> Walk<'_> {
        walk::walk(self)
    }

    /// The walk pairs whose node matches `pattern`, in walk order.
    pub fn filter<'a, 'p>(&'a self, pattern: Pattern<'p>) -> Filter<'a, 'p> {
        walk::filter(self, pattern)
    }
}

/// Structural equality: identical concrete kind and equal field values,
/// recursively. Spans are metadata, not data, and do not participate.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.values == other.values
    }
}

/// Renders `Kind(field1=value1, field2=value2)` with the fields in
/// lexicographic order of field name, independent of declaration order, so
/// the output is stable for golden tests.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<(&str, &Value)> = self
            .kind
            .fields()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
            .collect();
        pairs.sort_by_key(|(name, _)| *name);

        write!(f, "{}(", self.kind.name())?;
        for (i, (name, value)) in pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
