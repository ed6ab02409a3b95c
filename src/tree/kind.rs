//! Kind descriptors - declaration-time field inheritance
//!
//! Every syntax-tree node belongs to a [`Kind`]. A kind declares the fields
//! it newly introduces and, optionally, the kind it refines; its *effective*
//! field sequence (inherited fields first, own fields after) is computed once
//! when the kind is declared, never per instance. The grammar layer declares
//! its catalog of kinds at startup and hands the resulting handles to every
//! node it constructs.

use std::fmt;
use std::sync::Arc;

/// A cheap-to-clone handle to a kind descriptor.
///
/// Equality is structural (name, own fields, and the whole parent chain)
/// rather than pointer identity, so kinds rebuilt by the deserializer compare
/// equal to the ones the tree was originally built with.
#[derive(Clone)]
pub struct Kind(Arc<KindData>);

struct KindData {
    name: String,
    parent: Option<Kind>,
    own_fields: Vec<String>,
    /// Effective field sequence: parent's effective fields, then own fields.
    fields: Vec<String>,
}

impl Kind {
    /// Declare a root kind with no parent.
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Kind
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Kind::declare(name.into(), None, fields)
    }

    /// Declare a refinement of this kind.
    ///
    /// The new kind inherits this kind's effective field sequence; `fields`
    /// are appended after it. A field name already present at an outer level
    /// is skipped rather than duplicated.
    pub fn derive<I, S>(&self, name: impl Into<String>, fields: I) -> Kind
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Kind::declare(name.into(), Some(self.clone()), fields)
    }

    fn declare<I, S>(name: String, parent: Option<Kind>, fields: I) -> Kind
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut effective: Vec<String> = parent
            .as_ref()
            .map(|p| p.fields().to_vec())
            .unwrap_or_default();
        let mut own_fields = Vec::new();
        for field in fields {
            let field = field.into();
            if effective.iter().any(|f| *f == field) {
                continue;
            }
            effective.push(field.clone());
            own_fields.push(field);
        }
        Kind(Arc::new(KindData {
            name,
            parent,
            own_fields,
            fields: effective,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The effective field sequence: every inherited field, in the order the
    /// ancestry declared them, followed by this kind's own fields.
    pub fn fields(&self) -> &[String] {
        &self.0.fields
    }

    /// The fields this kind newly declares (inherited fields excluded).
    pub fn own_fields(&self) -> &[String] {
        &self.0.own_fields
    }

    pub fn parent(&self) -> Option<&Kind> {
        self.0.parent.as_ref()
    }

    /// Position of `name` in the effective field sequence.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.0.fields.iter().position(|f| f == name)
    }

    /// "Is-a" test: true if this kind is `other` or refines it, transitively.
    pub fn is(&self, other: &Kind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: the grammar layer clones handles rather than redeclaring.
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        self.0.name == other.0.name
            && self.0.own_fields == other.0.own_fields
            && self.0.parent == other.0.parent
    }
}

impl Eq for Kind {}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.0.name)
            .field("fields", &self.0.fields)
            .finish()
    }
}
