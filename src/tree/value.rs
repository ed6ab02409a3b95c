//! Field values - the tagged union a node field may hold
//!
//! A field holds either nothing, a scalar, a nested node, or an ordered list
//! of further values (lists nest, e.g. a list of annotations each carrying an
//! argument list). Making this an explicit tagged union keeps the walker's
//! "is this traversable" decision a pattern match.

use std::fmt;

use super::node::Node;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The field was not supplied (or was explicitly cleared).
    Absent,
    Bool(bool),
    Int(i64),
    Str(String),
    Node(Box<Node>),
    List(Vec<Value>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Value::Node(Box::new(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Absent,
        }
    }
}

/// Renders scalars bare, absent fields as `None`, lists in `[a, b]` form,
/// and nested nodes through their own rendering. Stable output; golden tests
/// rely on it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{}", s),
            Value::Node(node) => write!(f, "{}", node),
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_lists_and_absent() {
        let value = Value::List(vec![
            Value::Str("public".to_string()),
            Value::Absent,
            Value::Int(3),
            Value::List(vec![Value::Bool(true)]),
        ]);
        assert_eq!(value.to_string(), "[public, None, 3, [true]]");
    }

    #[test]
    fn option_conversion_maps_none_to_absent() {
        assert_eq!(Value::from(None::<i64>), Value::Absent);
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }
}
