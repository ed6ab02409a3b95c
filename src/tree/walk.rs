//! Tree traversal and filtering
//!
//! [`walk`] yields every descendant node of a root in depth-first pre-order,
//! each paired with the path of ancestor nodes and list containers leading to
//! it. Only nodes are yielded: a list container contributes no pair of its
//! own (it appears on its elements' paths instead), and scalar or absent
//! field values are neither yielded nor descended into.
//!
//! [`filter`] keeps the walk pairs whose node matches a [`Pattern`], either
//! by kind ("is-a", refinements included) or by structural equality to a
//! concrete node.

use super::kind::Kind;
use super::node::Node;
use super::value::Value;

/// One ancestor on the path from the walk root down to a yielded node.
#[derive(Clone, Copy)]
pub enum Step<'a> {
    Node(&'a Node),
    List(&'a [Value]),
}

impl<'a> Step<'a> {
    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Step::Node(node) => Some(node),
            Step::List(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Step::List(_))
    }
}

/// Lazy depth-first pre-order traversal. Each call to [`walk`] or
/// [`walk_list`] produces an independent single-pass iterator.
pub struct Walk<'a> {
    // Pending items, last entry visited next; children are pushed in reverse
    // so declaration order is preserved.
    stack: Vec<(Vec<Step<'a>>, Step<'a>)>,
}

/// Walk a tree rooted at `root`. The root itself is the first yielded node,
/// with an empty path.
pub fn walk(root: &Node) -> Walk<'_> {
    Walk {
        stack: vec![(Vec::new(), Step::Node(root))],
    }
}

/// Walk a bare sequence of values. The sequence yields no pair of its own;
/// traversal proceeds directly into its node and list elements, with the
/// sequence on their paths.
pub fn walk_list(values: &[Value]) -> Walk<'_> {
    Walk {
        stack: vec![(Vec::new(), Step::List(values))],
    }
}

impl<'a> Walk<'a> {
    fn push_elements(&mut self, path: &[Step<'a>], parent: Step<'a>, values: &'a [Value]) {
        let mut child_path = path.to_vec();
        child_path.push(parent);
        for value in values.iter().rev() {
            match value {
                Value::Node(node) => self.stack.push((child_path.clone(), Step::Node(node))),
                Value::List(list) => self.stack.push((child_path.clone(), Step::List(list))),
                // Scalar and absent leaves are not traversable.
                _ => {}
            }
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Vec<Step<'a>>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, step)) = self.stack.pop() {
            match step {
                Step::Node(node) => {
                    self.push_elements(&path, step, node.children());
                    return Some((path, node));
                }
                Step::List(values) => {
                    self.push_elements(&path, step, values);
                }
            }
        }
        None
    }
}

/// What [`filter`] matches against. Exactly one matching mode applies per
/// invocation.
#[derive(Clone, Copy)]
pub enum Pattern<'p> {
    /// Match nodes whose kind is the given kind or refines it.
    Kind(&'p Kind),
    /// Match nodes structurally equal to the given node.
    Exact(&'p Node),
}

impl Pattern<'_> {
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Pattern::Kind(kind) => node.kind().is(kind),
            Pattern::Exact(expected) => node == *expected,
        }
    }
}

/// The subsequence of [`walk`] pairs whose node matches `pattern`, in walk
/// order.
pub fn filter<'a, 'p>(root: &'a Node, pattern: Pattern<'p>) -> Filter<'a, 'p> {
    Filter {
        walk: walk(root),
        pattern,
    }
}

/// Iterator returned by [`filter`].
pub struct Filter<'a, 'p> {
    walk: Walk<'a>,
    pattern: Pattern<'p>,
}

impl<'a> Iterator for Filter<'a, '_> {
    type Item = (Vec<Step<'a>>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let pattern = self.pattern;
        self.walk.find(move |(_, node)| pattern.matches(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::value::Value;

    fn leaf(kind: &Kind, name: &str) -> Node {
        Node::new(kind, [("name", Value::from(name))]).unwrap()
    }

    #[test]
    fn scalars_are_never_yielded() {
        let kind = Kind::new("ConstantDeclaration", ["name", "value", "doc"]);
        let node = Node::new(
            &kind,
            [
                ("name", Value::from("FLAG_ONEWAY")),
                ("value", Value::from(1i64)),
                ("doc", Value::Absent),
            ],
        )
        .unwrap();

        let yielded: Vec<_> = node.walk().collect();
        assert_eq!(yielded.len(), 1);
        assert!(yielded[0].0.is_empty());
    }

    #[test]
    fn list_roots_yield_no_root_pair() {
        let kind = Kind::new("TypeDeclaration", ["name"]);
        let values = vec![
            Value::from(leaf(&kind, "IFoo")),
            Value::from("stray scalar"),
            Value::from(leaf(&kind, "IBar")),
        ];

        let yielded: Vec<_> = walk_list(&values).collect();
        assert_eq!(yielded.len(), 2);
        // The bare sequence still appears on each element's path.
        assert_eq!(yielded[0].0.len(), 1);
        assert!(yielded[0].0[0].is_list());
        assert_eq!(yielded[0].1.get("name"), Some(&Value::from("IFoo")));
        assert_eq!(yielded[1].1.get("name"), Some(&Value::from("IBar")));
    }
}
