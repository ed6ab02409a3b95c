//! Traversal and filtering over a representative AIDL-shaped tree.

use aidl_tree::tree::{filter, walk, walk_list, Kind, Node, Pattern, Value};

struct Catalog {
    base: Kind,
    declaration: Kind,
    interface: Kind,
    method: Kind,
    compilation_unit: Kind,
}

fn catalog() -> Catalog {
    let base = Kind::new("Node", Vec::<String>::new());
    let declaration = base.derive("Declaration", ["modifiers", "annotations"]);
    let interface = declaration.derive("InterfaceDeclaration", ["name", "body"]);
    let method = declaration.derive("MethodDeclaration", ["name", "parameters"]);
    let compilation_unit = base.derive("CompilationUnit", ["package", "declarations"]);
    Catalog {
        base,
        declaration,
        interface,
        method,
        compilation_unit,
    }
}

fn method(catalog: &Catalog, name: &str) -> Node {
    Node::new(
        &catalog.method,
        [
            ("name", Value::from(name)),
            ("modifiers", Value::List(vec![Value::from("oneway")])),
        ],
    )
    .unwrap()
}

/// CompilationUnit -> InterfaceDeclaration -> [two methods].
fn sample_unit(catalog: &Catalog) -> Node {
    let iface = Node::new(
        &catalog.interface,
        [
            ("name", Value::from("IServiceManager")),
            (
                "body",
                Value::List(vec![
                    Value::from(method(catalog, "getService")),
                    Value::from(method(catalog, "addService")),
                ]),
            ),
        ],
    )
    .unwrap();
    Node::new(
        &catalog.compilation_unit,
        [
            ("package", Value::from("android.os")),
            ("declarations", Value::List(vec![Value::from(iface)])),
        ],
    )
    .unwrap()
}

#[test]
fn walk_yields_every_node_exactly_once() {
    let catalog = catalog();
    let unit = sample_unit(&catalog);

    let names: Vec<&str> = walk(&unit).map(|(_, node)| node.kind().name()).collect();
    assert_eq!(
        names,
        vec![
            "CompilationUnit",
            "InterfaceDeclaration",
            "MethodDeclaration",
            "MethodDeclaration",
        ]
    );
}

#[test]
fn walk_is_preorder_with_fields_in_declaration_order() {
    let catalog = catalog();
    let left = method(&catalog, "first");
    let right = method(&catalog, "second");
    let iface = Node::new(
        &catalog.interface,
        [
            ("name", Value::from("IOrder")),
            (
                "body",
                Value::List(vec![Value::from(left), Value::from(right)]),
            ),
        ],
    )
    .unwrap();

    let order: Vec<String> = walk(&iface)
        .filter_map(|(_, node)| node.get("name").and_then(|v| v.as_str()).map(String::from))
        .collect();
    assert_eq!(order, vec!["IOrder", "first", "second"]);
}

#[test]
fn paths_list_ancestors_from_root_down() {
    let catalog = catalog();
    let unit = sample_unit(&catalog);

    let pairs: Vec<_> = walk(&unit).collect();

    // The root carries an empty path.
    assert!(pairs[0].0.is_empty());

    // A method's path: unit, declarations list, interface, body list.
    let (path, node) = &pairs[2];
    assert_eq!(node.kind().name(), "MethodDeclaration");
    assert_eq!(path.len(), 4);
    assert_eq!(path[0].as_node().unwrap().kind().name(), "CompilationUnit");
    assert!(path[1].is_list());
    assert_eq!(
        path[2].as_node().unwrap().kind().name(),
        "InterfaceDeclaration"
    );
    assert!(path[3].is_list());
}

#[test]
fn walking_a_bare_sequence_skips_the_missing_root_pair() {
    let catalog = catalog();
    let values = vec![
        Value::from(method(&catalog, "a")),
        Value::from(42i64),
        Value::from(method(&catalog, "b")),
    ];

    let count = walk_list(&values).count();
    assert_eq!(count, 2);
}

#[test]
fn each_walk_invocation_is_an_independent_traversal() {
    let catalog = catalog();
    let unit = sample_unit(&catalog);

    let first: Vec<_> = unit.walk().map(|(_, n)| n.kind().name()).collect();
    let second: Vec<_> = unit.walk().map(|(_, n)| n.kind().name()).collect();
    assert_eq!(first, second);
}

#[test]
fn filter_by_kind_is_the_matching_subsequence_of_walk() {
    let catalog = catalog();
    let unit = sample_unit(&catalog);

    let from_walk: Vec<String> = walk(&unit)
        .filter(|(_, node)| node.kind().is(&catalog.method))
        .filter_map(|(_, node)| node.get("name").and_then(|v| v.as_str()).map(String::from))
        .collect();
    let from_filter: Vec<String> = filter(&unit, Pattern::Kind(&catalog.method))
        .filter_map(|(_, node)| node.get("name").and_then(|v| v.as_str()).map(String::from))
        .collect();

    assert_eq!(from_filter, from_walk);
    assert_eq!(from_filter, vec!["getService", "addService"]);
}

#[test]
fn filter_by_kind_matches_refinements() {
    let catalog = catalog();
    let unit = sample_unit(&catalog);

    // Declaration is refined by both the interface and its methods.
    let declarations = filter(&unit, Pattern::Kind(&catalog.declaration)).count();
    assert_eq!(declarations, 3);

    // Every node refines the base kind.
    let everything = filter(&unit, Pattern::Kind(&catalog.base)).count();
    assert_eq!(everything, walk(&unit).count());
}

#[test]
fn filter_by_value_uses_structural_equality() {
    let catalog = catalog();
    let unit = sample_unit(&catalog);

    // An equal node built independently, not the same allocation.
    let probe = method(&catalog, "getService");
    let hits: Vec<_> = unit.filter(Pattern::Exact(&probe)).collect();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1, &probe);
}
