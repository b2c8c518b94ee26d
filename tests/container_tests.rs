use nested_dict::{IndexMap, Key, NestedMap, Node, Plain, Scalar};

fn leaf(map: &NestedMap, path: &[&str]) -> Option<Scalar> {
    map.get_path(path).and_then(Node::as_leaf).cloned()
}

#[test]
fn chained_write_then_read() {
    let mut nested = NestedMap::new();
    nested.at("a").at("b").at("c").set("nonsense");
    nested.at("a").at("g").set("more of the same");

    assert_eq!(leaf(&nested, &["a", "b", "c"]), Some("nonsense".into()));
    assert_eq!(leaf(&nested, &["a", "g"]), Some("more of the same".into()));

    let expected: Plain = [(
        "a",
        Plain::from_iter([
            ("b", Plain::from_iter([("c", "nonsense")])),
            ("g", Plain::from("more of the same")),
        ]),
    )]
    .into_iter()
    .collect();
    assert_eq!(nested.to_plain(), expected);
}

#[test]
fn every_prefix_is_materialized() {
    let mut map = NestedMap::new();
    let path = ["k1", "k2", "k3", "k4", "k5"];
    map.path(path).unwrap().set(42);

    for end in 1..path.len() {
        let node = map.get_path(&path[..end]).unwrap();
        assert!(node.is_branch(), "prefix {:?} should be a branch", &path[..end]);
    }
    assert_eq!(leaf(&map, &path), Some(Scalar::Int(42)));
}

#[test]
fn pending_path_without_write_leaves_tree_untouched() {
    let mut map = NestedMap::new();
    map.at("x").set(1);

    let slot = map.at("a").at("b").at("c");
    assert!(slot.is_pending());
    let keys = slot
        .pending_path()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(keys, vec![Key::from("a"), Key::from("b"), Key::from("c")]);
    drop(slot);

    assert_eq!(map.len(), 1);
    assert!(!map.contains("a"));
}

#[test]
fn pending_path_resumes_below_existing_branch() {
    let mut map = NestedMap::new();
    map.at("a").at("b").set(1);

    let slot = map.at("a").at("c").at("d");
    let keys = slot
        .pending_path()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(keys, vec![Key::from("c"), Key::from("d")]);
    slot.set(2);

    let a = map.get("a").and_then(Node::as_branch).unwrap();
    assert_eq!(a.keys().cloned().collect::<Vec<_>>(), vec![Key::from("b"), Key::from("c")]);
}

#[test]
fn found_slot_reads_existing_node() {
    let mut map = NestedMap::new();
    map.at("a").at("b").set(3.5);

    let slot = map.at("a").at("b");
    assert!(slot.is_found());
    assert_eq!(slot.get().and_then(Node::as_leaf), Some(&Scalar::Float(3.5)));
}

#[test]
fn scalar_assignment_replaces_subtree() {
    let mut map = NestedMap::new();
    map.at("a").at("b").at("c").set(1);
    map.at("a").set(5);

    assert_eq!(leaf(&map, &["a"]), Some(Scalar::Int(5)));
    assert!(map.get_path(["a", "b"]).is_none());
}

#[test]
fn chaining_through_a_leaf_replaces_it_on_write() {
    let mut map = NestedMap::new();
    map.at("a").set(5);

    let slot = map.at("a").at("b");
    assert!(slot.is_pending());
    drop(slot);
    assert_eq!(leaf(&map, &["a"]), Some(Scalar::Int(5)));

    map.at("a").at("b").set(6);
    assert_eq!(leaf(&map, &["a", "b"]), Some(Scalar::Int(6)));
}

#[test]
fn structural_assignment_builds_subtree() {
    let plain = Plain::from_iter([("x", Plain::from_iter([("y", 1)]))]);
    let mut map = NestedMap::new();
    map.set("root", plain.clone());

    assert!(map.get("root").unwrap().is_branch());
    assert_eq!(map.get("root").unwrap().to_plain(), plain);
    assert_eq!(leaf(&map, &["root", "x", "y"]), Some(Scalar::Int(1)));
}

#[test]
fn overwrite_keeps_position() {
    let mut map = NestedMap::from_iter([("a", 1), ("b", 2), ("c", 3)]);
    let old = map.set("b", 20);

    assert_eq!(old, Some(Node::from(2)));
    let keys = map.keys().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn get_or_create_inserts_empty_branch() {
    let mut map = NestedMap::new();
    assert!(map.get_or_create("a").is_branch());
    assert!(map.contains("a"));
    assert!(map.get("a").unwrap().as_branch().unwrap().is_empty());

    map.at("b").set(1);
    assert_eq!(map.get_or_create("b"), &mut Node::from(1));
}

#[test]
fn slot_or_default_materializes_branches() {
    let mut map = NestedMap::new();
    let node = map.at("a").at("b").or_default();
    assert!(node.is_branch());
    assert!(map.get_path(["a", "b"]).unwrap().is_branch());

    let existing = map.at("a").or_insert(7);
    assert!(existing.is_branch());
}

#[test]
fn slot_or_insert_branch() {
    let mut map = NestedMap::new();
    map.at("a").at("b").or_insert_branch().set("c", 1);
    assert_eq!(leaf(&map, &["a", "b", "c"]), Some(Scalar::Int(1)));

    // an existing branch is returned as is
    assert_eq!(map.at("a").or_insert_branch().len(), 1);

    map.at("x").set(1);
    assert!(map.at("x").or_insert_branch().is_empty());
    assert!(map.get("x").unwrap().is_branch());
}

#[test]
fn lookups_do_not_mutate() {
    let map = NestedMap::from_iter([("a", 1)]);
    let default = Node::from("fallback");

    assert!(!map.contains("missing"));
    assert!(map.get("missing").is_none());
    assert_eq!(map.get_or("missing", &default), &default);
    assert!(map.get_path(["missing", "deeper"]).is_none());
    assert!(map.get_path(["a", "deeper"]).is_none());
    assert!(map.get_path(Vec::<&str>::new()).is_none());
    assert_eq!(map.len(), 1);
}

#[test]
fn enumeration_follows_insertion_order() {
    let mut map = NestedMap::new();
    map.at("z").set(1);
    map.at("a").at("x").set(2);
    map.at(3).set(3);

    let keys = map.keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec![Key::from("z"), Key::from("a"), Key::Int(3)]);
    assert_eq!(map.values().filter(|node| node.is_leaf()).count(), 2);
    assert_eq!(map.iter().count(), 3);
}

#[test]
fn integer_and_string_keys_are_distinct() {
    let mut map = NestedMap::new();
    map.at(1).set("int");
    map.at("1").set("str");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(1).and_then(Node::as_leaf), Some(&Scalar::from("int")));
    assert_eq!(map.get("1").and_then(Node::as_leaf), Some(&Scalar::from("str")));
}

#[test]
fn underscore_keys_are_ordinary_keys() {
    let mut map = NestedMap::new();
    map.at("_data").at("_x").set(1);

    assert!(map.contains("_data"));
    assert_eq!(leaf(&map, &["_data", "_x"]), Some(Scalar::Int(1)));
}

#[test]
fn remove_preserves_order_of_rest() {
    let mut map = NestedMap::from_iter([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(map.remove("b"), Some(Node::from(2)));
    assert_eq!(map.remove("b"), None);

    let keys = map.keys().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(keys, vec!["a", "c"]);
}

#[test]
fn update_sets_each_entry() {
    let mut map = NestedMap::from_iter([("a", 1)]);
    map.update([("a", 10), ("b", 20)]);

    assert_eq!(leaf(&map, &["a"]), Some(Scalar::Int(10)));
    assert_eq!(leaf(&map, &["b"]), Some(Scalar::Int(20)));
}

#[test]
fn plain_round_trip() {
    let mut entries = IndexMap::new();
    entries.insert(
        Key::from("c"),
        Plain::from_iter([("d", Plain::from(4)), ("e", Plain::from(5.5))]),
    );
    entries.insert(Key::from("v"), Plain::from(()));
    entries.insert(Key::Int(7), Plain::from_iter([("deep", Plain::from_iter([("er", true)]))]));

    let map = NestedMap::from_plain(entries.clone());
    assert_eq!(map.to_plain(), Plain::Map(entries.clone()));

    // converting an already plain structure again changes nothing
    let once = map.to_plain();
    let twice = NestedMap::from_plain(once.clone().into_map().unwrap()).to_plain();
    assert_eq!(once, twice);
    assert_eq!(once.to_plain(), once);
}

#[test]
fn depth_and_leaves() {
    let mut map = NestedMap::new();
    assert_eq!(map.depth(), 0);

    map.at("a").at("b").at("c").set(1);
    map.at("a").at("d").set(2);
    map.at("e").set(3);
    assert_eq!(map.depth(), 3);

    let leaves = map
        .leaves()
        .into_iter()
        .map(|(path, value)| {
            let path = path.iter().map(ToString::to_string).collect::<Vec<_>>();
            (path.join("."), value.clone())
        })
        .collect::<Vec<_>>();
    assert_eq!(
        leaves,
        vec![
            ("a.b.c".to_owned(), Scalar::Int(1)),
            ("a.d".to_owned(), Scalar::Int(2)),
            ("e".to_owned(), Scalar::Int(3)),
        ]
    );
}

#[test]
fn structure_dump() {
    let mut map = NestedMap::new();
    map.at("a").at("b").set(1);
    map.at("a").at("c").set("x");
    map.at("d").set(2.5);

    assert_eq!(map.structure(true), "a:\n  b: 1\n  c: x\nd: 2.5\n");
    assert_eq!(map.structure(false), "a:\n  b\n  c\nd\n");
}
