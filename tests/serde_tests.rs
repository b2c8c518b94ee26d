#![cfg(feature = "serde")]

use nested_dict::{Key, NestedMap, Node, Plain, Scalar};
use serde_json::json;

#[test]
fn serialize_keeps_insertion_order() {
    let mut map = NestedMap::new();
    map.at("z").at("b").set(1);
    map.at("z").at("a").set(Scalar::Null);
    map.at("a").set("text");
    map.at(5).set(true);

    let text = serde_json::to_string(&map).unwrap();
    assert_eq!(text, r#"{"z":{"b":1,"a":null},"a":"text","5":true}"#);
}

#[test]
fn deserialize_builds_branches() {
    let value = json!({
        "c": {"d": 4, "e": 5.5},
        "v": {"d": null, "g": "x"},
        "flag": false,
    });
    let map: NestedMap = serde_json::from_value(value).unwrap();

    assert_eq!(map.len(), 3);
    assert!(map.get("c").is_some_and(Node::is_branch));
    assert_eq!(
        map.get_path(["c", "e"]).and_then(Node::as_leaf),
        Some(&Scalar::Float(5.5))
    );
    assert_eq!(
        map.get_path(["v", "d"]).and_then(Node::as_leaf),
        Some(&Scalar::Null)
    );
    assert_eq!(map.get("flag").and_then(Node::as_leaf), Some(&Scalar::Bool(false)));
}

#[test]
fn json_round_trip() {
    let text = r#"{"a":{"b":{"c":"nonsense"},"g":"more of the same"},"n":-3}"#;
    let map: NestedMap = serde_json::from_str(text).unwrap();
    assert_eq!(serde_json::to_string(&map).unwrap(), text);

    let plain: Plain = serde_json::from_str(text).unwrap();
    assert_eq!(map.to_plain(), plain);
}

#[test]
fn sequences_are_rejected() {
    assert!(serde_json::from_str::<NestedMap>(r#"{"a": [1, 2]}"#).is_err());
    assert!(serde_json::from_str::<Plain>("[1]").is_err());
    assert!(serde_json::from_str::<NestedMap>("1").is_err());
}

#[test]
fn out_of_range_integer_is_rejected() {
    assert!(serde_json::from_str::<Scalar>("18446744073709551615").is_err());
    assert_eq!(serde_json::from_str::<Scalar>("7").unwrap(), Scalar::Int(7));
}

#[test]
fn keys_serialize_as_their_value() {
    assert_eq!(serde_json::to_value(Key::Int(3)).unwrap(), json!(3));
    assert_eq!(serde_json::to_value(Key::from("k")).unwrap(), json!("k"));
    assert_eq!(serde_json::from_str::<Key>("\"k\"").unwrap(), Key::from("k"));
}
