use json_lens::{DocumentError, DocumentNode, ResolvedValue};
use serde_json::json;

#[test]
fn apply_stores_converted_scalar_overrides() {
    let mut doc = DocumentNode::new(r#"{"a": 1, "b": "x"}"#).expect("document should parse");

    let overrides = json!({"b": "99", "d": "2021-05-01"});
    doc.apply(overrides.as_object().unwrap())
        .expect("apply should succeed");

    assert!(doc.is_fully_cached());
    assert_eq!(*doc.get("b").unwrap(), ResolvedValue::Integer(99));
    assert!(matches!(*doc.get("d").unwrap(), ResolvedValue::DateTime(_)));

    // Untouched members still resolve lazily from the document.
    assert_eq!(*doc.get("a").unwrap(), ResolvedValue::Integer(1));
}

#[test]
fn apply_skips_list_overrides() {
    let mut doc = DocumentNode::new(r#"{"l": [1, 2]}"#).expect("document should parse");

    let overrides = json!({"l": [9]});
    doc.apply(overrides.as_object().unwrap())
        .expect("apply should succeed");

    // The node is marked fully cached even though the list override was
    // skipped; the member later resolves from the document itself.
    assert!(doc.is_fully_cached());
    assert_eq!(
        *doc.get("l").unwrap(),
        ResolvedValue::Sequence(vec![ResolvedValue::Integer(1), ResolvedValue::Integer(2)])
    );
}

#[test]
fn apply_rejects_container_override_for_absent_key() {
    let mut doc = DocumentNode::new(r#"{"a": 1}"#).expect("document should parse");

    let overrides = json!({"zzz": {"k": 1}});
    let err = doc
        .apply(overrides.as_object().unwrap())
        .expect_err("absent key cannot back a child node");
    assert!(matches!(err, DocumentError::InvalidArgument(_)));
}

#[test]
fn apply_caches_scalar_override_for_absent_key() {
    let mut doc = DocumentNode::new(r#"{"a": 1}"#).expect("document should parse");

    let overrides = json!({"zzz": 5});
    doc.apply(overrides.as_object().unwrap())
        .expect("scalar overrides are stored directly");

    assert_eq!(*doc.get("zzz").unwrap(), ResolvedValue::Integer(5));
}

#[test]
fn apply_builds_child_from_document_source() {
    let mut doc =
        DocumentNode::new(r#"{"o": {"k": "v", "extra": "e"}}"#).expect("document should parse");

    let overrides = json!({"o": {"k": "v2"}});
    doc.apply(overrides.as_object().unwrap())
        .expect("apply should succeed");

    let child = doc
        .get("o")
        .unwrap()
        .as_node_mut()
        .expect("o is a node");
    assert!(child.is_fully_cached());

    // The override wins for "k"; "extra" resolves from the child's own
    // document text.
    assert_eq!(
        *child.get("k").unwrap(),
        ResolvedValue::String("v2".to_string())
    );
    assert_eq!(
        *child.get("extra").unwrap(),
        ResolvedValue::String("e".to_string())
    );
}

#[test]
fn composite_array_elements_arrive_fully_cached() {
    let mut doc = DocumentNode::new(r#"{"arr": ["x", {"k": 1}]}"#).expect("document should parse");

    let items = match doc.get("arr").unwrap() {
        ResolvedValue::Sequence(items) => items,
        other => panic!("expected sequence, got {other:?}"),
    };
    let element = match &mut items[1] {
        ResolvedValue::Node(element) => element,
        other => panic!("expected node element, got {other:?}"),
    };
    assert!(element.is_fully_cached());
    assert_eq!(*element.get("k").unwrap(), ResolvedValue::Integer(1));
}

#[test]
fn apply_null_override_resolves_to_missing() {
    let mut doc = DocumentNode::new(r#"{"a": 1}"#).expect("document should parse");

    let overrides = json!({"a": null});
    doc.apply(overrides.as_object().unwrap())
        .expect("apply should succeed");

    assert_eq!(*doc.get("a").unwrap(), ResolvedValue::Missing);
}
