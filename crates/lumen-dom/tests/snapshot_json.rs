//! Snapshot loading from JSON payloads

use lumen_dom::{NodeId, Snapshot};

// ============================================================================
// JSON SHAPES
// ============================================================================

#[test]
fn test_nested_json_snapshot() {
    let json = r##"{
        "nodeName": "object",
        "attributes": { "title": "chart" },
        "children": [
            { "nodeName": "#text", "nodeType": 3, "nodeValue": "foobar" }
        ]
    }"##;
    let snap: Snapshot = serde_json::from_str(json).unwrap();
    let tree = snap.to_tree().unwrap();

    let object = tree.document_element().unwrap();
    assert_eq!(tree.tag_name(object), Some("object"));
    assert_eq!(tree.get(object).unwrap().as_element().unwrap().get_attr("title"), Some("chart"));
    assert_eq!(tree.text_content(object), "foobar");
}

#[test]
fn test_missing_fields_default() {
    let snap: Snapshot = serde_json::from_str(r#"{ "nodeName": "p" }"#).unwrap();
    let tree = snap.to_tree().unwrap();
    let p = tree.document_element().unwrap();
    assert_eq!(tree.children(p).count(), 0);
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
}

#[test]
fn test_text_detected_by_name_only() {
    let json = r##"{ "nodeName": "span", "children": [ { "nodeName": "#text", "nodeValue": "x" } ] }"##;
    let snap: Snapshot = serde_json::from_str(json).unwrap();
    let tree = snap.to_tree().unwrap();
    let span = tree.document_element().unwrap();
    let child = tree.children(span).next().unwrap();
    assert!(tree.get(child).unwrap().is_text());
}
