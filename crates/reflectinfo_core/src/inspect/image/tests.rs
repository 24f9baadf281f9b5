use std::rc::Rc;

use super::HeapImage;
use crate::inspect::{InspectError, Key, TypeMetadata, Value};

const CYCLIC: &str = r#"{
	"types": [
		{ "name": "Node", "fields": [{ "name": "next", "type": "?Node" }, { "name": "label" }] },
		{ "name": "Config", "fields": [{ "name": "instances", "type": "int", "static": true, "default": 0 }] }
	],
	"statics": [{ "type": "Config", "field": "instances", "value": 2 }],
	"objects": [
		{ "id": "a", "type": "Node", "fields": { "next": { "$ref": "b" }, "label": "first" } },
		{ "id": "b", "type": "Node", "fields": { "next": { "$ref": "a" } } }
	],
	"roots": {
		"head": { "$ref": "a" },
		"payload": { "z": 1, "a": [true, null, 1.5], "handle": { "$opaque": "resource(stream)" } }
	}
}"#;

#[test]
fn forward_references_build_cycles() {
	let image = HeapImage::from_json_str(CYCLIC).expect("valid image");
	let a = image.object("a").expect("object a");
	let b = image.object("b").expect("object b");

	let a_next = a.get("next").expect("a.next assigned");
	let b_next = b.get("next").expect("b.next assigned");
	assert!(Rc::ptr_eq(a_next.as_object().expect("object"), b));
	assert!(Rc::ptr_eq(b_next.as_object().expect("object"), a));

	let head = image.root("head").expect("head root");
	assert!(Rc::ptr_eq(head.as_object().expect("object"), a));
}

#[test]
fn counts_and_root_order_follow_document() {
	let image = HeapImage::from_json_str(CYCLIC).expect("valid image");

	assert_eq!(image.registry().len(), 2);
	assert_eq!(image.object_count(), 2);
	assert_eq!(image.root_names().collect::<Vec<_>>(), ["head", "payload"]);
	assert_eq!(image.first_root().map(|(name, _)| name).ok(), Some("head"));
}

#[test]
fn json_objects_become_ordered_collections_with_markers() {
	let image = HeapImage::from_json_str(CYCLIC).expect("valid image");
	let Value::Collection(payload) = image.root("payload").expect("payload root") else {
		panic!("payload should be a collection");
	};

	let keys: Vec<String> = payload.iter().map(|(key, _)| key.to_string()).collect();
	assert_eq!(keys, ["z", "a", "handle"]);
	assert!(matches!(payload.get(&Key::from("handle")), Some(Value::Opaque(text)) if &**text == "resource(stream)"));
	assert!(matches!(payload.get(&Key::from("a")), Some(Value::Collection(items)) if items.len() == 3));
}

#[test]
fn statics_are_stored_on_the_registry() {
	let image = HeapImage::from_json_str(CYCLIC).expect("valid image");
	assert!(matches!(image.registry().static_value("Config", "instances"), Some(Value::Int(2))));
}

#[test]
fn unknown_reference_is_rejected() {
	let err = HeapImage::from_json_str(r#"{ "roots": { "x": { "$ref": "missing" } } }"#).expect_err("dangling ref");
	assert!(matches!(err, InspectError::UnknownObjectRef { id } if id == "missing"));
}

#[test]
fn duplicate_object_id_is_rejected() {
	let text = r#"{ "objects": [{ "id": "a", "type": "X" }, { "id": "a", "type": "Y" }] }"#;
	let err = HeapImage::from_json_str(text).expect_err("duplicate id");
	assert!(matches!(err, InspectError::DuplicateObjectId { id } if id == "a"));
}

#[test]
fn unknown_parent_is_rejected() {
	let err = HeapImage::from_json_str(r#"{ "types": [{ "name": "A", "parent": "Nope" }] }"#).expect_err("unknown parent");
	assert!(matches!(err, InspectError::UnknownTypeRef { role: "parent", .. }));
}

#[test]
fn invalid_type_expression_surfaces_as_json_error() {
	let text = r#"{ "types": [{ "name": "A", "fields": [{ "name": "x", "type": "int||" }] }] }"#;
	let err = HeapImage::from_json_str(text).expect_err("bad type expression");
	assert!(matches!(err, InspectError::Json(_)));
	assert!(err.to_string().contains("int||"));
}

#[test]
fn missing_roots_are_reported() {
	let image = HeapImage::from_json_str("{}").expect("empty image");
	assert!(matches!(image.first_root(), Err(InspectError::NoRoots)));
	assert!(matches!(image.root("head"), Err(InspectError::RootNotFound { name }) if name == "head"));
}
