use pretty_assertions::assert_eq;

use super::{AnalyzeOptions, Analyzer, dump};
use crate::inspect::test_support::{chain, counter, counter_registry, cycle, linked_registry, override_registry, replacing_mixin_registry, shop_registry};
use crate::inspect::{Collection, Key, Literal, Object, Scalar, SnapshotNode, Value, Visibility};

fn analyze_with(max_depth: u32, value: &Value, registry: &crate::inspect::Registry) -> SnapshotNode {
	Analyzer::new(registry, AnalyzeOptions { max_depth }).analyze(value)
}

fn next_of(node: &SnapshotNode) -> &SnapshotNode {
	let composite = node.as_composite().expect("composite node");
	&composite.field("next").expect("next field").value
}

#[test]
fn default_options_match_constructor_and_quick_presets() {
	assert_eq!(AnalyzeOptions::default().max_depth, 5);
	assert_eq!(AnalyzeOptions::for_quick_dump().max_depth, 3);
}

#[test]
fn counter_object_yields_field_and_behavior_descriptors() {
	let registry = counter_registry();
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(counter(5)));
	let composite = node.as_composite().expect("composite node");

	assert_eq!(composite.type_name, "Counter");
	assert_eq!(composite.parent, None);

	assert_eq!(composite.fields.len(), 1);
	let count = composite.field("count").expect("count field");
	assert_eq!(count.visibility, Visibility::Public);
	assert_eq!(count.ty.as_deref(), Some("number"));
	assert_eq!(count.value, SnapshotNode::scalar(Scalar::Int(5)));
	assert!(count.is_initialized);

	assert_eq!(composite.behaviors.len(), 1);
	let get = composite.behavior("get").expect("get behavior");
	assert_eq!(get.visibility, Visibility::Public);
	assert!(get.parameters.is_empty());
	assert_eq!(get.return_type.as_deref(), Some("number"));
}

#[test]
fn implementing_abstract_parent_behavior_is_override() {
	let registry = override_registry();
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(Object::new("Child")));
	let composite = node.as_composite().expect("composite node");

	let run = composite.behavior("run").expect("run behavior");
	assert!(run.is_override);
	assert!(!run.is_abstract);
	assert_eq!(run.declaring_type, "Child");

	let name = composite.behavior("name").expect("name behavior");
	assert!(!name.is_override, "parent declaration is concrete");
	assert_eq!(composite.behaviors.len(), 2);
}

#[test]
fn abstract_declaration_on_its_own_type_is_not_override() {
	let registry = override_registry();
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(Object::new("Base")));
	let run = node.as_composite().and_then(|composite| composite.behavior("run")).expect("run behavior");

	assert!(run.is_abstract);
	assert!(!run.is_override);
}

#[test]
fn own_behavior_replacing_mixin_behavior_keeps_mixin_name() {
	let registry = replacing_mixin_registry();
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(Object::new("Host")));
	let composite = node.as_composite().expect("composite node");

	let greet = composite.behavior("greet").expect("greet behavior");
	assert_eq!(greet.declaring_type, "Host");
	assert_eq!(greet.mixin.as_deref(), Some("Greeting"));
	assert!(greet.is_override, "body is declared on Host itself");

	let wave = composite.behavior("wave").expect("wave behavior");
	assert_eq!(wave.mixin.as_deref(), Some("Greeting"));
	assert!(!wave.is_override);
	assert_eq!(composite.behaviors.len(), 2);
}

#[test]
fn depth_budget_one_expands_root_only() {
	let registry = linked_registry();
	let node = analyze_with(1, &Value::Object(chain()), &registry);

	assert_eq!(node.as_composite().map(|composite| composite.type_name.as_str()), Some("A"));
	assert_eq!(next_of(&node).sentinel_type(), Some("B"));
}

#[test]
fn depth_budget_two_stops_at_third_level() {
	let registry = linked_registry();
	let node = analyze_with(2, &Value::Object(chain()), &registry);

	let b = next_of(&node);
	assert_eq!(b.as_composite().map(|composite| composite.type_name.as_str()), Some("B"));
	assert_eq!(next_of(b).sentinel_type(), Some("C"));
}

#[test]
fn depth_budget_zero_replaces_root() {
	let registry = linked_registry();
	let node = analyze_with(0, &Value::Object(chain()), &registry);

	assert_eq!(node, SnapshotNode::recursion_sentinel("A"));
	assert_eq!(node.as_scalar().and_then(Scalar::as_str), Some("[Recursion or max depth reached: A]"));
}

#[test]
fn collection_elements_consume_depth() {
	let registry = linked_registry();
	let value = Value::list([Value::Object(Object::new("C"))]);

	let shallow = analyze_with(1, &value, &registry);
	let entry = shallow.as_collection().and_then(|items| items.get(&Key::Int(0))).expect("first entry");
	assert_eq!(entry.sentinel_type(), Some("C"));

	let deeper = analyze_with(2, &value, &registry);
	let entry = deeper.as_collection().and_then(|items| items.get(&Key::Int(0))).expect("first entry");
	assert!(entry.as_composite().is_some());
}

#[test]
fn cycle_terminates_and_rerun_resets_visited_state() {
	let registry = linked_registry();
	let root = Value::Object(cycle());
	let mut analyzer = Analyzer::new(&registry, AnalyzeOptions::default());

	let first = analyzer.analyze(&root);
	let b = next_of(&first);
	assert_eq!(b.as_composite().map(|composite| composite.type_name.as_str()), Some("B"));
	assert_eq!(next_of(b).sentinel_type(), Some("A"));

	let second = analyzer.analyze(&root);
	assert_eq!(first, second);
}

#[test]
fn shared_object_expands_once_per_call() {
	let registry = linked_registry();
	let shared = Value::Object(Object::new("C"));
	let value = Value::list([shared.clone(), shared]);
	let node = analyze_with(5, &value, &registry);
	let items = node.as_collection().expect("collection");

	assert!(items.get(&Key::Int(0)).and_then(SnapshotNode::as_composite).is_some());
	assert_eq!(items.get(&Key::Int(1)).and_then(SnapshotNode::sentinel_type), Some("C"));
}

#[test]
fn collection_preserves_source_order_and_keys() {
	let registry = linked_registry();
	let value = Value::Collection(Collection::from_pairs([(Key::from("b"), Value::Int(1)), (Key::from("a"), Value::Int(2))]));
	let node = analyze_with(5, &value, &registry);
	let keys: Vec<String> = node.as_collection().expect("collection").keys().map(ToString::to_string).collect();

	assert_eq!(keys, ["b", "a"]);
}

#[test]
fn fresh_analyzers_produce_identical_trees() {
	let registry = shop_registry();
	let product = Value::Object(Object::with_slots("Product", [("id", Value::Int(7)), ("name", Value::str("Lamp"))]));

	let first = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&product);
	let second = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&product);
	assert_eq!(first, second);
}

#[test]
fn uninitialized_field_yields_sentinel_without_read() {
	let registry = counter_registry();
	let node = Analyzer::new(&registry, AnalyzeOptions { max_depth: 1 }).analyze(&Value::Object(Object::new("Counter")));
	let count = node.as_composite().and_then(|composite| composite.field("count")).expect("count field");

	assert!(count.value.is_uninitialized());
	assert_eq!(count.value.sentinel_type(), None);
	assert!(!count.is_initialized);
	assert!(!count.has_default);
}

#[test]
fn product_snapshot_covers_inherited_mixed_in_and_dynamic_members() {
	let registry = shop_registry();
	let product = Object::with_slots("Product", [("id", Value::Int(7)), ("name", Value::str("Lamp")), ("extra", Value::Bool(true))]);
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(product));
	let composite = node.as_composite().expect("composite node");

	assert_eq!(composite.doc.as_deref(), Some("A sellable product."));
	assert_eq!(composite.file.as_deref(), Some("src/Product.php"));
	assert_eq!((composite.start_line, composite.end_line), (Some(10), Some(42)));
	assert!(composite.is_final);
	assert!(composite.is_cloneable);
	assert!(!composite.is_enum);
	assert_eq!(composite.parent.as_deref(), Some("Entity"));
	assert_eq!(composite.interfaces, ["Priced", "HasLabel"]);
	assert_eq!(composite.mixins, ["Timestamps"]);
	assert_eq!(composite.constant("MAX_QTY"), Some(&Literal::int(99)));
	assert_eq!(composite.constant("CURRENCY"), Some(&Literal::str("EUR")));
	assert_eq!(composite.decorations[0].name, "Table");

	let names: Vec<&str> = composite.fields.iter().map(|field| field.name.as_str()).collect();
	assert_eq!(names, ["name", "tags", "instances", "created", "id", "secret", "extra"]);

	let name = composite.field("name").expect("name field");
	assert_eq!(name.doc.as_deref(), Some("Display name."));

	let created = composite.field("created").expect("created field");
	assert_eq!(created.declaring_type, "Product");
	assert_eq!(created.ty.as_deref(), Some("?string"));
	assert_eq!(created.value, SnapshotNode::scalar(Scalar::Null));

	let id = composite.field("id").expect("id field");
	assert_eq!(id.declaring_type, "Entity");
	assert_eq!(id.visibility, Visibility::Protected);
	assert!(id.is_readonly);
	assert_eq!(id.value, SnapshotNode::scalar(Scalar::Int(7)));

	let secret = composite.field("secret").expect("secret field");
	assert_eq!(secret.visibility, Visibility::Private);
	assert!(secret.has_default);
	assert!(secret.is_initialized);

	let instances = composite.field("instances").expect("instances field");
	assert!(instances.is_static);
	assert_eq!(instances.value, SnapshotNode::scalar(Scalar::Int(0)));

	let extra = composite.field("extra").expect("dynamic field");
	assert_eq!(extra.visibility, Visibility::Public);
	assert_eq!(extra.ty, None);
	assert!(extra.is_initialized);
	assert!(!extra.has_default);

	let behaviors: Vec<&str> = composite.behaviors.iter().map(|behavior| behavior.name.as_str()).collect();
	assert_eq!(behaviors, ["__construct", "label", "price", "audit", "touch"]);

	let touch = composite.behavior("touch").expect("mixin behavior");
	assert_eq!(touch.mixin.as_deref(), Some("Timestamps"));
	assert_eq!(touch.declaring_type, "Product");
	assert!(!touch.is_override);

	assert!(composite.behavior("label").is_some_and(|label| label.is_override));
	assert!(composite.behavior("price").is_some_and(|price| !price.is_override));
	assert_eq!(composite.behavior("audit").map(|audit| audit.visibility), Some(Visibility::Private));

	let construct = composite.behavior("__construct").expect("constructor");
	assert!(construct.parameters[0].is_promoted);
	assert!(construct.parameters[1].is_optional);
}

#[test]
fn static_field_reads_registry_value() {
	let registry = shop_registry();
	registry.set_static("Product", "instances", Value::Int(3));
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(Object::new("Product")));
	let instances = node.as_composite().and_then(|composite| composite.field("instances")).expect("instances field");

	assert_eq!(instances.value, SnapshotNode::scalar(Scalar::Int(3)));
}

#[test]
fn enum_cases_use_backing_value_or_name() {
	let registry = shop_registry();
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(Object::new("Status")));
	let composite = node.as_composite().expect("composite node");

	assert!(composite.is_enum);
	assert!(!composite.is_cloneable);
	assert_eq!(composite.case("Active"), Some(&Literal::str("active")));
	assert_eq!(composite.case("Gone"), Some(&Literal::str("Gone")));
}

#[test]
fn unknown_type_still_yields_composite_with_dynamic_fields() {
	let registry = counter_registry();
	let ghost = Object::with_slots("Ghost", [("x", Value::Int(1))]);
	let node = Analyzer::new(&registry, AnalyzeOptions::default()).analyze(&Value::Object(ghost));
	let composite = node.as_composite().expect("composite node");

	assert_eq!(composite.type_name, "Ghost");
	assert!(composite.behaviors.is_empty());
	assert_eq!(composite.field("x").map(|field| field.value.clone()), Some(SnapshotNode::scalar(Scalar::Int(1))));
}

#[test]
fn opaque_values_become_scalar_text() {
	let registry = counter_registry();
	let node = analyze_with(5, &Value::Opaque("resource(stream)".into()), &registry);
	assert_eq!(node, SnapshotNode::scalar(Scalar::Opaque("resource(stream)".into())));
}

#[test]
fn dump_uses_quick_preset() {
	let registry = linked_registry();
	let root = Value::Object(chain());
	let quick = Analyzer::new(&registry, AnalyzeOptions::for_quick_dump()).analyze(&root);
	assert_eq!(dump(&registry, &root), quick);
}

#[test]
fn snapshot_serializes_with_kind_tags() {
	let registry = counter_registry();
	let node = dump(&registry, &Value::Object(counter(5)));
	let json = serde_json::to_value(&node).expect("serializes");

	assert_eq!(json["kind"], "composite");
	assert_eq!(json["type"], "Counter");
	assert!(json["identity"].as_str().is_some_and(|identity| identity.starts_with("0x")));
	assert_eq!(json["fields"][0]["value"], serde_json::json!({ "kind": "scalar", "value": 5 }));
	assert_eq!(json["behaviors"][0]["name"], "get");
}
