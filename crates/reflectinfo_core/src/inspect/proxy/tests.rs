use std::cell::RefCell;
use std::rc::Rc;

use super::{Dispatch, Proxy, Receiver};
use crate::inspect::test_support::{replacing_mixin_registry, shop_registry};
use crate::inspect::{InspectError, Object, Registry, Value};

fn bound_registry() -> Registry {
	let mut registry = shop_registry();
	registry.bind("Product", "label", |object, _| object.get("name").unwrap_or(Value::Null));
	registry.bind("Product", "price", |_, args| args.first().cloned().unwrap_or(Value::Int(0)));
	registry.bind("Product", "audit", |_, _| Value::Bool(true));
	registry.bind("Timestamps", "touch", |object, _| {
		object.set("created", Value::str("now"));
		Value::Null
	});
	registry
}

fn recorded(registry: &Registry, object: crate::inspect::ObjectRef) -> (Proxy<Receiver<'_>>, Rc<RefCell<Vec<String>>>) {
	let log = Rc::new(RefCell::new(Vec::new()));
	let before_log = Rc::clone(&log);
	let after_log = Rc::clone(&log);
	let proxy = Proxy::new(Receiver::new(registry, object))
		.before(move |type_name, member, args| before_log.borrow_mut().push(format!("before {type_name}::{member} args={}", args.len())))
		.after(move |type_name, member, _, result| after_log.borrow_mut().push(format!("after {type_name}::{member} -> {result:?}")));
	(proxy, log)
}

#[test]
fn hooks_wrap_delegated_call_in_order() {
	let registry = bound_registry();
	let product = Object::with_slots("Product", [("name", Value::str("Lamp"))]);
	let (proxy, log) = recorded(&registry, product);

	let result = proxy.call("price", &[Value::Int(12)]).expect("public call");
	assert!(matches!(result, Value::Int(12)));
	assert_eq!(*log.borrow(), ["before Product::price args=1", "after Product::price -> Int(12)"]);
}

#[test]
fn non_public_behavior_is_rejected_before_hooks() {
	let registry = bound_registry();
	let (proxy, log) = recorded(&registry, Object::new("Product"));

	let err = proxy.call("audit", &[]).expect_err("private behavior");
	assert!(matches!(err, InspectError::NonPublicMember { member, .. } if member == "audit"));
	assert!(log.borrow().is_empty());
}

#[test]
fn unknown_behavior_is_rejected_before_hooks() {
	let registry = bound_registry();
	let (proxy, log) = recorded(&registry, Object::new("Product"));

	let err = proxy.call("explode", &[]).expect_err("unknown behavior");
	assert!(matches!(err, InspectError::UnknownBehavior { behavior, .. } if behavior == "explode"));
	assert!(log.borrow().is_empty());
}

#[test]
fn mixin_body_is_resolved_through_mixin_name() {
	let registry = bound_registry();
	let product = Object::new("Product");
	let (proxy, _) = recorded(&registry, product.clone());

	proxy.call("touch", &[]).expect("mixin call");
	assert!(matches!(product.get("created"), Some(Value::Str(text)) if &*text == "now"));
}

#[test]
fn missing_body_is_reported() {
	let registry = shop_registry();
	let receiver = Receiver::new(&registry, Object::new("Product"));

	let err = receiver.call("price", &[]).expect_err("no native body");
	assert!(matches!(err, InspectError::MissingImplementation { type_name, .. } if type_name == "Product"));
}

#[test]
fn field_reads_pass_hooks_and_fall_through_to_slots() {
	let registry = bound_registry();
	let product = Object::with_slots("Product", [("name", Value::str("Lamp")), ("extra", Value::Int(1))]);
	let (proxy, log) = recorded(&registry, product);

	assert!(matches!(proxy.get("name"), Ok(Value::Str(text)) if &*text == "Lamp"));
	assert!(matches!(proxy.get("extra"), Ok(Value::Int(1))));
	assert!(matches!(proxy.get("missing"), Err(InspectError::UnknownField { .. })));
	assert_eq!(log.borrow().len(), 4);
}

#[test]
fn protected_field_is_rejected() {
	let registry = bound_registry();
	let (proxy, _) = recorded(&registry, Object::with_slots("Product", [("id", Value::Int(1))]));

	assert!(matches!(proxy.get("id"), Err(InspectError::NonPublicMember { .. })));
	assert!(matches!(proxy.set("id", Value::Int(2)), Err(InspectError::NonPublicMember { .. })));
}

#[test]
fn uninitialized_read_and_readonly_write_are_errors_on_receiver() {
	let registry = bound_registry();
	let product = Object::new("Product");
	let receiver = Receiver::new(&registry, product.clone());

	assert!(matches!(receiver.get("id"), Err(InspectError::UninitializedField { .. })));
	receiver.set("id", Value::Int(1)).expect("first write initializes");
	assert!(matches!(receiver.set("id", Value::Int(2)), Err(InspectError::ReadOnlyField { .. })));
	assert!(matches!(product.get("id"), Some(Value::Int(1))));
}

#[test]
fn writes_create_dynamic_slots_and_update_statics() {
	let registry = bound_registry();
	let product = Object::new("Product");
	let (proxy, log) = recorded(&registry, product.clone());

	proxy.set("color", Value::str("red")).expect("dynamic write");
	proxy.set("instances", Value::Int(9)).expect("static write");

	assert!(product.has("color"));
	assert!(!product.has("instances"));
	assert!(matches!(proxy.get("instances"), Ok(Value::Int(9))));
	assert_eq!(log.borrow()[0], "before Product::color args=1");
	assert_eq!(log.borrow()[1], "after Product::color -> Null");
}

#[test]
fn replaced_mixin_behavior_dispatches_to_own_body() {
	let mut registry = replacing_mixin_registry();
	registry.bind("Greeting", "greet", |_, _| Value::str("mixin"));
	registry.bind("Greeting", "wave", |_, _| Value::str("wave"));
	registry.bind("Host", "greet", |_, _| Value::str("host"));
	let proxy = Proxy::new(Receiver::new(&registry, Object::new("Host")));

	assert!(matches!(proxy.call("greet", &[]).expect("own body"), Value::Str(text) if &*text == "host"));
	assert!(matches!(proxy.call("wave", &[]).expect("mixin body"), Value::Str(text) if &*text == "wave"));
}
