//! Shared declarations and object graphs for unit tests.

use crate::inspect::{BehaviorDecl, FieldDecl, Object, ObjectRef, Registry, TypeDecl, TypeExpr, Value, Visibility};

/// `Counter { count: number = 5 }` with one public `get()`.
pub(crate) fn counter_registry() -> Registry {
	Registry::from_decls([TypeDecl::class("Counter")
		.field(FieldDecl::new("count").typed(TypeExpr::named("number")))
		.behavior(BehaviorDecl::new("get").returns(TypeExpr::named("number")))])
	.expect("valid declarations")
}

pub(crate) fn counter(count: i64) -> ObjectRef {
	Object::with_slots("Counter", [("count", Value::Int(count))])
}

/// Abstract `Base::run` implemented by `Child`.
pub(crate) fn override_registry() -> Registry {
	Registry::from_decls([
		TypeDecl::class("Base")
			.as_abstract()
			.behavior(BehaviorDecl::new("run").as_abstract())
			.behavior(BehaviorDecl::new("name").returns(TypeExpr::named("string"))),
		TypeDecl::class("Child")
			.extends("Base")
			.behavior(BehaviorDecl::new("run"))
			.behavior(BehaviorDecl::new("name").returns(TypeExpr::named("string"))),
	])
	.expect("valid declarations")
}

/// `Host` uses mixin `Greeting` and replaces its `greet`, which abstract `Speaker` declares.
pub(crate) fn replacing_mixin_registry() -> Registry {
	Registry::from_decls([
		TypeDecl::mixin("Greeting")
			.behavior(BehaviorDecl::new("greet").returns(TypeExpr::named("string")))
			.behavior(BehaviorDecl::new("wave")),
		TypeDecl::class("Speaker").as_abstract().behavior(BehaviorDecl::new("greet").as_abstract()),
		TypeDecl::class("Host")
			.extends("Speaker")
			.uses("Greeting")
			.behavior(BehaviorDecl::new("greet").returns(TypeExpr::named("string"))),
	])
	.expect("valid declarations")
}

/// Three linked types `A`, `B`, `C`, each with an untyped public `next` field.
pub(crate) fn linked_registry() -> Registry {
	Registry::from_decls(["A", "B", "C"].map(|name| TypeDecl::class(name).field(FieldDecl::new("next"))))
		.expect("valid declarations")
}

/// `A -> B -> C`.
pub(crate) fn chain() -> ObjectRef {
	let c = Object::new("C");
	let b = Object::with_slots("B", [("next", Value::Object(c))]);
	Object::with_slots("A", [("next", Value::Object(b))])
}

/// `A -> B -> A`.
pub(crate) fn cycle() -> ObjectRef {
	let a = Object::new("A");
	let b = Object::with_slots("B", [("next", Value::Object(a.clone()))]);
	a.set("next", Value::Object(b));
	a
}

/// A small domain model touching every member kind.
pub(crate) fn shop_registry() -> Registry {
	use crate::inspect::{Decoration, Literal, ParamDecl};

	Registry::from_decls([
		TypeDecl::interface("HasLabel").behavior(BehaviorDecl::new("label").returns(TypeExpr::named("string"))),
		TypeDecl::interface("Priced")
			.implements("HasLabel")
			.constant("CURRENCY", Literal::str("EUR"))
			.behavior(BehaviorDecl::new("price").returns(TypeExpr::named("int"))),
		TypeDecl::mixin("Timestamps")
			.field(FieldDecl::new("created").typed(TypeExpr::nullable("string")).default_value(Literal::NULL))
			.behavior(BehaviorDecl::new("touch").returns(TypeExpr::named("void"))),
		TypeDecl::enumeration("Status").case("Active", Some(Literal::str("active"))).case("Gone", None),
		TypeDecl::class("Entity")
			.as_abstract()
			.field(FieldDecl::new("id").typed(TypeExpr::named("int")).visibility(Visibility::Protected).as_readonly())
			.field(FieldDecl::new("secret").visibility(Visibility::Private))
			.behavior(BehaviorDecl::new("label").as_abstract().returns(TypeExpr::named("string"))),
		TypeDecl::class("Product")
			.extends("Entity")
			.implements("Priced")
			.uses("Timestamps")
			.as_final()
			.doc("/**\n * A sellable product.\n */")
			.located("src/Product.php", 10, 42)
			.decorate(Decoration::new("Table", [Literal::str("products")]))
			.constant("MAX_QTY", Literal::int(99))
			.field(FieldDecl::new("name").typed(TypeExpr::named("string")).doc("/** Display name. */"))
			.field(FieldDecl::new("tags").typed(TypeExpr::named("array")).default_value(Literal::list([])))
			.field(FieldDecl::new("instances").typed(TypeExpr::named("int")).as_static().default_value(Literal::int(0)))
			.behavior(
				BehaviorDecl::new("__construct").param(ParamDecl::new("id").typed(TypeExpr::named("int")).as_promoted()).param(
					ParamDecl::new("name")
						.typed(TypeExpr::named("string"))
						.default_value(Literal::str("unnamed")),
				),
			)
			.behavior(BehaviorDecl::new("label").returns(TypeExpr::named("string")))
			.behavior(BehaviorDecl::new("price").returns(TypeExpr::named("int")))
			.behavior(BehaviorDecl::new("audit").visibility(Visibility::Private)),
	])
	.expect("valid declarations")
}
