use crate::reflect::{ReflectError, Schema, TypeKind, Visibility};

#[test]
fn records_may_reference_types_declared_later() {
	let mut builder = Schema::builder();
	let top = builder.record("Top", ["pub mid: *Middle", "pub any: Any"]).expect("top declares");
	builder.record("Middle", ["pub name: str"]).expect("middle declares");
	builder.interface("Any").expect("any declares");
	let schema = builder.build().expect("schema builds");

	let fields = schema.type_def(top).expect("top exists").fields();
	assert_eq!(fields.len(), 2);
	assert_eq!(schema.type_name(fields[0].type_idx), "*Middle");
	let middle = schema.lookup("Middle").expect("middle exists");
	assert!(matches!(schema.type_def(fields[0].type_idx).map(|item| &item.kind), Some(TypeKind::Pointer(idx)) if *idx == middle));
	assert!(schema.type_def(fields[1].type_idx).is_some_and(|item| item.is_interface()));
}

#[test]
fn field_visibility_follows_pub_keyword() {
	let mut builder = Schema::builder();
	let idx = builder.record("Clock", ["secs: i64", "pub label: str"]).expect("declares");
	let schema = builder.build().expect("builds");

	let fields = schema.type_def(idx).expect("exists").fields();
	assert_eq!(fields[0].vis, Visibility::Private);
	assert!(!fields[0].is_visible());
	assert!(fields[1].is_visible());
}

#[test]
fn derived_types_are_interned_once() {
	let mut builder = Schema::builder();
	builder.record("Node", ["pub next: *Node", "pub prev: *Node"]).expect("declares");
	let mut schema = builder.build().expect("builds");

	let before = schema.len();
	let ptr = schema.type_expr("*Node").expect("pointer resolves");
	assert_eq!(schema.len(), before);
	assert_eq!(schema.type_name(ptr), "*Node");

	let list = schema.type_expr("[*Node]").expect("list resolves");
	assert_eq!(schema.len(), before + 1);
	assert_eq!(schema.type_expr("[*Node]").expect("list resolves again"), list);
}

#[test]
fn unknown_field_type_is_rejected() {
	let mut builder = Schema::builder();
	builder.record("Top", ["pub mid: Missing"]).expect("declares");
	let err = builder.build().expect_err("unknown type fails");
	assert!(matches!(err, ReflectError::UnknownType { name } if name == "Missing"));
}

#[test]
fn duplicate_names_are_rejected() {
	let mut builder = Schema::builder();
	builder.record("Top", Vec::<String>::new()).expect("declares");
	assert!(matches!(builder.interface("Top"), Err(ReflectError::DuplicateType { .. })));
	assert!(matches!(builder.record("str", ["pub a: i64"]), Err(ReflectError::DuplicateType { .. })));

	let mut builder = Schema::builder();
	builder.record("Pair", ["pub a: i64", "a: str"]).expect("declares");
	assert!(matches!(builder.build(), Err(ReflectError::DuplicateField { field, .. }) if field == "a"));
}

#[test]
fn by_value_self_containment_is_rejected() {
	let mut builder = Schema::builder();
	builder.record("Outer", ["pub inner: Inner"]).expect("declares");
	builder.record("Inner", ["pub outer: Outer"]).expect("declares");
	assert!(matches!(builder.build(), Err(ReflectError::RecursiveRecord { .. })));
}

#[test]
fn indirect_self_reference_is_allowed() {
	let mut builder = Schema::builder();
	builder.interface("Any").expect("declares");
	builder
		.record("Tree", ["pub left: *Tree", "pub children: [Tree]", "pub extra: Any"])
		.expect("declares");
	builder.build().expect("indirect recursion builds");
}

#[test]
fn derived_names_cannot_be_declared_directly() {
	let mut builder = Schema::builder();
	assert!(matches!(builder.record("*Top", ["pub a: i64"]), Err(ReflectError::InvalidTypeExpr { .. })));
}

#[test]
fn fresh_schema_holds_builtin_scalars() {
	let schema = Schema::builder().build().expect("empty builder builds");
	assert!(!schema.is_empty());
	for name in ["bool", "i64", "u64", "f64", "str", "bytes"] {
		assert!(schema.lookup(name).is_some(), "missing builtin {name}");
	}
	assert_eq!(schema.types().count(), schema.len());
}
