use crate::reflect::{RecordValue, Schema, Value, resolve, resolve_field};

fn schema() -> Schema {
	let mut builder = Schema::builder();
	builder.interface("Any").expect("declares");
	builder.record("Middle", ["pub name: *str"]).expect("declares");
	builder.build().expect("builds")
}

#[test]
fn pointer_chain_resolves_to_pointee() {
	let mut schema = schema();
	let ptr_ptr = schema.type_expr("**Middle").expect("type resolves");
	let middle = schema.lookup("Middle").expect("middle exists");
	let record = Value::from(RecordValue::new("Middle"));
	let value = Value::ptr(Value::ptr(record.clone()));

	let resolved = resolve(&schema, ptr_ptr, &value);
	assert_eq!(resolved.type_idx, middle);
	assert_eq!(resolved.value, Some(&record));
}

#[test]
fn nil_pointer_mid_chain_yields_invalid_handle() {
	let mut schema = schema();
	let ptr_ptr = schema.type_expr("**Middle").expect("type resolves");
	let middle = schema.lookup("Middle").expect("middle exists");
	let value = Value::ptr(Value::Ptr(None));

	let resolved = resolve_field(&schema, ptr_ptr, Some(&value)).expect("pointer fields are never skipped");
	assert!(!resolved.is_valid());
	assert_eq!(resolved.type_idx, middle);
}

#[test]
fn invalid_handle_under_pointer_type_keeps_pointer_type() {
	let mut schema = schema();
	let ptr = schema.type_expr("*str").expect("type resolves");

	let resolved = resolve_field(&schema, ptr, None).expect("not polymorphic");
	assert!(!resolved.is_valid());
	assert_eq!(resolved.type_idx, ptr);
}

#[test]
fn interface_substitutes_runtime_type_then_derefs() {
	let mut schema = schema();
	let any = schema.lookup("Any").expect("any exists");
	let middle = schema.lookup("Middle").expect("middle exists");
	let ptr_middle = schema.type_expr("*Middle").expect("type resolves");
	let record = Value::from(RecordValue::new("Middle").with("name", Value::Ptr(None)));
	let value = Value::boxed(ptr_middle, Value::ptr(record.clone()));

	let resolved = resolve_field(&schema, any, Some(&value)).expect("interface holds a value");
	assert_eq!(resolved.type_idx, middle);
	assert_eq!(resolved.value, Some(&record));
}

#[test]
fn empty_interface_field_is_absent() {
	let schema = schema();
	let any = schema.lookup("Any").expect("any exists");

	assert!(resolve_field(&schema, any, Some(&Value::Dyn(None))).is_none());
	assert!(resolve_field(&schema, any, None).is_none());
}

#[test]
fn empty_interface_root_stops_at_interface() {
	let schema = schema();
	let any = schema.lookup("Any").expect("any exists");
	let value = Value::Dyn(None);

	let resolved = resolve(&schema, any, &value);
	assert!(!resolved.is_valid());
	assert_eq!(resolved.type_idx, any);
}

#[test]
fn interface_inside_pointer_inside_interface_unwraps_fully() {
	let mut schema = schema();
	let any = schema.lookup("Any").expect("any exists");
	let ptr_any = schema.type_expr("*Any").expect("type resolves");
	let value = Value::boxed(ptr_any, Value::ptr(Value::boxed(schema.lookup("str").expect("str exists"), Value::str("deep"))));

	let resolved = resolve(&schema, any, &value);
	assert_eq!(schema.type_name(resolved.type_idx), "str");
	assert_eq!(resolved.value.and_then(Value::as_str), Some("deep"));
}

#[test]
fn scalar_root_is_left_alone() {
	let schema = schema();
	let int = schema.lookup("i64").expect("i64 exists");
	let value = Value::I64(7);

	let resolved = resolve(&schema, int, &value);
	assert_eq!(resolved.type_idx, int);
	assert_eq!(resolved.value, Some(&value));
}
