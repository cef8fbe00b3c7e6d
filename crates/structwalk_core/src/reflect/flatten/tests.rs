use crate::reflect::{LeafPolicy, RecordValue, ReflectError, Schema, Value, flatten, flatten_names, flatten_values, render_assignments};

struct Fixture {
	schema: Schema,
	top: u32,
	middle: u32,
	stamp: u32,
}

fn fixture() -> Fixture {
	let mut builder = Schema::builder();
	let top = builder
		.record("Top", ["pub name: str", "pub time: Stamp", "pub mid1: Any", "pub mid2: Middle", "pub mid3: *Middle"])
		.expect("declares");
	let middle = builder.record("Middle", ["pub name: *str", "pub bottom: [i64]"]).expect("declares");
	let stamp = builder.record("Stamp", ["secs: i64", "nanos: u64"]).expect("declares");
	builder.interface("Any").expect("declares");
	Fixture {
		schema: builder.build().expect("builds"),
		top,
		middle,
		stamp,
	}
}

fn stamp(secs: i64) -> Value {
	RecordValue::new("Stamp").with("secs", Value::I64(secs)).with("nanos", Value::U64(0)).into()
}

fn middle(name: &str, bottom: [i64; 3]) -> Value {
	RecordValue::new("Middle")
		.with("name", Value::ptr(Value::str(name)))
		.with("bottom", Value::List(bottom.into_iter().map(Value::I64).collect()))
		.into()
}

fn sample(fx: &mut Fixture) -> (u32, Value) {
	let ptr_middle = fx.schema.type_expr("*Middle").expect("resolves");
	let ptr_top = fx.schema.type_expr("*Top").expect("resolves");
	let value = Value::ptr(
		RecordValue::new("Top")
			.with("name", Value::str("top"))
			.with("time", stamp(1_551_393_634))
			.with("mid1", Value::boxed(ptr_middle, Value::ptr(middle("mid1", [1, 2, 3]))))
			.with("mid2", middle("mid2", [4, 5, 6]))
			.with("mid3", Value::ptr(middle("mid3", [7, 8, 9])))
			.into(),
	);
	(ptr_top, value)
}

#[test]
fn flatten_names_stops_at_leaf_records() {
	let mut fx = fixture();
	let (root_type, root) = sample(&mut fx);
	let policy = LeafPolicy::new().with_type(fx.stamp);

	let names = flatten_names(&fx.schema, root_type, &root, &policy);
	assert_eq!(
		names,
		["name", "time", "mid1.name", "mid1.bottom", "mid2.name", "mid2.bottom", "mid3.name", "mid3.bottom"]
	);
}

#[test]
fn flatten_values_line_up_with_names() {
	let mut fx = fixture();
	let (root_type, root) = sample(&mut fx);
	let policy = LeafPolicy::new().with_type(fx.stamp);

	let values = flatten_values(&fx.schema, root_type, &root, &policy);
	assert_eq!(values.len(), 8);

	for (idx, want) in [(0, "top"), (2, "mid1"), (4, "mid2"), (6, "mid3")] {
		assert_eq!(values[idx].and_then(Value::as_str), Some(want), "field {idx}");
	}
	assert_eq!(values[1], Some(&stamp(1_551_393_634)));
	for (idx, want) in [(3, [1, 2, 3]), (5, [4, 5, 6]), (7, [7, 8, 9])] {
		let want = Value::List(want.into_iter().map(Value::I64).collect());
		assert_eq!(values[idx], Some(&want), "field {idx}");
	}
}

#[test]
fn leaf_policy_composes_with_plain_records() {
	let mut builder = Schema::builder();
	let top = builder.record("Top", ["pub Name: str", "pub Time: Stamp", "pub Mid: Middle"]).expect("declares");
	builder.record("Middle", ["pub Name: *str", "pub Values: [i64]"]).expect("declares");
	builder.record("Stamp", ["secs: i64", "nanos: u64"]).expect("declares");
	let schema = builder.build().expect("builds");
	let policy = LeafPolicy::from_names(&schema, ["Stamp"]).expect("policy builds");

	let values = vec![Value::I64(1), Value::I64(2), Value::I64(3)];
	let root = Value::from(
		RecordValue::new("Top")
			.with("Name", Value::str("top"))
			.with("Time", stamp(7))
			.with(
				"Mid",
				RecordValue::new("Middle")
					.with("Name", Value::ptr(Value::str("m")))
					.with("Values", Value::List(values.clone()))
					.into(),
			),
	);

	let flat = flatten(&schema, top, &root, &policy);
	let names: Vec<&str> = flat.iter().map(|item| item.path.as_str()).collect();
	assert_eq!(names, ["Name", "Time", "Mid.Name", "Mid.Values"]);

	let got: Vec<Option<&Value>> = flat.iter().map(|item| item.value).collect();
	assert_eq!(got, [Some(&Value::str("top")), Some(&stamp(7)), Some(&Value::str("m")), Some(&Value::List(values))]);
}

#[test]
fn without_leaf_policy_private_only_records_vanish() {
	let mut fx = fixture();
	let (root_type, root) = sample(&mut fx);

	let names = flatten_names(&fx.schema, root_type, &root, &LeafPolicy::new());
	assert_eq!(names.first().map(String::as_str), Some("name"));
	assert!(!names.iter().any(|name| name.starts_with("time")));
}

#[test]
fn unknown_leaf_name_is_an_error() {
	let fx = fixture();
	let err = LeafPolicy::from_names(&fx.schema, ["Nope"]).expect_err("unknown type fails");
	assert!(matches!(err, ReflectError::UnknownType { name } if name == "Nope"));
}

#[test]
fn assignments_skip_absent_values() {
	let fx = fixture();
	let root = Value::from(
		RecordValue::new("Top")
			.with("name", Value::str(""))
			.with("time", stamp(0))
			.with("mid1", Value::boxed(fx.top, Value::zero(&fx.schema, fx.top)))
			.with("mid2", Value::zero(&fx.schema, fx.middle))
			.with("mid3", Value::Ptr(None)),
	);
	let policy = LeafPolicy::new().with_type(fx.stamp);

	let rendered = render_assignments(&fx.schema, fx.top, &root, &policy);
	assert_eq!(
		rendered,
		"name=\"\" time=Stamp { secs: 0, nanos: 0 } mid1.name=\"\" mid1.time=Stamp { secs: 0, nanos: 0 } mid1.mid2.bottom=[] mid2.bottom=[]"
	);
}
