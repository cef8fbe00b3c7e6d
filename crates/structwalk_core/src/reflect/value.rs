use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::reflect::{Schema, TypeKind};

/// Dynamic value tree typed by a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// Float scalar.
	F64(f64),
	/// UTF-8 string.
	Str(Box<str>),
	/// Raw bytes.
	Bytes(Vec<u8>),
	/// Homogeneous list elements.
	List(Vec<Value>),
	/// Record with named fields.
	Record(RecordValue),
	/// Pointer; `None` is a nil pointer.
	Ptr(Option<Box<Value>>),
	/// Polymorphic box; `None` holds nothing.
	Dyn(Option<Box<DynValue>>),
}

/// Record instance with named field values.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	/// Record type name.
	pub type_name: Box<str>,
	/// Field values, normally in declaration order.
	pub fields: Vec<FieldValue>,
}

/// One named field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Stored value.
	pub value: Value,
}

/// Concrete value held by a polymorphic slot, tagged with its runtime type.
#[derive(Debug, Clone, PartialEq)]
pub struct DynValue {
	/// Runtime type index.
	pub type_idx: u32,
	/// Concrete value.
	pub value: Value,
}

impl Value {
	/// Build the zero value of a type.
	///
	/// Unknown type indices produce an empty polymorphic box.
	pub fn zero(schema: &Schema, type_idx: u32) -> Self {
		let Some(item) = schema.type_def(type_idx) else {
			return Self::Dyn(None);
		};

		match &item.kind {
			TypeKind::Bool => Self::Bool(false),
			TypeKind::Int => Self::I64(0),
			TypeKind::Uint => Self::U64(0),
			TypeKind::Float => Self::F64(0.0),
			TypeKind::Str => Self::Str("".into()),
			TypeKind::Bytes => Self::Bytes(Vec::new()),
			TypeKind::List(_) => Self::List(Vec::new()),
			TypeKind::Pointer(_) => Self::Ptr(None),
			TypeKind::Interface => Self::Dyn(None),
			TypeKind::Record(fields) => Self::Record(RecordValue {
				type_name: item.name.clone(),
				fields: fields
					.iter()
					.map(|field| FieldValue {
						name: field.name.clone(),
						value: Self::zero(schema, field.type_idx),
					})
					.collect(),
			}),
		}
	}

	/// Wrap a value behind a non-nil pointer.
	pub fn ptr(value: Value) -> Self {
		Self::Ptr(Some(Box::new(value)))
	}

	/// Box a concrete value into a polymorphic slot.
	pub fn boxed(type_idx: u32, value: Value) -> Self {
		Self::Dyn(Some(Box::new(DynValue { type_idx, value })))
	}

	/// Short string value constructor.
	pub fn str(text: &str) -> Self {
		Self::Str(text.into())
	}

	/// Named field of a record value; `None` for other kinds.
	pub fn field(&self, name: &str) -> Option<&Value> {
		match self {
			Self::Record(record) => record.get(name),
			_ => None,
		}
	}

	/// String payload, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(text) => Some(text),
			_ => None,
		}
	}

	/// Render value kind as a stable label.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "Bool",
			Self::I64(_) => "I64",
			Self::U64(_) => "U64",
			Self::F64(_) => "F64",
			Self::Str(_) => "Str",
			Self::Bytes(_) => "Bytes",
			Self::List(_) => "List",
			Self::Record(_) => "Record",
			Self::Ptr(_) => "Ptr",
			Self::Dyn(_) => "Dyn",
		}
	}
}

impl RecordValue {
	/// Empty record of the named type.
	pub fn new(type_name: &str) -> Self {
		Self {
			type_name: type_name.into(),
			fields: Vec::new(),
		}
	}

	/// Append a field value.
	pub fn with(mut self, name: &str, value: Value) -> Self {
		self.fields.push(FieldValue { name: name.into(), value });
		self
	}

	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

impl From<RecordValue> for Value {
	fn from(value: RecordValue) -> Self {
		Self::Record(value)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::I64(v) => write!(f, "{v}"),
			Self::U64(v) => write!(f, "{v}"),
			Self::F64(v) => write!(f, "{v}"),
			Self::Str(v) => write!(f, "{v:?}"),
			Self::Bytes(v) => write!(f, "bytes[{}]", v.len()),
			Self::List(items) => {
				f.write_str("[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Self::Record(record) => {
				if record.fields.is_empty() {
					return write!(f, "{} {{}}", record.type_name);
				}
				write!(f, "{} {{ ", record.type_name)?;
				for (idx, field) in record.fields.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}: {}", field.name, field.value)?;
				}
				f.write_str(" }")
			}
			Self::Ptr(Some(target)) => write!(f, "{target}"),
			Self::Dyn(Some(held)) => write!(f, "{}", held.value),
			Self::Ptr(None) | Self::Dyn(None) => f.write_str("null"),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Bool(v) => serializer.serialize_bool(*v),
			Self::I64(v) => serializer.serialize_i64(*v),
			Self::U64(v) => serializer.serialize_u64(*v),
			Self::F64(v) => serializer.serialize_f64(*v),
			Self::Str(v) => serializer.serialize_str(v),
			Self::Bytes(v) => {
				let mut seq = serializer.serialize_seq(Some(v.len()))?;
				for byte in v {
					seq.serialize_element(byte)?;
				}
				seq.end()
			}
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Record(record) => {
				let mut map = serializer.serialize_map(Some(record.fields.len()))?;
				for field in &record.fields {
					map.serialize_entry(field.name.as_ref(), &field.value)?;
				}
				map.end()
			}
			Self::Ptr(Some(target)) => target.serialize(serializer),
			Self::Dyn(Some(held)) => held.value.serialize(serializer),
			Self::Ptr(None) | Self::Dyn(None) => serializer.serialize_none(),
		}
	}
}
