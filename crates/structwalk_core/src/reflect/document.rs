use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::reflect::compression::decode_bytes;
use crate::reflect::{
	Compression, Descend, Field, FieldValue, RecordValue, ReflectError, Resolved, Result, Schema, TypeKind, Value, resolve, traverse,
};

/// Limits applied while loading a document.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
	/// Maximum nesting depth of the decoded value.
	pub max_depth: u32,
	/// Maximum decompressed size for zstd documents.
	pub max_decompressed_bytes: usize,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_decompressed_bytes: 64 * 1024 * 1024,
		}
	}
}

/// Schema plus a root value decoded against it.
#[derive(Debug, Clone)]
pub struct Document {
	/// Validated type table, including derived types the document used.
	pub schema: Schema,
	/// Root type index.
	pub root_type: u32,
	/// Root value.
	pub root: Value,
	/// Compression detected on the source bytes.
	pub compression: Compression,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentSpec {
	#[serde(default)]
	types: Vec<TypeSpec>,
	root: String,
	#[serde(default)]
	value: Json,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeSpec {
	Record {
		record: String,
		#[serde(default)]
		fields: Vec<String>,
	},
	Interface {
		interface: String,
	},
}

impl Document {
	/// Read and decode a document file, raw or zstd-compressed.
	pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::from_bytes(raw, options)
	}

	/// Decode a document from bytes, raw or zstd-compressed.
	pub fn from_bytes(raw: Vec<u8>, options: &LoadOptions) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw, options.max_decompressed_bytes)?;
		let spec: DocumentSpec = serde_json::from_slice(&bytes)?;
		let doc = Self::from_spec(spec, compression, options)?;
		tracing::debug!(
			compression = compression.as_str(),
			types = doc.schema.len(),
			root = doc.root_type_name(),
			"loaded document"
		);
		Ok(doc)
	}

	/// Decode an uncompressed document from JSON text.
	pub fn parse(text: &str, options: &LoadOptions) -> Result<Self> {
		let spec: DocumentSpec = serde_json::from_str(text)?;
		Self::from_spec(spec, Compression::None, options)
	}

	fn from_spec(spec: DocumentSpec, compression: Compression, options: &LoadOptions) -> Result<Self> {
		let mut builder = Schema::builder();
		for item in spec.types {
			match item {
				TypeSpec::Record { record, fields } => builder.record(&record, fields)?,
				TypeSpec::Interface { interface } => builder.interface(&interface)?,
			};
		}
		let mut schema = builder.build()?;
		let root_type = schema.type_expr(&spec.root)?;

		let mut decoder = Decoder {
			schema: &mut schema,
			max_depth: options.max_depth,
		};
		let root = decoder.decode(root_type, &spec.value, "$", 0)?;

		Ok(Self {
			schema,
			root_type,
			root,
			compression,
		})
	}

	/// Root type name.
	pub fn root_type_name(&self) -> &str {
		self.schema.type_name(self.root_type)
	}

	/// Resolve the root through pointers and polymorphic slots.
	pub fn resolve_root(&self) -> Resolved<'_> {
		resolve(&self.schema, self.root_type, &self.root)
	}

	/// Walk the root value's fields.
	pub fn traverse<'a, E, F>(&'a self, visit: F) -> std::result::Result<(), E>
	where
		F: FnMut(Option<&'a Value>, &Field<'_>, &str) -> std::result::Result<Descend, E>,
	{
		traverse(&self.schema, self.root_type, &self.root, visit)
	}
}

struct Decoder<'s> {
	schema: &'s mut Schema,
	max_depth: u32,
}

impl Decoder<'_> {
	fn decode(&mut self, type_idx: u32, json: &Json, path: &str, depth: u32) -> Result<Value> {
		if depth > self.max_depth {
			return Err(ReflectError::DecodeDepthExceeded { max_depth: self.max_depth });
		}

		let Some(item) = self.schema.type_def(type_idx) else {
			return Err(ReflectError::UnknownType {
				name: self.schema.type_name(type_idx).to_owned(),
			});
		};
		let type_name = item.name.clone();
		let kind = item.kind.clone();

		let value = match (kind, json) {
			(TypeKind::Bool, Json::Bool(flag)) => Value::Bool(*flag),
			(TypeKind::Int, Json::Number(num)) if num.is_i64() => Value::I64(num.as_i64().unwrap_or_default()),
			(TypeKind::Uint, Json::Number(num)) if num.is_u64() => Value::U64(num.as_u64().unwrap_or_default()),
			(TypeKind::Float, Json::Number(num)) => Value::F64(num.as_f64().unwrap_or_default()),
			(TypeKind::Str, Json::String(text)) => Value::Str(text.as_str().into()),
			(TypeKind::Bytes, Json::Array(items)) => Value::Bytes(decode_bytes_array(items, path)?),
			(TypeKind::List(elem), Json::Array(items)) => {
				let mut out = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					out.push(self.decode(elem, item, &format!("{path}[{idx}]"), depth + 1)?);
				}
				Value::List(out)
			}
			(TypeKind::Pointer(_), Json::Null) => Value::Ptr(None),
			(TypeKind::Pointer(pointee), json) => Value::ptr(self.decode(pointee, json, path, depth + 1)?),
			(TypeKind::Interface, Json::Null) => Value::Dyn(None),
			(TypeKind::Interface, Json::Object(map)) => self.decode_dyn(map, path, depth)?,
			(TypeKind::Record(fields), Json::Object(map)) => {
				if let Some(key) = map.keys().find(|key| !fields.iter().any(|field| field.name.as_ref() == key.as_str())) {
					return Err(ReflectError::DecodeUnknownField {
						path: path.to_owned(),
						field: key.clone(),
					});
				}

				let mut out = Vec::with_capacity(fields.len());
				for field in &fields {
					let value = match map.get(field.name.as_ref()) {
						Some(json) => self.decode(field.type_idx, json, &format!("{path}.{}", field.name), depth + 1)?,
						None => Value::zero(self.schema, field.type_idx),
					};
					out.push(FieldValue {
						name: field.name.clone(),
						value,
					});
				}
				Value::Record(RecordValue { type_name, fields: out })
			}
			(_, json) => {
				return Err(ReflectError::DecodeTypeMismatch {
					path: path.to_owned(),
					expected: type_name.into(),
					got: json_kind(json),
				});
			}
		};

		Ok(value)
	}

	fn decode_dyn(&mut self, map: &serde_json::Map<String, Json>, path: &str, depth: u32) -> Result<Value> {
		if let Some(key) = map.keys().find(|key| key.as_str() != "type" && key.as_str() != "value") {
			return Err(ReflectError::DecodeUnknownField {
				path: path.to_owned(),
				field: key.clone(),
			});
		}

		let tag = match map.get("type") {
			Some(Json::String(tag)) => tag,
			other => {
				return Err(ReflectError::DecodeTypeMismatch {
					path: format!("{path}.type"),
					expected: "type name".to_owned(),
					got: other.map(json_kind).unwrap_or("missing"),
				});
			}
		};

		let type_idx = self.schema.type_expr(tag)?;
		if self.schema.type_def(type_idx).is_some_and(|item| item.is_interface()) {
			return Err(ReflectError::DecodeNotConcrete {
				path: path.to_owned(),
				type_name: tag.clone(),
			});
		}

		let value = match map.get("value") {
			Some(json) => self.decode(type_idx, json, path, depth + 1)?,
			None => Value::zero(self.schema, type_idx),
		};
		Ok(Value::boxed(type_idx, value))
	}
}

fn decode_bytes_array(items: &[Json], path: &str) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(items.len());
	for (idx, item) in items.iter().enumerate() {
		let Json::Number(num) = item else {
			return Err(ReflectError::DecodeTypeMismatch {
				path: format!("{path}[{idx}]"),
				expected: "byte".to_owned(),
				got: json_kind(item),
			});
		};
		let byte = num
			.as_u64()
			.and_then(|raw| u8::try_from(raw).ok())
			.ok_or_else(|| ReflectError::DecodeByteOutOfRange {
				path: format!("{path}[{idx}]"),
			})?;
		out.push(byte);
	}
	Ok(out)
}

fn json_kind(json: &Json) -> &'static str {
	match json {
		Json::Null => "null",
		Json::Bool(_) => "bool",
		Json::Number(_) => "number",
		Json::String(_) => "string",
		Json::Array(_) => "array",
		Json::Object(_) => "object",
	}
}
