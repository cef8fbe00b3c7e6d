use std::collections::HashMap;

use crate::reflect::decl::{TypeExpr, parse_field_decl, parse_type_expr};
use crate::reflect::{ReflectError, Result};

const BUILTIN_TYPES: [(&str, TypeKind); 6] = [
	("bool", TypeKind::Bool),
	("i64", TypeKind::Int),
	("u64", TypeKind::Uint),
	("f64", TypeKind::Float),
	("str", TypeKind::Str),
	("bytes", TypeKind::Bytes),
];

/// Whether a field participates in traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// Declared `pub`; visited by the walker.
	Public,
	/// Not visible outside the record; never visited.
	Private,
}

/// One field declaration inside a record type.
#[derive(Debug, Clone)]
pub struct FieldDef {
	/// Field name.
	pub name: Box<str>,
	/// Declared type index.
	pub type_idx: u32,
	/// Declared visibility.
	pub vis: Visibility,
}

impl FieldDef {
	/// Whether the walker visits this field.
	pub fn is_visible(&self) -> bool {
		self.vis == Visibility::Public
	}
}

/// Structural classification of a type.
#[derive(Debug, Clone)]
pub enum TypeKind {
	/// Boolean scalar.
	Bool,
	/// Signed 64-bit integer scalar.
	Int,
	/// Unsigned 64-bit integer scalar.
	Uint,
	/// 64-bit float scalar.
	Float,
	/// UTF-8 string scalar.
	Str,
	/// Raw byte string scalar.
	Bytes,
	/// Record with fields in declaration order.
	Record(Vec<FieldDef>),
	/// Nullable single-level indirection to the pointee type index.
	Pointer(u32),
	/// Polymorphic slot; the concrete type travels with the value.
	Interface,
	/// Homogeneous sequence of the element type index.
	List(u32),
}

impl TypeKind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Uint => "uint",
			Self::Float => "float",
			Self::Str => "str",
			Self::Bytes => "bytes",
			Self::Record(_) => "record",
			Self::Pointer(_) => "pointer",
			Self::Interface => "interface",
			Self::List(_) => "list",
		}
	}
}

/// Named type declaration.
#[derive(Debug, Clone)]
pub struct TypeDef {
	/// Type name; derived types use `*T` and `[T]` spellings.
	pub name: Box<str>,
	/// Structural kind.
	pub kind: TypeKind,
}

impl TypeDef {
	/// Whether this type is a record.
	pub fn is_record(&self) -> bool {
		matches!(self.kind, TypeKind::Record(_))
	}

	/// Whether this type is polymorphic.
	pub fn is_interface(&self) -> bool {
		matches!(self.kind, TypeKind::Interface)
	}

	/// Declared fields; empty for anything but records.
	pub fn fields(&self) -> &[FieldDef] {
		match &self.kind {
			TypeKind::Record(fields) => fields,
			_ => &[],
		}
	}
}

/// Validated table of type declarations.
///
/// Every record's fields reference existing types and no record contains
/// itself by value, so walks driven by this table always terminate.
#[derive(Debug, Clone)]
pub struct Schema {
	types: Vec<TypeDef>,
	by_name: HashMap<Box<str>, u32>,
}

impl Schema {
	/// Start a new schema with the builtin scalar types registered.
	pub fn builder() -> SchemaBuilder {
		SchemaBuilder {
			schema: Self::with_builtins(),
			pending: Vec::new(),
		}
	}

	fn with_builtins() -> Self {
		let mut schema = Self {
			types: Vec::new(),
			by_name: HashMap::new(),
		};
		for (name, kind) in BUILTIN_TYPES {
			schema.push(name.into(), kind);
		}
		schema
	}

	/// Number of declared types, builtins and derived types included.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Always `false`: builtin scalars are registered on construction.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Look up a declaration by type index.
	pub fn type_def(&self, type_idx: u32) -> Option<&TypeDef> {
		self.types.get(type_idx as usize)
	}

	/// Return type name by index, `<unknown>` for out-of-range indices.
	pub fn type_name(&self, type_idx: u32) -> &str {
		self.type_def(type_idx).map(|item| item.name.as_ref()).unwrap_or("<unknown>")
	}

	/// Look up a type index by exact name.
	pub fn lookup(&self, name: &str) -> Option<u32> {
		self.by_name.get(name).copied()
	}

	/// Iterate `(type_idx, declaration)` pairs in registration order.
	pub fn types(&self) -> impl Iterator<Item = (u32, &TypeDef)> {
		self.types.iter().enumerate().map(|(idx, item)| (idx as u32, item))
	}

	/// Resolve a type expression, registering `*T` and `[T]` forms on demand.
	///
	/// Derived types never introduce by-value containment, so interning them
	/// after validation keeps the schema valid.
	pub fn type_expr(&mut self, text: &str) -> Result<u32> {
		let expr = parse_type_expr(text)?;
		self.intern(&expr)
	}

	fn intern(&mut self, expr: &TypeExpr<'_>) -> Result<u32> {
		let kind = match expr {
			TypeExpr::Named(name) => return self.lookup(name).ok_or_else(|| ReflectError::UnknownType { name: (*name).to_owned() }),
			TypeExpr::Pointer(inner) => TypeKind::Pointer(self.intern(inner)?),
			TypeExpr::List(inner) => TypeKind::List(self.intern(inner)?),
		};

		let name = expr.canonical();
		if let Some(existing) = self.lookup(&name) {
			return Ok(existing);
		}
		Ok(self.push(name.into_boxed_str(), kind))
	}

	fn push(&mut self, name: Box<str>, kind: TypeKind) -> u32 {
		let idx = self.types.len() as u32;
		self.by_name.insert(name.clone(), idx);
		self.types.push(TypeDef { name, kind });
		idx
	}

	fn declare(&mut self, name: &str, kind: TypeKind) -> Result<u32> {
		if self.by_name.contains_key(name) {
			return Err(ReflectError::DuplicateType { name: name.to_owned() });
		}
		if parse_type_expr(name).map(|expr| !matches!(expr, TypeExpr::Named(_))).unwrap_or(true) {
			return Err(ReflectError::InvalidTypeExpr { expr: name.to_owned() });
		}
		Ok(self.push(name.into(), kind))
	}

	fn check_acyclic(&self) -> Result<()> {
		#[derive(Clone, Copy, PartialEq, Eq)]
		enum Mark {
			Unvisited,
			Active,
			Done,
		}

		fn visit(schema: &Schema, idx: u32, marks: &mut [Mark]) -> Result<()> {
			match marks[idx as usize] {
				Mark::Done => return Ok(()),
				Mark::Active => {
					return Err(ReflectError::RecursiveRecord {
						name: schema.type_name(idx).to_owned(),
					});
				}
				Mark::Unvisited => {}
			}

			marks[idx as usize] = Mark::Active;
			for field in schema.types[idx as usize].fields() {
				if schema.type_def(field.type_idx).is_some_and(TypeDef::is_record) {
					visit(schema, field.type_idx, marks)?;
				}
			}
			marks[idx as usize] = Mark::Done;
			Ok(())
		}

		let mut marks = vec![Mark::Unvisited; self.types.len()];
		for (idx, item) in self.types() {
			if item.is_record() {
				visit(self, idx, &mut marks)?;
			}
		}
		Ok(())
	}
}

/// Incremental schema construction.
///
/// Records are registered by name immediately and their field declarations
/// are parsed in [`SchemaBuilder::build`], so records may reference types
/// declared after them.
#[derive(Debug)]
pub struct SchemaBuilder {
	schema: Schema,
	pending: Vec<(u32, Vec<String>)>,
}

impl SchemaBuilder {
	/// Declare a record from `[pub] name: type` field declarations.
	pub fn record<I, S>(&mut self, name: &str, fields: I) -> Result<u32>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let idx = self.schema.declare(name, TypeKind::Record(Vec::new()))?;
		self.pending.push((idx, fields.into_iter().map(Into::into).collect()));
		Ok(idx)
	}

	/// Declare a polymorphic interface type.
	pub fn interface(&mut self, name: &str) -> Result<u32> {
		self.schema.declare(name, TypeKind::Interface)
	}

	/// Resolve field declarations and validate the finished table.
	pub fn build(self) -> Result<Schema> {
		let Self { mut schema, pending } = self;

		for (idx, decls) in pending {
			let record_name = schema.type_name(idx).to_owned();
			let mut fields: Vec<FieldDef> = Vec::with_capacity(decls.len());
			for raw in &decls {
				let decl = parse_field_decl(raw)?;
				if fields.iter().any(|field| field.name.as_ref() == decl.ident) {
					return Err(ReflectError::DuplicateField {
						record: record_name,
						field: decl.ident.to_owned(),
					});
				}
				let type_idx = schema.intern(&decl.ty)?;
				fields.push(FieldDef {
					name: decl.ident.into(),
					type_idx,
					vis: decl.vis,
				});
			}
			schema.types[idx as usize].kind = TypeKind::Record(fields);
		}

		schema.check_acyclic()?;
		Ok(schema)
	}
}

#[cfg(test)]
mod tests;
