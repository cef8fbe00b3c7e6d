use crate::reflect::{Resolved, Schema, TypeDef, Value, resolve, resolve_field};

/// Callback decision for one visited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
	/// Walk the field's own fields next.
	Yes,
	/// Move on to the next sibling.
	No,
}

impl From<bool> for Descend {
	fn from(value: bool) -> Self {
		if value { Self::Yes } else { Self::No }
	}
}

/// Field descriptor handed to the callback.
///
/// `type_idx` and `ty` describe the resolved type: for polymorphic fields
/// this is the runtime type of the stored value, so two instances of the same
/// record can report different types for the same field.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
	/// Field name.
	pub name: &'a str,
	/// Position in the record's declaration.
	pub index: usize,
	/// Statically declared type index.
	pub declared_type: u32,
	/// Resolved type index.
	pub type_idx: u32,
	/// Resolved type declaration.
	pub ty: &'a TypeDef,
}

impl Field<'_> {
	/// Resolved type name.
	pub fn type_name(&self) -> &str {
		&self.ty.name
	}

	/// Whether the resolved type is a record.
	pub fn is_record(&self) -> bool {
		self.ty.is_record()
	}
}

/// Walk every public field of `root`, depth first in declaration order.
///
/// The root is resolved first, then each field is resolved and passed to
/// `visit` with its dotted name path. Returning [`Descend::Yes`] walks the
/// field's own fields; returning an error stops the whole walk and hands the
/// error back unchanged.
pub fn traverse<'v, E, F>(schema: &Schema, root_type: u32, root: &'v Value, mut visit: F) -> Result<(), E>
where
	F: FnMut(Option<&'v Value>, &Field<'_>, &str) -> Result<Descend, E>,
{
	let resolved = resolve(schema, root_type, root);
	walk_fields(schema, resolved, "", &mut visit)
}

/// Walk the fields of an already resolved value.
pub fn traverse_resolved<'v, E, F>(schema: &Schema, root: Resolved<'v>, mut visit: F) -> Result<(), E>
where
	F: FnMut(Option<&'v Value>, &Field<'_>, &str) -> Result<Descend, E>,
{
	walk_fields(schema, root, "", &mut visit)
}

fn walk_fields<'v, E, F>(schema: &Schema, record: Resolved<'v>, prefix: &str, visit: &mut F) -> Result<(), E>
where
	F: FnMut(Option<&'v Value>, &Field<'_>, &str) -> Result<Descend, E>,
{
	let Some(record_ty) = schema.type_def(record.type_idx) else {
		return Ok(());
	};

	for (index, decl) in record_ty.fields().iter().enumerate() {
		if !decl.is_visible() {
			continue;
		}

		let path = format!("{prefix}{}", decl.name);
		let raw = record.value.and_then(|value| value.field(&decl.name));
		let Some(resolved) = resolve_field(schema, decl.type_idx, raw) else {
			continue;
		};
		// A runtime tag outside the schema is treated like an empty slot.
		let Some(ty) = schema.type_def(resolved.type_idx) else {
			continue;
		};

		let field = Field {
			name: &decl.name,
			index,
			declared_type: decl.type_idx,
			type_idx: resolved.type_idx,
			ty,
		};
		if visit(resolved.value, &field, &path)? == Descend::No {
			continue;
		}

		walk_fields(schema, resolved, &format!("{path}."), visit)?;
	}

	Ok(())
}
