use crate::reflect::{Schema, TypeKind, Value};

/// Value/type pair left after stripping indirection.
///
/// `value` is `None` when the chain ended at a nil pointer or the enclosing
/// record was itself absent; the type is still meaningful in that case.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
	/// Concrete value, or `None` for an invalid handle.
	pub value: Option<&'a Value>,
	/// Effective type index.
	pub type_idx: u32,
}

impl Resolved<'_> {
	/// Whether the handle refers to a live value.
	pub fn is_valid(&self) -> bool {
		self.value.is_some()
	}
}

enum Step<'a> {
	Next(Resolved<'a>),
	Done,
	Absent,
}

/// Strip pointer and polymorphic layers from a root value.
///
/// An empty polymorphic root stops resolution at the interface type with an
/// invalid value, which has no fields to walk.
pub fn resolve<'a>(schema: &Schema, type_idx: u32, value: &'a Value) -> Resolved<'a> {
	let mut current = Resolved { value: Some(value), type_idx };
	loop {
		match step(schema, current) {
			Step::Next(next) => current = next,
			Step::Done => return current,
			Step::Absent => {
				return Resolved {
					value: None,
					type_idx: current.type_idx,
				};
			}
		}
	}
}

/// Strip pointer and polymorphic layers from a field value.
///
/// Returns `None` when the field is polymorphic and holds nothing; such a
/// field is not visited at all.
pub fn resolve_field<'a>(schema: &Schema, type_idx: u32, value: Option<&'a Value>) -> Option<Resolved<'a>> {
	let mut current = Resolved { value, type_idx };
	loop {
		match step(schema, current) {
			Step::Next(next) => current = next,
			Step::Done => return Some(current),
			Step::Absent => return None,
		}
	}
}

// Interface unwrapping is tried before pointer unwrapping. Pointer unwrapping
// keys on the value, so an invalid handle under a pointer type stays put.
fn step<'a>(schema: &Schema, current: Resolved<'a>) -> Step<'a> {
	let kind = schema.type_def(current.type_idx).map(|item| &item.kind);

	if let Some(TypeKind::Interface) = kind {
		return match current.value {
			Some(Value::Dyn(Some(held))) => Step::Next(Resolved {
				value: Some(&held.value),
				type_idx: held.type_idx,
			}),
			_ => Step::Absent,
		};
	}

	match current.value {
		Some(Value::Ptr(target)) => {
			let type_idx = match kind {
				Some(TypeKind::Pointer(pointee)) => *pointee,
				_ => current.type_idx,
			};
			Step::Next(Resolved {
				value: target.as_deref(),
				type_idx,
			})
		}
		_ => Step::Done,
	}
}

#[cfg(test)]
mod tests;
