use std::collections::HashSet;
use std::convert::Infallible;

use crate::reflect::{Descend, Field, ReflectError, Result, Schema, Value, traverse};

/// Record types that flattening reports as single values instead of walking.
#[derive(Debug, Clone, Default)]
pub struct LeafPolicy {
	leaves: HashSet<u32>,
}

impl LeafPolicy {
	/// Policy that walks every record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a policy from type names; unknown names are an error.
	pub fn from_names<I, S>(schema: &Schema, names: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut policy = Self::new();
		for name in names {
			let name = name.as_ref();
			let idx = schema.lookup(name).ok_or_else(|| ReflectError::UnknownType { name: name.to_owned() })?;
			policy.leaves.insert(idx);
		}
		Ok(policy)
	}

	/// Add one leaf type.
	pub fn with_type(mut self, type_idx: u32) -> Self {
		self.leaves.insert(type_idx);
		self
	}

	/// Whether the type is treated as a leaf.
	pub fn is_leaf(&self, type_idx: u32) -> bool {
		self.leaves.contains(&type_idx)
	}

	/// Whether flattening walks into this field.
	pub fn descends(&self, field: &Field<'_>) -> bool {
		field.is_record() && !self.is_leaf(field.type_idx)
	}
}

/// One flattened leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatField<'a> {
	/// Dotted name path.
	pub path: String,
	/// Resolved type index.
	pub type_idx: u32,
	/// Leaf value, `None` when absent.
	pub value: Option<&'a Value>,
}

/// Flatten `root` into leaves: every non-record field plus every leaf-policy record.
pub fn flatten<'a>(schema: &Schema, root_type: u32, root: &'a Value, policy: &LeafPolicy) -> Vec<FlatField<'a>> {
	let mut out = Vec::new();
	let walked = traverse(schema, root_type, root, |value, field, path| {
		if policy.descends(field) {
			return Ok::<_, Infallible>(Descend::Yes);
		}
		out.push(FlatField {
			path: path.to_owned(),
			type_idx: field.type_idx,
			value,
		});
		Ok(Descend::No)
	});
	match walked {
		Ok(()) => out,
		Err(never) => match never {},
	}
}

/// Flattened leaf names in visit order.
pub fn flatten_names(schema: &Schema, root_type: u32, root: &Value, policy: &LeafPolicy) -> Vec<String> {
	flatten(schema, root_type, root, policy).into_iter().map(|item| item.path).collect()
}

/// Flattened leaf values in visit order, aligned with [`flatten_names`].
pub fn flatten_values<'a>(schema: &Schema, root_type: u32, root: &'a Value, policy: &LeafPolicy) -> Vec<Option<&'a Value>> {
	flatten(schema, root_type, root, policy).into_iter().map(|item| item.value).collect()
}

/// Render present leaves as space-separated `path=value` pairs.
///
/// Absent values are skipped and their fields are not walked.
pub fn render_assignments(schema: &Schema, root_type: u32, root: &Value, policy: &LeafPolicy) -> String {
	let mut parts = Vec::new();
	let walked = traverse(schema, root_type, root, |value, field, path| {
		let Some(value) = value else {
			return Ok::<_, Infallible>(Descend::No);
		};
		if policy.descends(field) {
			return Ok(Descend::Yes);
		}
		parts.push(format!("{path}={value}"));
		Ok(Descend::No)
	});
	match walked {
		Ok(()) => parts.join(" "),
		Err(never) => match never {},
	}
}

#[cfg(test)]
mod tests;
