use crate::reflect::{ReflectError, Result, Visibility};

/// Parsed `[pub] name: type` field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldDecl<'a> {
	/// Whether the declaration carried `pub`.
	pub vis: Visibility,
	/// Field identifier.
	pub ident: &'a str,
	/// Declared field type.
	pub ty: TypeExpr<'a>,
}

/// Parsed type expression: a named type, `*T`, or `[T]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeExpr<'a> {
	Named(&'a str),
	Pointer(Box<TypeExpr<'a>>),
	List(Box<TypeExpr<'a>>),
}

impl TypeExpr<'_> {
	/// Render the canonical spelling used as a schema type name.
	pub fn canonical(&self) -> String {
		match self {
			Self::Named(name) => (*name).to_owned(),
			Self::Pointer(inner) => format!("*{}", inner.canonical()),
			Self::List(inner) => format!("[{}]", inner.canonical()),
		}
	}
}

/// Parse declaration text such as `pub name: *str` or `secs: i64`.
pub(crate) fn parse_field_decl(raw: &str) -> Result<FieldDecl<'_>> {
	let invalid = || ReflectError::InvalidFieldDecl { decl: raw.to_owned() };

	let trimmed = raw.trim();
	let (vis, rest) = match trimmed.strip_prefix("pub") {
		Some(rest) if rest.starts_with(char::is_whitespace) => (Visibility::Public, rest.trim_start()),
		_ => (Visibility::Private, trimmed),
	};

	let (ident, ty) = rest.split_once(':').ok_or_else(invalid)?;
	let ident = ident.trim();
	if !is_ident(ident) {
		return Err(invalid());
	}

	let ty = parse_type_expr(ty).map_err(|_| invalid())?;
	Ok(FieldDecl { vis, ident, ty })
}

/// Deepest `*` / `[..]` nesting accepted in a type expression.
pub(crate) const MAX_TYPE_NESTING: usize = 32;

#[derive(Clone, Copy)]
enum Wrapper {
	Pointer,
	List,
}

/// Parse a standalone type expression.
///
/// Wrappers are peeled iteratively; more than [`MAX_TYPE_NESTING`] of them is
/// an [`ReflectError::InvalidTypeExpr`].
pub(crate) fn parse_type_expr(raw: &str) -> Result<TypeExpr<'_>> {
	let mut rest = raw.trim();
	let mut wrappers = Vec::new();

	loop {
		if let Some(inner) = rest.strip_prefix('*') {
			wrappers.push(Wrapper::Pointer);
			rest = inner.trim();
		} else if let Some(inner) = rest.strip_prefix('[') {
			wrappers.push(Wrapper::List);
			rest = inner.strip_suffix(']').ok_or_else(|| invalid_expr(raw))?.trim();
		} else {
			break;
		}

		if wrappers.len() > MAX_TYPE_NESTING {
			return Err(invalid_expr(raw));
		}
	}

	if !is_ident(rest) {
		return Err(invalid_expr(raw));
	}

	let mut expr = TypeExpr::Named(rest);
	for wrapper in wrappers.into_iter().rev() {
		expr = match wrapper {
			Wrapper::Pointer => TypeExpr::Pointer(Box::new(expr)),
			Wrapper::List => TypeExpr::List(Box::new(expr)),
		};
	}
	Ok(expr)
}

fn invalid_expr(raw: &str) -> ReflectError {
	ReflectError::InvalidTypeExpr { expr: raw.to_owned() }
}

fn is_ident(text: &str) -> bool {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) if first.is_alphabetic() || first == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
		_ => false,
	}
}

#[cfg(test)]
mod tests;
