use super::{MAX_TYPE_NESTING, TypeExpr, parse_field_decl, parse_type_expr};
use crate::reflect::{ReflectError, Visibility};

#[test]
fn pub_prefix_marks_field_public() {
	let decl = parse_field_decl("pub name: str").expect("decl parses");
	assert_eq!(decl.vis, Visibility::Public);
	assert_eq!(decl.ident, "name");
	assert_eq!(decl.ty, TypeExpr::Named("str"));
}

#[test]
fn missing_pub_is_private() {
	let decl = parse_field_decl("secs: i64").expect("decl parses");
	assert_eq!(decl.vis, Visibility::Private);
	assert_eq!(decl.ident, "secs");
}

#[test]
fn field_named_like_keyword_prefix_stays_private() {
	let decl = parse_field_decl("public: bool").expect("decl parses");
	assert_eq!(decl.vis, Visibility::Private);
	assert_eq!(decl.ident, "public");
}

#[test]
fn nested_pointer_and_list_types_parse() {
	let ty = parse_type_expr("**[*Middle]").expect("expr parses");
	assert_eq!(ty.canonical(), "**[*Middle]");
	let TypeExpr::Pointer(inner) = ty else {
		panic!("expected pointer");
	};
	assert!(matches!(*inner, TypeExpr::Pointer(_)));
}

#[test]
fn malformed_declarations_are_rejected() {
	for raw in ["name str", "pub : str", "pub 1x: str", "name: [i64", "name: *", "name: a b"] {
		assert!(parse_field_decl(raw).is_err(), "expected {raw:?} to be rejected");
	}
}

#[test]
fn nesting_is_capped() {
	let deepest = format!("{}i64", "*[".repeat(MAX_TYPE_NESTING / 2)) + &"]".repeat(MAX_TYPE_NESTING / 2);
	assert!(parse_type_expr(&deepest).is_ok());

	let too_deep = format!("*{deepest}");
	assert!(matches!(parse_type_expr(&too_deep), Err(ReflectError::InvalidTypeExpr { .. })));
	assert!(matches!(
		parse_field_decl(&format!("pub a: {too_deep}")),
		Err(ReflectError::InvalidFieldDecl { .. })
	));
}
