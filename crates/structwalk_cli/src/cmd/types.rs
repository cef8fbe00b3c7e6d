use structwalk::reflect::{Result, TypeKind};

use crate::cmd::util::{DocArgs, emit_json, load_document};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub doc: DocArgs,
	/// Include builtin scalar types.
	#[arg(long)]
	pub all: bool,
	#[arg(long)]
	pub json: bool,
}

/// List declared types, their kinds and record fields.
pub fn run(args: Args) -> Result<()> {
	let Args { doc: doc_args, all, json } = args;
	let doc = load_document(&doc_args)?;

	let rows: Vec<TypeJson> = doc
		.schema
		.types()
		.filter(|(_, item)| all || !is_scalar(&item.kind))
		.map(|(index, item)| TypeJson {
			index,
			name: item.name.to_string(),
			kind: item.kind.as_str(),
			target: match item.kind {
				TypeKind::Pointer(target) | TypeKind::List(target) => Some(doc.schema.type_name(target).to_owned()),
				_ => None,
			},
			fields: item
				.fields()
				.iter()
				.map(|field| FieldJson {
					name: field.name.to_string(),
					type_name: doc.schema.type_name(field.type_idx).to_owned(),
					public: field.is_visible(),
				})
				.collect(),
		})
		.collect();

	if json {
		let payload = TypesJson {
			path: doc_args.path.display().to_string(),
			compression: doc.compression.as_str(),
			root: doc.root_type_name().to_owned(),
			types: rows,
		};
		return emit_json(&payload);
	}

	println!("path: {}", doc_args.path.display());
	println!("compression: {}", doc.compression.as_str());
	println!("root: {}", doc.root_type_name());
	println!("types: {}", rows.len());
	for row in &rows {
		match &row.target {
			Some(target) => println!("{}\t{}\t{}", row.name, row.kind, target),
			None => println!("{}\t{}", row.name, row.kind),
		}
		for field in &row.fields {
			let vis = if field.public { "pub " } else { "" };
			println!("  {vis}{}: {}", field.name, field.type_name);
		}
	}

	Ok(())
}

fn is_scalar(kind: &TypeKind) -> bool {
	matches!(
		kind,
		TypeKind::Bool | TypeKind::Int | TypeKind::Uint | TypeKind::Float | TypeKind::Str | TypeKind::Bytes
	)
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	type_name: String,
	public: bool,
}

#[derive(serde::Serialize)]
struct TypeJson {
	index: u32,
	name: String,
	kind: &'static str,
	target: Option<String>,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct TypesJson {
	path: String,
	compression: &'static str,
	root: String,
	types: Vec<TypeJson>,
}
