use std::convert::Infallible;

use structwalk::reflect::{Descend, Result};

use crate::cmd::util::{DocArgs, LeafArgs, emit_json, leaf_policy, load_document};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub doc: DocArgs,
	#[command(flatten)]
	pub leaves: LeafArgs,
	#[arg(long)]
	pub json: bool,
}

/// Visit every public field, descending into all non-leaf records.
pub fn run(args: Args) -> Result<()> {
	let Args {
		doc: doc_args,
		leaves,
		json,
	} = args;
	let doc = load_document(&doc_args)?;
	let policy = leaf_policy(&doc, &leaves)?;

	let mut rows = Vec::new();
	let walked = doc.traverse(|value, field, path| {
		rows.push(WalkRowJson {
			path: path.to_owned(),
			declared: doc.schema.type_name(field.declared_type).to_owned(),
			type_name: field.type_name().to_owned(),
			kind: field.ty.kind.as_str(),
			valid: value.is_some(),
		});
		Ok::<_, Infallible>(Descend::from(policy.descends(field)))
	});
	if let Err(never) = walked {
		match never {}
	}
	tracing::debug!(visited = rows.len(), "walk finished");

	if json {
		let payload = WalkJson {
			path: doc_args.path.display().to_string(),
			root: doc.root_type_name().to_owned(),
			fields: rows,
		};
		return emit_json(&payload);
	}

	println!("path: {}", doc_args.path.display());
	println!("root: {}", doc.root_type_name());
	println!("fields: {}", rows.len());
	println!("path\tdeclared\ttype\tkind\tvalid");
	for row in &rows {
		println!("{}\t{}\t{}\t{}\t{}", row.path, row.declared, row.type_name, row.kind, row.valid);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct WalkRowJson {
	path: String,
	declared: String,
	#[serde(rename = "type")]
	type_name: String,
	kind: &'static str,
	valid: bool,
}

#[derive(serde::Serialize)]
struct WalkJson {
	path: String,
	root: String,
	fields: Vec<WalkRowJson>,
}
