use structwalk::reflect::Result;

use crate::cmd::util::{DocArgs, emit_json, load_document, value_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub doc: DocArgs,
	#[arg(long)]
	pub json: bool,
}

/// Strip pointer and polymorphic layers from the document root.
pub fn run(args: Args) -> Result<()> {
	let Args { doc: doc_args, json } = args;
	let doc = load_document(&doc_args)?;
	let resolved = doc.resolve_root();
	let resolved_name = doc.schema.type_name(resolved.type_idx);

	if json {
		let payload = ResolveJson {
			path: doc_args.path.display().to_string(),
			declared: doc.root_type_name().to_owned(),
			resolved: resolved_name.to_owned(),
			valid: resolved.is_valid(),
			value: value_json(resolved.value)?,
		};
		return emit_json(&payload);
	}

	println!("path: {}", doc_args.path.display());
	println!("declared: {}", doc.root_type_name());
	println!("resolved: {resolved_name}");
	println!("valid: {}", resolved.is_valid());

	Ok(())
}

#[derive(serde::Serialize)]
struct ResolveJson {
	path: String,
	declared: String,
	resolved: String,
	valid: bool,
	value: serde_json::Value,
}
