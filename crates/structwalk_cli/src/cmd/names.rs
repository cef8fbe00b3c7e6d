use structwalk::reflect::{Result, flatten_names};

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

/// Print flattened field names, one per line.
pub fn run(args: Args) -> Result<()> {
	let Args {
		doc: doc_args,
		leaves,
		json,
	} = args;
	let doc = load_document(&doc_args)?;
	let policy = leaf_policy(&doc, &leaves)?;
	let names = flatten_names(&doc.schema, doc.root_type, &doc.root, &policy);

	if json {
		return emit_json(&NamesJson {
			root: doc.root_type_name().to_owned(),
			names,
		});
	}

	for name in &names {
		println!("{name}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct NamesJson {
	root: String,
	names: Vec<String>,
}
