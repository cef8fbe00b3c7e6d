use structwalk::reflect::{Result, render_assignments};

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

pub fn run(args: Args) -> Result<()> {
	let Args {
		doc: doc_args,
		leaves,
		json,
	} = args;
	let doc = load_document(&doc_args)?;
	let policy = leaf_policy(&doc, &leaves)?;
	let line = render_assignments(&doc.schema, doc.root_type, &doc.root, &policy);

	if json {
		return emit_json(&RenderJson {
			root: doc.root_type_name().to_owned(),
			line,
		});
	}

	println!("{line}");
	Ok(())
}

#[derive(serde::Serialize)]
struct RenderJson {
	root: String,
	line: String,
}
