use structwalk::reflect::{Result, flatten};

use crate::cmd::util::{DocArgs, LeafArgs, emit_json, leaf_policy, load_document, value_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub doc: DocArgs,
	#[command(flatten)]
	pub leaves: LeafArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print flattened `path=value` pairs; absent values print as `<invalid>`.
pub fn run(args: Args) -> Result<()> {
	let Args {
		doc: doc_args,
		leaves,
		json,
	} = args;
	let doc = load_document(&doc_args)?;
	let policy = leaf_policy(&doc, &leaves)?;
	let fields = flatten(&doc.schema, doc.root_type, &doc.root, &policy);

	if json {
		let mut values = Vec::with_capacity(fields.len());
		for item in &fields {
			values.push(ValueJson {
				path: item.path.clone(),
				type_name: doc.schema.type_name(item.type_idx).to_owned(),
				valid: item.value.is_some(),
				value: value_json(item.value)?,
			});
		}
		return emit_json(&ValuesJson {
			root: doc.root_type_name().to_owned(),
			values,
		});
	}

	for item in &fields {
		match item.value {
			Some(value) => println!("{}={value}", item.path),
			None => println!("{}=<invalid>", item.path),
		}
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct ValueJson {
	path: String,
	#[serde(rename = "type")]
	type_name: String,
	valid: bool,
	value: serde_json::Value,
}

#[derive(serde::Serialize)]
struct ValuesJson {
	root: String,
	values: Vec<ValueJson>,
}
