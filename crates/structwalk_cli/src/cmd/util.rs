use std::path::PathBuf;

use structwalk::reflect::{Document, LeafPolicy, LoadOptions, Result, Value};

/// Document selection shared by every command.
#[derive(clap::Args)]
pub struct DocArgs {
	pub path: PathBuf,
	/// Override the decoder nesting limit.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
}

/// Leaf policy flags shared by flattening commands.
#[derive(clap::Args)]
pub struct LeafArgs {
	/// Record type reported as a single value instead of walked; repeatable.
	#[arg(long = "leaf", value_name = "TYPE")]
	pub leaves: Vec<String>,
}

/// Load the document named by `args`.
pub(crate) fn load_document(args: &DocArgs) -> Result<Document> {
	let mut options = LoadOptions::default();
	if let Some(max_depth) = args.max_depth {
		options.max_depth = max_depth;
	}
	Document::open(&args.path, &options)
}

/// Build the leaf policy, rejecting names the document does not declare.
pub(crate) fn leaf_policy(doc: &Document, args: &LeafArgs) -> Result<LeafPolicy> {
	LeafPolicy::from_names(&doc.schema, &args.leaves)
}

/// Convert an optional value handle to JSON, `null` when absent.
pub(crate) fn value_json(value: Option<&Value>) -> Result<serde_json::Value> {
	match value {
		Some(value) => Ok(serde_json::to_value(value)?),
		None => Ok(serde_json::Value::Null),
	}
}

/// Print one pretty JSON payload on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
