#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "structwalk", version, about = "Walk the public fields of schema-typed documents")]
struct Cli {
	/// Enable debug logging on stderr.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List schema types with their kinds and fields.
	Types(cmd::types::Args),
	/// Show the declared and resolved root type.
	Resolve(cmd::resolve::Args),
	/// List every visited field with declared and resolved types.
	Walk(cmd::walk::Args),
	/// Print flattened field names.
	Names(cmd::names::Args),
	/// Print flattened `path=value` pairs.
	Values(cmd::values::Args),
	/// Print present leaves as one space-separated line.
	Render(cmd::render::Args),
}

fn main() {
	let cli = Cli::parse();

	let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> structwalk::reflect::Result<()> {
	match command {
		Commands::Types(args) => cmd::types::run(args),
		Commands::Resolve(args) => cmd::resolve::run(args),
		Commands::Walk(args) => cmd::walk::run(args),
		Commands::Names(args) => cmd::names::run(args),
		Commands::Values(args) => cmd::values::run(args),
		Commands::Render(args) => cmd::render::run(args),
	}
}
