use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bisaya", after_long_help = "Scanner, parser and interpreter for the Bisaya++ language.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a program file
	File {
		path:  PathBuf,
		/// Read DAWAT lines from this file instead of stdin
		#[arg(long)]
		input: Option<PathBuf>,
	},
	/// Scan and parse a program file without running it
	Check { path: PathBuf },
	/// Input prompt
	Repl,
}
