use std::{fs::read_to_string, process::ExitCode};

use anyhow::Context;
use bisaya::{BisayaError, ScriptedLines, Session, StdinLines, cli::*};
use palc::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	let result = match Cli::parse().mode {
		Mode::File { path, input } => run_file(&path, input.as_deref()),
		Mode::Check { path } => Session::new(StdinLines).check_file(&path).map(|program| {
			println!("{}: {} statements OK", path.display(), program.body.len());
		}),
		Mode::Repl => {
			Session::repl(StdinLines).run_prompt();
			Ok(())
		}
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{e}");
			ExitCode::FAILURE
		}
	}
}

fn run_file(path: &std::path::Path, input: Option<&std::path::Path>) -> Result<(), BisayaError> {
	let mut session = match input {
		Some(input) => {
			let lines = read_to_string(input).with_context(|| format!("Failed open input file {}", input.display()))?;
			Session::new(ScriptedLines::from_text(&lines))
		}
		None => Session::new(StdinLines),
	};
	let output = session.run_file(path)?;
	println!("{output}");
	Ok(())
}
