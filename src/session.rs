use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{
	BisayaError,
	interpreter::{
		Interpreter,
		input::{LineSource, StdinLines},
	},
	parser::{ParseMode, Parser},
	scanner::Scanner,
	statement::Program,
};

/// One parser and one interpreter that live as long as the session, so
/// declarations and values carry over between `run` calls.
pub struct Session {
	parser:      Parser,
	interpreter: Interpreter,
	mode:        ParseMode,
}

impl Session {
	/// A session that runs whole `SUGOD ... KATAPUSAN` programs.
	pub fn new(input: impl LineSource + 'static) -> Self { Self::with_mode(input, ParseMode::Program) }

	/// A session that runs REPL lines, program markers optional.
	pub fn repl(input: impl LineSource + 'static) -> Self { Self::with_mode(input, ParseMode::Repl) }

	fn with_mode(input: impl LineSource + 'static, mode: ParseMode) -> Self {
		Self { parser: Parser::new(), interpreter: Interpreter::new(input), mode }
	}

	pub fn mode(&self) -> ParseMode { self.mode }

	/// Scan, parse and run `source`, returning its output.
	///
	/// If the run fails, declarations it never reached are forgotten again so
	/// the names stay free to declare.
	pub fn run(&mut self, source: &str) -> Result<String, BisayaError> {
		let known = self.parser.symbols().clone();
		let program = self.check(source)?;
		match self.interpreter.interpret(&program) {
			Ok(output) => Ok(output),
			Err(e) => {
				let environment = self.interpreter.environment();
				self.parser.retain_symbols(|name| known.is_declared(name) || environment.data_type(name).is_some());
				Err(e.into())
			}
		}
	}

	/// Read a source file and run it.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String, BisayaError> {
		let source = read_source(path.as_ref())?;
		self.run(&source)
	}

	/// Scan and parse only.
	pub fn check(&mut self, source: &str) -> Result<Program, BisayaError> {
		let tokens = Scanner::new(source).scan_tokens()?;
		Ok(self.parser.parse(tokens, self.mode)?)
	}

	pub fn check_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Program, BisayaError> {
		let source = read_source(path.as_ref())?;
		self.check(&source)
	}

	/// Run a single REPL line.
	pub fn run_line(&mut self, line: &str) -> Result<String, BisayaError> { self.run(&format!("{}\n", line.trim())) }

	/// Run the REPL prompt until `exit` or end of input.
	pub fn run_prompt(&mut self) {
		while let Some(line) = prompt("> ") {
			if line.trim() == "exit" {
				return;
			}
			match self.run_line(&line) {
				Ok(output) if output.is_empty() => {}
				Ok(output) => println!("{output}"),
				Err(e) => {
					tracing::warn!("repl line failed: {e}");
					eprintln!("{e}");
				}
			}
		}
		println!("\nExited bisaya repl");
	}
}

/// Show `text` and read one line, `None` once stdin is closed or broken.
fn prompt(text: &str) -> Option<String> {
	print!("{text}");
	if let Err(e) = std::io::stdout().flush() {
		tracing::warn!("failed flush prompt: {e}");
	}
	match StdinLines.next_line() {
		Ok(line) => Some(line),
		Err(e) => {
			tracing::debug!("prompt input ended: {e:#}");
			None
		}
	}
}

fn read_source(path: &Path) -> Result<String, BisayaError> {
	let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
	tracing::debug!(path = %path.display(), bytes = source.len(), "read source file");
	Ok(source)
}
