//! Where `DAWAT` gets its lines from.

use std::{collections::VecDeque, io::BufRead};

use anyhow::{Context, anyhow, bail};

/// A blocking source of raw input lines, one per `DAWAT`.
pub trait LineSource {
	/// Next line without its line terminator.
	fn next_line(&mut self) -> anyhow::Result<String>;
}

impl<F> LineSource for F
where
	F: FnMut() -> anyhow::Result<String>,
{
	fn next_line(&mut self) -> anyhow::Result<String> { self() }
}

/// Reads lines from the process standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinLines;

impl LineSource for StdinLines {
	fn next_line(&mut self) -> anyhow::Result<String> {
		let mut line = String::new();
		let read = std::io::stdin().lock().read_line(&mut line).context("Failed read line from stdin")?;
		if read == 0 {
			bail!("Standard input is closed");
		}
		Ok(line.trim_end_matches(['\r', '\n']).to_string())
	}
}

/// A fixed queue of lines, for tests and `--input` files.
#[derive(Debug, Default, Clone)]
pub struct ScriptedLines {
	lines: VecDeque<String>,
}

impl ScriptedLines {
	pub fn new<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { lines: lines.into_iter().map(Into::into).collect() }
	}

	/// One line per line of `text`.
	pub fn from_text(text: &str) -> Self { Self::new(text.lines()) }

	pub fn remaining(&self) -> usize { self.lines.len() }
}

impl LineSource for ScriptedLines {
	fn next_line(&mut self) -> anyhow::Result<String> {
		self.lines.pop_front().ok_or_else(|| anyhow!("No more input lines"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scripted_lines_run_dry() {
		let mut lines = ScriptedLines::from_text("10, 20\nOO\n");
		assert_eq!(lines.remaining(), 2);
		assert_eq!(lines.next_line().unwrap(), "10, 20");
		assert_eq!(lines.next_line().unwrap(), "OO");
		assert!(lines.next_line().is_err());
	}

	#[test]
	fn closures_are_sources() {
		let mut count = 0;
		let mut source = || -> anyhow::Result<String> {
			count += 1;
			Ok(count.to_string())
		};
		assert_eq!(source.next_line().unwrap(), "1");
		assert_eq!(source.next_line().unwrap(), "2");
	}
}
