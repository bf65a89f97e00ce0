pub mod interpreter;
pub mod parser;
pub mod scanner;

use scanner::ScanError;

/// BisayaError is the top-level error type of the toolchain.
#[derive(thiserror::Error, Debug)]
pub enum BisayaError {
	/// I/O or other unexpected failure
	#[error("InternalError: {0:#}")]
	InternalError(#[from] anyhow::Error),
	/// Every scanner error found in the source
	#[error("Generated {} scanner errors:\n{}", .0.len(), display_scan_errors(.0))]
	ScannerErrors(Vec<ScanError>),
	/// First syntax or semantic error found by the parser
	#[error("Parse error at {0}")]
	ParseError(#[from] parser::ParseError),
	/// Runtime errors encountered during interpretation
	#[error("Runtime error: {0}")]
	RuntimeError(#[from] interpreter::RuntimeError),
}

fn display_scan_errors(errors: &[ScanError]) -> String {
	errors.iter().map(|e| format!("{e}")).collect::<Vec<String>>().join("\n")
}
