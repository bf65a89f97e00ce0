//! # Bisaya++
//!
//! A small teaching language with Cebuano keywords. A program lives between
//! `SUGOD` and `KATAPUSAN`:
//!
//! ``` text
//! SUGOD
//!     MUGNA NUMERO x, y, z=5
//!     MUGNA TINUOD t="OO"
//!     x=y=4
//!     IPAKITA: x & t & z & $ & [#] & "last"
//! KATAPUSAN
//! ```

//! ## Scanning
//!
//! Source text becomes tokens. Keywords, literals and operators are resolved
//! here, newlines are kept because they end statements, comments (`--`) and
//! blanks are dropped. All malformed lexemes are reported at once.

//! ## Parsing and static analysis
//!
//! A recursive descent parser builds the AST and type checks it in the same
//! pass. The symbol table is a single flat namespace: a name is declared once
//! with `MUGNA` and must be declared before it is used.
//!
//! ``` markdown
//! x (Assign, NUMERO)
//! └── y (Assign, NUMERO)
//!     └── 4 (Literal, NUMERO)
//! ```

//! ## Interpreting
//!
//! The tree-walking interpreter executes the AST against a persistent variable
//! store, collecting everything `IPAKITA` prints into the returned output.
//! `DAWAT` pulls lines from a [`LineSource`].

//! ## Sessions
//!
//! [`Session`] ties the stages together. Its parser and interpreter outlive a
//! single call, which is what makes the REPL work line by line.

pub mod cli;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
mod session;
pub mod statement;
pub mod types;

pub use error::{
	BisayaError,
	interpreter::RuntimeError,
	parser::{ParseError, ParseErrorType},
	scanner::{ScanError, ScanErrorType, ScannerError},
};
pub use interpreter::{
	Interpreter,
	input::{LineSource, ScriptedLines, StdinLines},
	value::Value,
};
pub use parser::{ParseMode, Parser};
pub use scanner::Scanner;
pub use session::Session;
pub use statement::Program;
pub use types::DataType;
