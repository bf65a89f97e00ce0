use crate::{scanner::Position, types::DataType};

/// A syntax or static semantic error with the position of the offending token.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{position}: {type}")]
pub struct ParseError {
	pub position: Position,
	pub r#type:   ParseErrorType,
}

impl ParseError {
	pub fn new(position: Position, r#type: ParseErrorType) -> Self { Self { position, r#type } }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	/// A specific production was required but another token showed up.
	UnexpectedToken { expected: String, found: String },
	/// Identifier used before any `MUGNA` declared it.
	UnresolvedIdentifier(String),
	/// Identifier declared a second time in the same session.
	DuplicateDeclaration(String),
	/// Operand, initializer or condition of the wrong type.
	TypeMismatch { expected: DataType, found: DataType },
	/// Type name after `MUGNA` that is not one of the four declarable types.
	UnknownDataType(String),
	/// Left side of `=`, `++` or `--` is not a variable.
	InvalidAssignmentTarget,
	/// `KUNG DILI` or `KUNG WALA` without a preceding `KUNG (...)` block.
	DanglingElse,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			UnexpectedToken { expected, found } => {
				write!(f, "Expected {expected}, found {found}")
			}
			UnresolvedIdentifier(name) => {
				write!(f, "Identifier '{name}' not found")
			}
			DuplicateDeclaration(name) => {
				write!(f, "Identifier '{name}' has already been declared")
			}
			TypeMismatch { expected, found } => {
				write!(f, "Expected type {expected}, found {found}")
			}
			UnknownDataType(name) => {
				write!(f, "Data type '{name}' not found")
			}
			InvalidAssignmentTarget => {
				write!(f, "Invalid assignment target")
			}
			DanglingElse => {
				write!(f, "KUNG DILI or KUNG WALA without a preceding KUNG block")
			}
		}
	}
}
