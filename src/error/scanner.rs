use crate::scanner::Position;

/// Scanner related errors
#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
	/// Internal scanner error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered during scanning
	#[error(transparent)]
	ScanError(#[from] ScanError),
}

/// A specific scanning error with its position and type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{position}: {type}")]
pub struct ScanError {
	/// Where the offending lexeme starts.
	pub position: Position,
	/// The type of scanning error.
	pub r#type:   ScanErrorType,
}

impl ScanError {
	pub fn new(position: Position, r#type: ScanErrorType) -> Self { Self { position, r#type } }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanErrorType {
	/// Error for unexpected characters.
	UnexpectedCharacter(char),
	/// Error for strings missing the closing quote on their line.
	UnterminatedString,
	/// Error for `'` without a closing quote right after one character.
	UnterminatedCharLiteral,
	/// Error for `''`.
	EmptyCharLiteral,
	/// Error for `[` not followed by one character and `]`.
	InvalidEscapedChar,
	/// Error for malformed or out of range numbers.
	InvalidNumericLiteral(String),
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			UnexpectedCharacter(c) => {
				write!(f, "Unexpected character '{c}'")
			}
			UnterminatedString => {
				write!(f, "Unterminated string literal")
			}
			UnterminatedCharLiteral => {
				write!(f, "Unterminated character literal")
			}
			EmptyCharLiteral => {
				write!(f, "Empty character literal")
			}
			InvalidEscapedChar => {
				write!(f, "Invalid escaped character, expected [c]")
			}
			InvalidNumericLiteral(details) => {
				write!(f, "Invalid numeric literal: {details}")
			}
		}
	}
}
