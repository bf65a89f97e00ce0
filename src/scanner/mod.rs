//! Turns Bisaya++ source text into tokens.
//!
//! The scanner walks the characters once, grouping them into lexemes and
//! resolving keywords as it goes, so the parser only ever looks at token kinds.
//! Literal lexemes are converted to their values here: `"OO"` and `"DILI"`
//! become boolean literals, `[&]` becomes the character `&`, `$` is the
//! carriage return.
//!
//! `--` starts a comment that runs to the end of the line, except directly
//! after an identifier (`x--`), where it is the decrement operator.
//!
//! Newlines are tokens, the grammar uses them to end statements. Spaces, tabs
//! and comments are dropped. Every error in the input is collected before
//! scanning gives up, so one run reports all of them.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub use token::*;

use crate::error::{BisayaError, scanner::{ScanError, ScanErrorType, ScannerError}};

/// A scanner for Bisaya++ source code
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points just past the character currently being considered
	cursor:      usize,
	/// Line the current lexeme is on
	line:        usize,
	/// Byte offset where the current line begins
	line_start:  usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1, line_start: 0 }
	}

	/// Scan all tokens from the source code, the last one is always `Eof`.
	pub fn scan_tokens(mut self) -> Result<Vec<Token<'a>>, BisayaError> {
		let mut tokens = Vec::new();
		let mut errors = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			match self.scan_token(&mut tokens) {
				Err(ScannerError::ScanError(e)) => {
					tracing::debug!("scan error: {e}");
					errors.push(e);
				}
				Err(ScannerError::InternalError(e)) => {
					return Err(e.into());
				}
				Ok(_) => {}
			}
		}
		if !errors.is_empty() {
			return Err(BisayaError::ScannerErrors(errors));
		}
		self.start = self.source.len();
		tokens.push(Token::new(Eof, "", self.position()));
		tracing::debug!(count = tokens.len(), "scanned tokens");
		Ok(tokens)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self, tokens: &mut Vec<Token<'a>>) -> Result<(), ScannerError> {
		let position = self.position();
		let next_char = self.advance().context("Unexpected EOF")?;
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			',' => Comma,
			':' => Colon,
			'&' => Ampersand,
			'$' => CarriageReturn,
			'*' => Star,
			'/' => Slash,
			'%' => Percent,
			'+' => if self.match_next('+') { PlusPlus } else { Plus },
			'-' => if self.peek() == Some('-') {
				if self.follows_identifier(tokens) { self.advance(); MinusMinus } else { self.comment() }
			} else { Minus },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else if self.match_next('>') { NotEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => NewLine,
			'"' => self.string(position)?,
			'\'' => self.char_literal(position)?,
			'[' => self.escaped_char(position)?,
			c if c.is_ascii_digit() => self.number(position)?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(ScanError::new(position, ScanErrorType::UnexpectedCharacter(next_char)).into()),
		};

		if !r#type.is_ignored() {
			let lexeme = &self.source[self.start..self.cursor];
			tokens.push(Token::new(r#type, lexeme, position));
		}
		if next_char == '\n' {
			self.line += 1;
			self.line_start = self.cursor;
		}

		Ok(())
	}

	/// Position of the current lexeme start
	fn position(&self) -> Position {
		let column = self.source[self.line_start..self.start].chars().count() + 1;
		Position::new(self.line, column)
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Whether the lexeme starts right after an identifier, with nothing in
	/// between.
	fn follows_identifier(&self, tokens: &[Token<'a>]) -> bool {
		let adjacent = self.source[..self.start].chars().next_back().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
		adjacent && tokens.last().is_some_and(|token| matches!(token.r#type, Identifier(_)))
	}

	/// Skip a `--` comment, leaving the newline in place
	fn comment(&mut self) -> TokenType<'a> {
		while self.peek().is_some_and(|c| c != '\n') {
			self.advance();
		}
		Comment
	}

	/// Scan a string literal, which must close on the same line
	fn string(&mut self, position: Position) -> Result<TokenType<'a>, ScannerError> {
		while let Some(c) = self.peek() {
			if c == '"' || c == '\n' {
				break;
			}
			self.advance();
		}

		if !self.match_next('"') {
			return Err(ScanError::new(position, ScanErrorType::UnterminatedString).into());
		}
		let value = &self.source[self.start + 1..self.cursor - 1];
		Ok(match value {
			"OO" => BoolLiteral(true),
			"DILI" => BoolLiteral(false),
			_ => StringLiteral(value),
		})
	}

	/// Scan a single quoted character literal
	fn char_literal(&mut self, position: Position) -> Result<TokenType<'a>, ScannerError> {
		match self.peek() {
			Some('\'') => {
				self.advance();
				Err(ScanError::new(position, ScanErrorType::EmptyCharLiteral).into())
			}
			None | Some('\n') => Err(ScanError::new(position, ScanErrorType::UnterminatedCharLiteral).into()),
			Some(_) => {
				let c = self.advance().context("Unexpected EOF in character literal")?;
				if self.match_next('\'') {
					Ok(CharLiteral(c))
				} else {
					Err(ScanError::new(position, ScanErrorType::UnterminatedCharLiteral).into())
				}
			}
		}
	}

	/// Scan a `[c]` escaped character
	fn escaped_char(&mut self, position: Position) -> Result<TokenType<'a>, ScannerError> {
		match (self.peek(), self.peek_second()) {
			(Some(c), Some(']')) if c != '\n' => {
				self.advance();
				self.advance(); // The closing ]
				Ok(EscapedChar(c))
			}
			_ => Err(ScanError::new(position, ScanErrorType::InvalidEscapedChar).into()),
		}
	}

	/// Scan an integer or decimal literal
	fn number(&mut self, position: Position) -> Result<TokenType<'a>, ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		if self.match_next('.') {
			if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
				let details = "expected digit after decimal point".to_string();
				return Err(ScanError::new(position, ScanErrorType::InvalidNumericLiteral(details)).into());
			}
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
			let s = &self.source[self.start..self.cursor];
			return Ok(FloatLiteral(s.parse().context("Failed to parse decimal literal")?));
		}

		let s = &self.source[self.start..self.cursor];
		s.parse().map(IntLiteral).map_err(|_| {
			ScanError::new(position, ScanErrorType::InvalidNumericLiteral(format!("{s} is out of range"))).into()
		})
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}
