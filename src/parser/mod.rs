//! The `Parser` turns tokens into a typed AST.
//!
//! Parsing and static checking happen in the same pass: every identifier is
//! resolved against the symbol table when it is read, and every operator
//! checks its operand types, so an accepted tree is well typed.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|=|Right
//! Logical|UG O|Left
//! Relational|== <> < > <= >=|Left
//! Additive|+ -|Left
//! Multiplicative|* / %|Left
//! Unary|DILI + - ++|Right
//! Postfix|++ --|Left
//!
//! Grammar:
//!
//! ``` BNF
//! program        → NEWLINE* "SUGOD" statement* "KATAPUSAN" NEWLINE* EOF ;
//! statement      → declaration | input | output | if | for | block | expression END ;
//! declaration    → "MUGNA" TYPE binding ( "," binding )* END ;
//! binding        → IDENTIFIER ( "=" expression )? ;
//! input          → "DAWAT" ":" IDENTIFIER ( "," IDENTIFIER )* END ;
//! output         → "IPAKITA" ":" expression ( "&" expression )* END ;
//! if             → "KUNG" "(" expression ")" block
//!                  ( "KUNG" "DILI" "(" expression ")" block )*
//!                  ( "KUNG" "WALA" block )? END ;
//! for            → "ALANG" "SA" "(" expression "," expression "," expression ")" block END ;
//! block          → "PUNDOK" "{" statement* "}" ;
//! expression     → assignment ;
//! assignment     → IDENTIFIER "=" assignment | logical ;
//! logical        → relational ( ( "UG" | "O" ) relational )* ;
//! relational     → additive ( ( "==" | "<>" | ">" | ">=" | "<" | "<=" ) additive )* ;
//! additive       → multiplicative ( ( "+" | "-" ) multiplicative )* ;
//! multiplicative → unary ( ( "*" | "/" | "%" ) unary )* ;
//! unary          → ( "DILI" | "+" | "-" | "++" ) unary | postfix ;
//! postfix        → primary ( "++" | "--" )? ;
//! primary        → NUMBER | CHAR | STRING | BOOL | "$" | IDENTIFIER | "(" expression ")" ;
//! ```
//!
//! `END` is a newline, or nothing when the next token is `}`, `KATAPUSAN` or
//! the end of input.

pub mod expression;
pub mod symbols;

use TokenType::*;
use expression::{BinaryOperator, Expression, ExpressionKind, LiteralValue, UnaryOperator};
use symbols::SymbolTable;

use crate::{error::parser::{ParseError, ParseErrorType}, scanner::{Position, Token, TokenType}, statement::{Binding, Block, ElseIf, Program, Statement}, types::DataType};

/// How a token stream is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
	/// A whole program between `SUGOD` and `KATAPUSAN`.
	#[default]
	Program,
	/// One interactive line, the markers are optional.
	Repl,
}

/// Parser for Bisaya++ that remembers declarations between calls.
#[derive(Debug, Default)]
pub struct Parser {
	symbols: SymbolTable,
}

impl Parser {
	pub fn new() -> Self { Self::default() }

	pub fn symbols(&self) -> &SymbolTable { &self.symbols }

	/// Drop remembered declarations for which `keep` returns false.
	pub fn retain_symbols(&mut self, keep: impl FnMut(&str) -> bool) { self.symbols.retain(keep) }

	/// Parse a token stream into a program.
	///
	/// Declarations are only remembered if the whole input parses, so a failed
	/// REPL line leaves no trace.
	pub fn parse(&mut self, mut tokens: Vec<Token<'_>>, mode: ParseMode) -> Result<Program, ParseError> {
		if !tokens.last().is_some_and(|token| token.r#type == Eof) {
			let position = tokens.last().map(|token| token.position).unwrap_or_default();
			tokens.push(Token::new(Eof, "", position));
		}
		let mut symbols = self.symbols.clone();
		let program = TokenParser { tokens, current: 0, symbols: &mut symbols }.program(mode)?;
		tracing::debug!(statements = program.body.len(), symbols = symbols.len(), "parsed program");
		self.symbols = symbols;
		Ok(program)
	}
}

/// Parsing state for a single token stream.
struct TokenParser<'s, 'a> {
	/// Never empty, ends with `Eof`.
	tokens:  Vec<Token<'a>>,
	current: usize,
	symbols: &'s mut SymbolTable,
}

impl<'a> TokenParser<'_, 'a> {
	fn program(mut self, mode: ParseMode) -> Result<Program, ParseError> {
		self.skip_newlines();
		let framed = match mode {
			ParseMode::Program => {
				self.consume(Sugod, "SUGOD to start the program")?;
				true
			}
			ParseMode::Repl => self.match_token(&Sugod),
		};
		let body = self.statements(|r#type| matches!(r#type, Katapusan))?;
		if framed {
			self.consume(Katapusan, "KATAPUSAN to end the program")?;
		} else {
			self.match_token(&Katapusan);
		}
		self.skip_newlines();
		if self.peek().r#type != Eof {
			return Err(self.unexpected("end of input"));
		}
		Ok(Program { body })
	}

	/// Parse statements until `end` matches the next token or input runs out.
	fn statements(&mut self, end: fn(&TokenType<'a>) -> bool) -> Result<Vec<Statement>, ParseError> {
		let mut body = Vec::new();
		loop {
			self.skip_newlines();
			let next = &self.peek().r#type;
			if end(next) || *next == Eof {
				return Ok(body);
			}
			body.push(self.statement()?);
		}
	}

	fn statement(&mut self) -> Result<Statement, ParseError> {
		match self.peek().r#type {
			Mugna => self.declaration(),
			Dawat => self.input(),
			Ipakita => self.output(),
			Kung => self.if_statement(),
			Alang => self.for_statement(),
			Pundok => {
				let block = self.block()?;
				self.end_statement()?;
				Ok(Statement::Block(block))
			}
			_ => {
				let expression = self.expression()?;
				self.end_statement()?;
				Ok(Statement::Expression(expression))
			}
		}
	}

	fn declaration(&mut self) -> Result<Statement, ParseError> {
		self.advance(); // MUGNA
		let data_type = match self.peek().r#type {
			TypeName | Identifier(_) => {
				let token = self.advance();
				DataType::from_keyword(token.lexeme).ok_or_else(|| {
					ParseError::new(token.position, ParseErrorType::UnknownDataType(token.lexeme.to_string()))
				})?
			}
			_ => return Err(self.unexpected("a data type after MUGNA")),
		};

		let mut bindings = Vec::new();
		loop {
			let (name, position) = self.identifier()?;
			if self.symbols.is_declared(name) {
				return Err(ParseError::new(position, ParseErrorType::DuplicateDeclaration(name.to_string())));
			}
			let initializer = if self.match_token(&Equal) {
				let value = self.expression()?;
				check_type(data_type, &value)?;
				Some(value)
			} else {
				None
			};
			self.symbols.declare(name, data_type);
			bindings.push(Binding { name: name.to_string(), initializer });
			if !self.match_token(&Comma) {
				break;
			}
		}
		self.end_statement()?;
		Ok(Statement::VarDeclaration { data_type, bindings })
	}

	fn input(&mut self) -> Result<Statement, ParseError> {
		let position = self.advance().position;
		self.consume(Colon, "':' after DAWAT")?;
		let mut targets = Vec::new();
		loop {
			let (name, position) = self.identifier()?;
			if !self.symbols.is_declared(name) {
				return Err(ParseError::new(position, ParseErrorType::UnresolvedIdentifier(name.to_string())));
			}
			targets.push(name.to_string());
			if !self.match_token(&Comma) {
				break;
			}
		}
		self.end_statement()?;
		Ok(Statement::Input { targets, position })
	}

	fn output(&mut self) -> Result<Statement, ParseError> {
		self.advance(); // IPAKITA
		self.consume(Colon, "':' after IPAKITA")?;
		let mut items = vec![self.expression()?];
		while self.match_token(&Ampersand) {
			items.push(self.expression()?);
		}
		self.end_statement()?;
		Ok(Statement::Output(items))
	}

	fn if_statement(&mut self) -> Result<Statement, ParseError> {
		let kung = self.advance();
		if matches!(self.peek().r#type, Dili | Wala) {
			return Err(ParseError::new(kung.position, ParseErrorType::DanglingElse));
		}
		let condition = self.condition()?;
		let then_block = self.block()?;

		let mut else_ifs = Vec::new();
		let mut else_block = None;
		// Newlines may separate the arms, and already end the statement.
		let mut ended = self.skip_newlines();
		while self.peek().r#type == Kung && matches!(self.peek_next().r#type, Dili | Wala) {
			self.advance(); // KUNG
			if self.match_token(&Dili) {
				self.skip_newlines();
				let condition = self.condition()?;
				let block = self.block()?;
				else_ifs.push(ElseIf { condition, block });
				ended = self.skip_newlines();
			} else {
				self.advance(); // WALA
				self.skip_newlines();
				else_block = Some(self.block()?);
				ended = self.skip_newlines();
				break;
			}
		}
		if !ended {
			self.end_statement()?;
		}
		Ok(Statement::If { condition, then_block, else_ifs, else_block })
	}

	/// `( expression )` of type `TINUOD`
	fn condition(&mut self) -> Result<Expression, ParseError> {
		self.consume(LeftParen, "'(' before the condition")?;
		let condition = self.expression()?;
		check_type(DataType::Bool, &condition)?;
		self.consume(RightParen, "')' after the condition")?;
		self.skip_newlines();
		Ok(condition)
	}

	fn for_statement(&mut self) -> Result<Statement, ParseError> {
		self.advance(); // ALANG
		self.consume(Sa, "SA after ALANG")?;
		self.consume(LeftParen, "'(' after ALANG SA")?;
		let init = self.expression()?;
		self.consume(Comma, "',' after the loop initializer")?;
		let condition = self.expression()?;
		check_type(DataType::Bool, &condition)?;
		self.consume(Comma, "',' after the loop condition")?;
		let increment = self.expression()?;
		self.consume(RightParen, "')' after the loop update")?;
		self.skip_newlines();
		let body = self.block()?;
		self.end_statement()?;
		Ok(Statement::For { init, condition, increment, body })
	}

	fn block(&mut self) -> Result<Block, ParseError> {
		self.consume(Pundok, "PUNDOK")?;
		self.skip_newlines();
		self.consume(LeftBrace, "'{' after PUNDOK")?;
		let body = self.statements(|r#type| matches!(r#type, RightBrace))?;
		self.consume(RightBrace, "'}' to close the block")?;
		Ok(Block { body })
	}

	fn expression(&mut self) -> Result<Expression, ParseError> { self.assignment() }

	/// Only a bare identifier is assignable, `(a) = 1` is not.
	fn assignment(&mut self) -> Result<Expression, ParseError> {
		let start = self.current;
		let target = self.logical()?;
		if self.peek().r#type != Equal {
			return Ok(target);
		}
		let bare = self.current == start + 1;
		let equal = self.advance();
		let (true, ExpressionKind::Identifier(name)) = (bare, target.kind) else {
			return Err(ParseError::new(equal.position, ParseErrorType::InvalidAssignmentTarget));
		};
		let value = self.assignment()?;
		check_type(target.data_type, &value)?;
		Ok(Expression::assign(name, value, target.data_type, target.position))
	}

	fn logical(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.relational()?;
		while let Some((operator, position)) = self.match_operator(&[BinaryOperator::And, BinaryOperator::Or]) {
			let right = self.relational()?;
			expression = binary(expression, operator, right, position)?;
		}
		Ok(expression)
	}

	fn relational(&mut self) -> Result<Expression, ParseError> {
		const RELATIONAL: [BinaryOperator; 6] = [
			BinaryOperator::Equal,
			BinaryOperator::NotEqual,
			BinaryOperator::Greater,
			BinaryOperator::GreaterEqual,
			BinaryOperator::Less,
			BinaryOperator::LessEqual,
		];
		let mut expression = self.additive()?;
		while let Some((operator, position)) = self.match_operator(&RELATIONAL) {
			let right = self.additive()?;
			expression = binary(expression, operator, right, position)?;
		}
		Ok(expression)
	}

	fn additive(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.multiplicative()?;
		while let Some((operator, position)) = self.match_operator(&[BinaryOperator::Add, BinaryOperator::Subtract]) {
			let right = self.multiplicative()?;
			expression = binary(expression, operator, right, position)?;
		}
		Ok(expression)
	}

	fn multiplicative(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.unary()?;
		while let Some((operator, position)) =
			self.match_operator(&[BinaryOperator::Multiply, BinaryOperator::Divide, BinaryOperator::Modulo])
		{
			let right = self.unary()?;
			expression = binary(expression, operator, right, position)?;
		}
		Ok(expression)
	}

	/// Signs become a subtraction from zero, `++x` an assignment.
	fn unary(&mut self) -> Result<Expression, ParseError> {
		match self.peek().r#type {
			Dili => {
				let token = self.advance();
				let operand = self.unary()?;
				check_type(DataType::Bool, &operand)?;
				Ok(Expression::unary(UnaryOperator::Not, operand, token.position))
			}
			Plus | Minus => {
				let token = self.advance();
				let operand = self.unary()?;
				if !operand.data_type.is_numeric() {
					return Err(mismatch(DataType::Int, &operand));
				}
				let zero = match operand.data_type {
					DataType::Float => LiteralValue::Float(0.0),
					_ => LiteralValue::Int(0),
				};
				let operator = if token.r#type == Plus { BinaryOperator::Add } else { BinaryOperator::Subtract };
				let data_type = operand.data_type;
				Ok(Expression::binary(Expression::literal(zero, token.position), operator, operand, data_type))
			}
			PlusPlus => {
				let token = self.advance();
				let start = self.current;
				let target = self.unary()?;
				let bare = self.current == start + 1;
				increment(target, bare, BinaryOperator::Add, token.position)
			}
			_ => self.postfix(),
		}
	}

	fn postfix(&mut self) -> Result<Expression, ParseError> {
		let start = self.current;
		let expression = self.primary()?;
		let bare = self.current == start + 1;
		let operator = match self.peek().r#type {
			PlusPlus => BinaryOperator::Add,
			MinusMinus => BinaryOperator::Subtract,
			_ => return Ok(expression),
		};
		let token = self.advance();
		increment(expression, bare, operator, token.position)
	}

	fn primary(&mut self) -> Result<Expression, ParseError> {
		let token = self.peek().clone();
		let literal = match token.r#type {
			IntLiteral(n) => LiteralValue::Int(n),
			FloatLiteral(n) => LiteralValue::Float(n),
			CharLiteral(c) | EscapedChar(c) => LiteralValue::Char(c),
			CarriageReturn => LiteralValue::Char('\n'),
			StringLiteral(s) => LiteralValue::Text(s.to_string()),
			BoolLiteral(b) => LiteralValue::Bool(b),
			Identifier(name) => {
				self.advance();
				let data_type = self.symbols.resolve(name).ok_or_else(|| {
					ParseError::new(token.position, ParseErrorType::UnresolvedIdentifier(name.to_string()))
				})?;
				return Ok(Expression::identifier(name, data_type, token.position));
			}
			LeftParen => {
				self.advance(); // consume '('
				let expression = self.expression()?;
				self.consume(RightParen, "')' after the expression")?;
				return Ok(expression);
			}
			// Left for the statement to consume.
			NewLine => return Ok(Expression::empty(token.position)),
			_ => return Err(self.unexpected("an expression")),
		};
		self.advance();
		Ok(Expression::literal(literal, token.position))
	}

	fn identifier(&mut self) -> Result<(&'a str, Position), ParseError> {
		let token = self.peek();
		let Identifier(name) = token.r#type else {
			return Err(self.unexpected("an identifier"));
		};
		let position = token.position;
		self.advance();
		Ok((name, position))
	}

	/// A statement ends at a newline, or right before a closing token.
	fn end_statement(&mut self) -> Result<(), ParseError> {
		match self.peek().r#type {
			NewLine => {
				self.advance();
				Ok(())
			}
			RightBrace | Katapusan | Eof => Ok(()),
			_ => Err(self.unexpected("a newline")),
		}
	}

	/// Skip blank lines, returning whether there were any.
	fn skip_newlines(&mut self) -> bool {
		let mut skipped = false;
		while self.match_token(&NewLine) {
			skipped = true;
		}
		skipped
	}

	fn match_operator(&mut self, operators: &[BinaryOperator]) -> Option<(BinaryOperator, Position)> {
		let token = self.peek();
		let operator = binary_operator(&token.r#type).filter(|operator| operators.contains(operator))?;
		let position = token.position;
		self.advance();
		Some((operator, position))
	}

	fn match_token(&mut self, r#type: &TokenType<'a>) -> bool {
		if self.peek().r#type == *r#type {
			self.advance();
			return true;
		}
		false
	}

	fn consume(&mut self, r#type: TokenType<'a>, expected: &str) -> Result<Token<'a>, ParseError> {
		if self.peek().r#type == r#type {
			return Ok(self.advance());
		}
		Err(self.unexpected(expected))
	}

	fn unexpected(&self, expected: &str) -> ParseError {
		let token = self.peek();
		let found = match token.r#type {
			Eof => "end of input".to_string(),
			NewLine => "newline".to_string(),
			_ => format!("'{}'", token.lexeme),
		};
		ParseError::new(token.position, ParseErrorType::UnexpectedToken { expected: expected.to_string(), found })
	}

	/// Advance to the next token, staying on `Eof`.
	fn advance(&mut self) -> Token<'a> {
		let token = self.peek().clone();
		if token.r#type != Eof {
			self.current += 1;
		}
		token
	}

	/// Peek at the current token.
	fn peek(&self) -> &Token<'a> { &self.tokens[self.current.min(self.tokens.len() - 1)] }

	fn peek_next(&self) -> &Token<'a> { &self.tokens[(self.current + 1).min(self.tokens.len() - 1)] }
}

fn binary_operator(r#type: &TokenType<'_>) -> Option<BinaryOperator> {
	Some(match r#type {
		Plus => BinaryOperator::Add,
		Minus => BinaryOperator::Subtract,
		Star => BinaryOperator::Multiply,
		Slash => BinaryOperator::Divide,
		Percent => BinaryOperator::Modulo,
		Greater => BinaryOperator::Greater,
		GreaterEqual => BinaryOperator::GreaterEqual,
		Less => BinaryOperator::Less,
		LessEqual => BinaryOperator::LessEqual,
		EqualEqual => BinaryOperator::Equal,
		NotEqual => BinaryOperator::NotEqual,
		Ug => BinaryOperator::And,
		O => BinaryOperator::Or,
		_ => return None,
	})
}

/// Type check a binary operation and build it.
fn binary(
	left: Expression,
	operator: BinaryOperator,
	right: Expression,
	position: Position,
) -> Result<Expression, ParseError> {
	let at = |expected, found| ParseError::new(position, ParseErrorType::TypeMismatch { expected, found });
	let data_type = if operator.is_logical() {
		for operand in [&left, &right] {
			if operand.data_type != DataType::Bool {
				return Err(at(DataType::Bool, operand.data_type));
			}
		}
		DataType::Bool
	} else if operator.is_arithmetic() {
		for operand in [&left, &right] {
			if !operand.data_type.is_numeric() {
				return Err(at(DataType::Int, operand.data_type));
			}
		}
		left.data_type.promote(right.data_type)
	} else {
		if !left.data_type.matches(right.data_type) {
			return Err(at(left.data_type, right.data_type));
		}
		if operator.is_ordering() && !(left.data_type.is_numeric() || left.data_type == DataType::Char) {
			return Err(at(DataType::Int, left.data_type));
		}
		DataType::Bool
	};
	Ok(Expression::binary(left, operator, right, data_type))
}

/// `x++`, `x--` and `++x` as `x = x +/- 1`. `bare` is false when the target
/// spans more than its identifier token, as in `(x)++`.
fn increment(
	target: Expression,
	bare: bool,
	operator: BinaryOperator,
	position: Position,
) -> Result<Expression, ParseError> {
	let (true, ExpressionKind::Identifier(name)) = (bare, &target.kind) else {
		return Err(ParseError::new(position, ParseErrorType::InvalidAssignmentTarget));
	};
	if !target.data_type.is_numeric() {
		return Err(mismatch(DataType::Int, &target));
	}
	let name = name.clone();
	let (data_type, target_position) = (target.data_type, target.position);
	let one = Expression::literal(LiteralValue::Int(1), position);
	let value = Expression::binary(target, operator, one, data_type);
	Ok(Expression::assign(name, value, data_type, target_position))
}

fn check_type(expected: DataType, expression: &Expression) -> Result<(), ParseError> {
	if expected.matches(expression.data_type) { Ok(()) } else { Err(mismatch(expected, expression)) }
}

fn mismatch(expected: DataType, expression: &Expression) -> ParseError {
	ParseError::new(expression.position, ParseErrorType::TypeMismatch { expected, found: expression.data_type })
}
