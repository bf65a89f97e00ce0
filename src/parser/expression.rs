//! Expression AST nodes
//!
//! Every node carries the type the parser resolved for it, so the interpreter
//! never has to infer anything. Sugar is gone by the time a tree exists:
//! `-x` is `(- 0 x)`, `x++` is `(= x (+ x 1))`.

use std::fmt::Display;

use ExpressionKind::*;

use crate::{scanner::Position, types::DataType};

/// A typed expression with the position of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
	pub kind:      ExpressionKind,
	pub data_type: DataType,
	pub position:  Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
	/// Store into a variable, yielding the stored value.
	Assign { target: String, value: Box<Expression> },
	Binary { left: Box<Expression>, operator: BinaryOperator, right: Box<Expression> },
	Unary { operator: UnaryOperator, operand: Box<Expression> },
	Identifier(String),
	Literal(LiteralValue),
	/// A line ended where an expression was expected.
	Empty,
}

impl Expression {
	pub fn assign(target: String, value: Expression, data_type: DataType, position: Position) -> Self {
		Self { kind: Assign { target, value: Box::new(value) }, data_type, position }
	}

	pub fn binary(left: Expression, operator: BinaryOperator, right: Expression, data_type: DataType) -> Self {
		let position = left.position;
		Self { kind: Binary { left: Box::new(left), operator, right: Box::new(right) }, data_type, position }
	}

	pub fn unary(operator: UnaryOperator, operand: Expression, position: Position) -> Self {
		let data_type = operand.data_type;
		Self { kind: Unary { operator, operand: Box::new(operand) }, data_type, position }
	}

	pub fn identifier(name: &str, data_type: DataType, position: Position) -> Self {
		Self { kind: Identifier(name.to_string()), data_type, position }
	}

	pub fn literal(value: LiteralValue, position: Position) -> Self {
		Self { data_type: value.data_type(), kind: Literal(value), position }
	}

	pub fn empty(position: Position) -> Self { Self { kind: Empty, data_type: DataType::Empty, position } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
	Add,
	Subtract,
	Multiply,
	Divide,
	Modulo,
	Greater,
	GreaterEqual,
	Less,
	LessEqual,
	Equal,
	NotEqual,
	And,
	Or,
}

impl BinaryOperator {
	pub fn lexeme(self) -> &'static str {
		use BinaryOperator::*;
		match self {
			Add => "+",
			Subtract => "-",
			Multiply => "*",
			Divide => "/",
			Modulo => "%",
			Greater => ">",
			GreaterEqual => ">=",
			Less => "<",
			LessEqual => "<=",
			Equal => "==",
			NotEqual => "<>",
			And => "UG",
			Or => "O",
		}
	}

	pub fn is_arithmetic(self) -> bool {
		use BinaryOperator::*;
		matches!(self, Add | Subtract | Multiply | Divide | Modulo)
	}

	pub fn is_ordering(self) -> bool {
		use BinaryOperator::*;
		matches!(self, Greater | GreaterEqual | Less | LessEqual)
	}

	pub fn is_logical(self) -> bool { matches!(self, BinaryOperator::And | BinaryOperator::Or) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
	/// `DILI`
	Not,
}

impl UnaryOperator {
	pub fn lexeme(self) -> &'static str {
		match self {
			UnaryOperator::Not => "DILI",
		}
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
	Int(i64),
	Float(f64),
	Char(char),
	Text(String),
	Bool(bool),
}

impl LiteralValue {
	pub fn data_type(&self) -> DataType {
		match self {
			LiteralValue::Int(_) => DataType::Int,
			LiteralValue::Float(_) => DataType::Float,
			LiteralValue::Char(_) => DataType::Char,
			LiteralValue::Text(_) => DataType::Text,
			LiteralValue::Bool(_) => DataType::Bool,
		}
	}
}

impl Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			Literal(lit) => write!(f, "{lit}"),
			Identifier(name) => write!(f, "{name}"),
			Unary { operator, operand } => write!(f, "({} {operand})", operator.lexeme()),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme()),
			Assign { target, value } => write!(f, "(= {target} {value})"),
			Empty => write!(f, "<empty>"),
		}
	}
}

impl Display for LiteralValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LiteralValue::Int(n) => write!(f, "{n}"),
			LiteralValue::Float(n) => write!(f, "{n:?}"),
			LiteralValue::Char(c) => write!(f, "{c:?}"),
			LiteralValue::Text(s) => write!(f, "\"{s}\""),
			LiteralValue::Bool(true) => write!(f, "\"OO\""),
			LiteralValue::Bool(false) => write!(f, "\"DILI\""),
		}
	}
}
