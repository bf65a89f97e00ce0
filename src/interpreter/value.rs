use std::{cmp::Ordering, fmt::Display};

use Value::*;

use crate::{error::interpreter::RuntimeError, parser::expression::{BinaryOperator, LiteralValue}, types::DataType};

/// Value represents a runtime value in Bisaya++.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Int(i64),
	Float(f64),
	Char(char),
	Bool(bool),
	Text(String),
	Empty,
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Int(n) => write!(f, "{n}"),
			Float(n) => {
				if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
					write!(f, "{}", *n as i64)
				} else {
					write!(f, "{n}")
				}
			}
			Char('\0') => Ok(()),
			Char(c) => write!(f, "{c}"),
			Bool(true) => write!(f, "OO"),
			Bool(false) => write!(f, "DILI"),
			Text(s) => write!(f, "{s}"),
			Empty => Ok(()),
		}
	}
}

impl From<&LiteralValue> for Value {
	fn from(literal: &LiteralValue) -> Self {
		match literal {
			LiteralValue::Int(n) => Int(*n),
			LiteralValue::Float(n) => Float(*n),
			LiteralValue::Char(c) => Char(*c),
			LiteralValue::Text(s) => Text(s.clone()),
			LiteralValue::Bool(b) => Bool(*b),
		}
	}
}

impl Value {
	/// Initial value of a declared variable without initializer.
	pub fn default_for(data_type: DataType) -> Self {
		match data_type {
			DataType::Int => Int(0),
			DataType::Float => Float(0.0),
			DataType::Char => Char('\0'),
			DataType::Bool => Bool(false),
			DataType::Text => Text(String::new()),
			DataType::Empty => Empty,
		}
	}

	pub fn data_type(&self) -> DataType {
		match self {
			Int(_) => DataType::Int,
			Float(_) => DataType::Float,
			Char(_) => DataType::Char,
			Bool(_) => DataType::Bool,
			Text(_) => DataType::Text,
			Empty => DataType::Empty,
		}
	}

	/// Performs a binary operation between two values.
	pub fn binary_op(&self, operator: BinaryOperator, right: &Self) -> Result<Value, RuntimeError> {
		use BinaryOperator::*;

		let invalid = || self.invalid(operator, right);
		let value = match operator {
			Add => self.arithmetic(right, "addition", i64::checked_add, |l, r| l + r).ok_or_else(invalid)??,
			Subtract => self.arithmetic(right, "subtraction", i64::checked_sub, |l, r| l - r).ok_or_else(invalid)??,
			Multiply => {
				self.arithmetic(right, "multiplication", i64::checked_mul, |l, r| l * r).ok_or_else(invalid)??
			}
			Divide => {
				Self::check_divisor(right)?;
				self.arithmetic(right, "division", i64::checked_div, |l, r| l / r).ok_or_else(invalid)??
			}
			Modulo => {
				Self::check_divisor(right)?;
				self.arithmetic(right, "modulo", i64::checked_rem, |l, r| l % r).ok_or_else(invalid)??
			}
			Equal => Bool(self.equal(right).ok_or_else(invalid)?),
			NotEqual => Bool(!self.equal(right).ok_or_else(invalid)?),
			Greater => Bool(self.compare(right).ok_or_else(invalid)?.is_gt()),
			GreaterEqual => Bool(self.compare(right).ok_or_else(invalid)?.is_ge()),
			Less => Bool(self.compare(right).ok_or_else(invalid)?.is_lt()),
			LessEqual => Bool(self.compare(right).ok_or_else(invalid)?.is_le()),
			And => Bool(self.as_bool()? & right.as_bool()?),
			Or => Bool(self.as_bool()? | right.as_bool()?),
		};
		Ok(value)
	}

	/// Logical `DILI`.
	pub fn not(&self) -> Result<Value, RuntimeError> {
		match self {
			Bool(b) => Ok(Bool(!b)),
			_ => Err(RuntimeError::InvalidUnaryOperation { operator: "DILI", operand: self.data_type() }),
		}
	}

	pub fn as_bool(&self) -> Result<bool, RuntimeError> {
		match self {
			Bool(b) => Ok(*b),
			_ => Err(RuntimeError::InvalidUnaryOperation { operator: "condition", operand: self.data_type() }),
		}
	}

	/// Integer arithmetic when both sides are `Int`, float arithmetic when
	/// either side is `Float`, `None` for anything else.
	fn arithmetic(
		&self,
		right: &Self,
		name: &'static str,
		int_op: fn(i64, i64) -> Option<i64>,
		float_op: fn(f64, f64) -> f64,
	) -> Option<Result<Value, RuntimeError>> {
		match (self, right) {
			(Int(l), Int(r)) => Some(int_op(*l, *r).map(Int).ok_or(RuntimeError::Overflow(name))),
			_ => Some(Ok(Float(float_op(self.as_f64()?, right.as_f64()?)))),
		}
	}

	fn check_divisor(right: &Self) -> Result<(), RuntimeError> {
		match right {
			Int(0) => Err(RuntimeError::DivisionByZero),
			Float(r) if *r == 0.0 => Err(RuntimeError::DivisionByZero),
			_ => Ok(()),
		}
	}

	fn equal(&self, other: &Self) -> Option<bool> {
		match (self, other) {
			(Int(l), Int(r)) => Some(l == r),
			(Char(l), Char(r)) => Some(l == r),
			(Bool(l), Bool(r)) => Some(l == r),
			(Text(l), Text(r)) => Some(l == r),
			(Empty, Empty) => Some(true),
			_ => Some(self.as_f64()? == other.as_f64()?),
		}
	}

	fn compare(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Int(l), Int(r)) => Some(l.cmp(r)),
			(Char(l), Char(r)) => Some(l.cmp(r)),
			_ => self.as_f64()?.partial_cmp(&other.as_f64()?),
		}
	}

	fn as_f64(&self) -> Option<f64> {
		match self {
			Int(n) => Some(*n as f64),
			Float(n) => Some(*n),
			_ => None,
		}
	}

	fn invalid(&self, operator: BinaryOperator, right: &Self) -> RuntimeError {
		RuntimeError::InvalidOperation { operator: operator.lexeme(), left: self.data_type(), right: right.data_type() }
	}
}

/// Truncate toward zero, `None` when the result does not fit an `i64`.
pub fn float_to_int(n: f64) -> Option<i64> {
	let n = n.trunc();
	(n >= i64::MIN as f64 && n < i64::MAX as f64).then_some(n as i64)
}
