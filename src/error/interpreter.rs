use crate::{scanner::Position, types::DataType};

/// Errors that can occur during interpretation
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
	/// Variable without a runtime cell
	#[error("Variable '{0}' is not defined")]
	UndefinedVariable(String),
	/// Value that cannot be stored in the target cell
	#[error("Type mismatch: cannot store {found} in {expected} variable '{name}'")]
	TypeMismatch { name: String, expected: DataType, found: DataType },
	/// Operator applied to values it does not support
	#[error("Invalid operation: {left} {operator} {right}")]
	InvalidOperation { operator: &'static str, left: DataType, right: DataType },
	/// Invalid unary operations
	#[error("Invalid unary operation: {operator} {operand}")]
	InvalidUnaryOperation { operator: &'static str, operand: DataType },
	/// Integer or float division or modulo by zero
	#[error("Cannot divide by zero")]
	DivisionByZero,
	/// Integer result out of range
	#[error("Integer overflow in {0}")]
	Overflow(&'static str),
	/// Input field that does not convert to the target type
	#[error("{position}: Invalid input '{field}' for {expected} variable '{name}'")]
	InvalidInput { position: Position, name: String, expected: DataType, field: String },
	/// Input line with too few fields, or a LETRA field that is not one character
	#[error("{position}: Invalid input length: expected {expected}, got {found}")]
	InputLength { position: Position, expected: usize, found: usize },
	/// The line source failed or ran dry
	#[error("Failed read input: {0}")]
	ReadInput(#[from] anyhow::Error),
}
