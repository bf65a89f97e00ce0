use std::collections::HashMap;

use crate::{
	error::interpreter::RuntimeError,
	interpreter::value::{Value, float_to_int},
	types::DataType,
};

/// A variable slot: its declared type and current value.
#[derive(Debug, Clone, PartialEq)]
struct Cell {
	data_type: DataType,
	value:     Value,
}

/// Runtime store of every declared variable.
///
/// Flat like the symbol table: blocks do not open scopes, and the store
/// outlives a single `interpret` call so REPL lines see earlier bindings.
#[derive(Default, Debug, Clone)]
pub struct Environment {
	variables: HashMap<String, Cell>,
}

impl Environment {
	pub fn new() -> Self { Self::default() }

	/// A declaration doesn't just create a variable, running it again (say in a
	/// loop body) rebinds the existing one.
	pub fn define(&mut self, name: &str, data_type: DataType, value: Value) -> Result<(), RuntimeError> {
		let value = coerce(name, data_type, value)?;
		tracing::debug!(name, %data_type, %value, "define variable");
		self.variables.insert(name.to_string(), Cell { data_type, value });
		Ok(())
	}

	pub fn get(&self, name: &str) -> Result<&Value, RuntimeError> {
		self.variables.get(name).map(|cell| &cell.value).ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
	}

	pub fn data_type(&self, name: &str) -> Option<DataType> { self.variables.get(name).map(|cell| cell.data_type) }

	/// Assign a value to an existing variable, returning the stored value.
	pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, RuntimeError> {
		let cell = self.variables.get_mut(name).ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))?;
		cell.value = coerce(name, cell.data_type, value)?;
		Ok(cell.value.clone())
	}

	pub fn len(&self) -> usize { self.variables.len() }

	pub fn is_empty(&self) -> bool { self.variables.is_empty() }
}

/// Fit a value into a cell of `data_type`: floats are truncated into `INT`
/// cells and integers widened into `TIPIK` cells. A float outside the `i64`
/// range is an overflow.
fn coerce(name: &str, data_type: DataType, value: Value) -> Result<Value, RuntimeError> {
	match (data_type, value) {
		(DataType::Int, Value::Float(n)) => float_to_int(n).map(Value::Int).ok_or(RuntimeError::Overflow("conversion")),
		(DataType::Float, Value::Int(n)) => Ok(Value::Float(n as f64)),
		(data_type, value) if value.data_type() == data_type => Ok(value),
		(expected, value) => {
			Err(RuntimeError::TypeMismatch { name: name.to_string(), expected, found: value.data_type() })
		}
	}
}
