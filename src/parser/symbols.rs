use std::collections::HashMap;

use crate::types::DataType;

/// Declared type of every identifier seen so far.
///
/// There is a single flat namespace: a declaration inside a block is visible
/// after the block, and a name can only ever be declared once.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SymbolTable {
	symbols: HashMap<String, DataType>,
}

impl SymbolTable {
	pub fn new() -> Self { Self::default() }

	/// Register `name`, returning false if it was already declared.
	pub fn declare(&mut self, name: &str, data_type: DataType) -> bool {
		if self.symbols.contains_key(name) {
			return false;
		}
		self.symbols.insert(name.to_string(), data_type);
		true
	}

	pub fn resolve(&self, name: &str) -> Option<DataType> { self.symbols.get(name).copied() }

	pub fn is_declared(&self, name: &str) -> bool { self.symbols.contains_key(name) }

	/// Forget every name for which `keep` returns false.
	pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) { self.symbols.retain(|name, _| keep(name)) }

	pub fn len(&self) -> usize { self.symbols.len() }

	pub fn is_empty(&self) -> bool { self.symbols.is_empty() }
}
