//! The closed set of static types.
//!
//! Four of them can be named in a `MUGNA` declaration. `Text` only exists for
//! string literals and `Empty` marks the placeholder expression left behind by
//! a line that ends where an expression was expected.

use std::fmt::Display;

/// Statically resolved type of an expression or a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
	/// `NUMERO`
	Int,
	/// `TIPIK`
	Float,
	/// `LETRA`
	Char,
	/// `TINUOD`
	Bool,
	/// String literals, never declarable.
	Text,
	/// Blank placeholder.
	Empty,
}

impl DataType {
	/// Map a declared type keyword to its type.
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		Some(match keyword {
			"NUMERO" => DataType::Int,
			"TIPIK" => DataType::Float,
			"LETRA" => DataType::Char,
			"TINUOD" => DataType::Bool,
			_ => return None,
		})
	}

	pub fn is_numeric(self) -> bool { matches!(self, DataType::Int | DataType::Float) }

	/// Two types agree if they are identical or both numeric. Mixed numeric
	/// operands are promoted to `Float` when evaluated.
	pub fn matches(self, other: Self) -> bool { self == other || (self.is_numeric() && other.is_numeric()) }

	/// Result type of an arithmetic operator over two numeric operands.
	pub fn promote(self, other: Self) -> Self {
		if self == DataType::Float || other == DataType::Float { DataType::Float } else { DataType::Int }
	}
}

impl Display for DataType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			DataType::Int => "NUMERO",
			DataType::Float => "TIPIK",
			DataType::Char => "LETRA",
			DataType::Bool => "TINUOD",
			DataType::Text => "TEXT",
			DataType::Empty => "EMPTY",
		};
		write!(f, "{name}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn declarable_keywords() {
		assert_eq!(DataType::from_keyword("NUMERO"), Some(DataType::Int));
		assert_eq!(DataType::from_keyword("TIPIK"), Some(DataType::Float));
		assert_eq!(DataType::from_keyword("LETRA"), Some(DataType::Char));
		assert_eq!(DataType::from_keyword("TINUOD"), Some(DataType::Bool));
		assert_eq!(DataType::from_keyword("TEXT"), None);
		assert_eq!(DataType::from_keyword("numero"), None);
	}

	#[test]
	fn numeric_pair_is_compatible() {
		assert!(DataType::Int.matches(DataType::Float));
		assert!(DataType::Float.matches(DataType::Int));
		assert!(DataType::Char.matches(DataType::Char));
		assert!(!DataType::Char.matches(DataType::Int));
		assert!(!DataType::Bool.matches(DataType::Text));
	}

	#[test]
	fn promotion() {
		assert_eq!(DataType::Int.promote(DataType::Int), DataType::Int);
		assert_eq!(DataType::Int.promote(DataType::Float), DataType::Float);
		assert_eq!(DataType::Float.promote(DataType::Int), DataType::Float);
	}
}
