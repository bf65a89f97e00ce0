//! Statements and the program root.
//!
//! Blocks only group statements for control flow. Declarations inside a
//! `PUNDOK` land in the same flat namespace as everything else.

use crate::{parser::expression::Expression, scanner::Position, types::DataType};

/// The root of a parsed program or REPL line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
	pub body: Vec<Statement>,
}

/// The statements between `PUNDOK {` and `}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
	pub body: Vec<Statement>,
}

/// One `name [= initializer]` of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
	pub name:        String,
	pub initializer: Option<Expression>,
}

/// A `KUNG DILI (condition) PUNDOK { ... }` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
	pub condition: Expression,
	pub block:     Block,
}

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// `MUGNA <type> a, b = 1`
	VarDeclaration { data_type: DataType, bindings: Vec<Binding> },
	/// `DAWAT: a, b`, position of the `DAWAT` keyword for input errors.
	Input { targets: Vec<String>, position: Position },
	/// `IPAKITA: a & b`
	Output(Vec<Expression>),
	If {
		condition:  Expression,
		then_block: Block,
		else_ifs:   Vec<ElseIf>,
		else_block: Option<Block>,
	},
	/// `ALANG SA (init, condition, increment) PUNDOK { ... }`
	For {
		init:      Expression,
		condition: Expression,
		increment: Expression,
		body:      Block,
	},
	/// A bare `PUNDOK { ... }`.
	Block(Block),
	/// An expression used as a statement.
	Expression(Expression),
}
