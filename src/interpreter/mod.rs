//! Bisaya++ tree-walking interpreter.
//!
//! The interpreter walks the typed AST produced by the parser and trusts it:
//! types were checked statically, so the only values that can still be wrong
//! at runtime are the ones typed in by the user through `DAWAT`.
//!
//! # Statements
//!
//! - **MUGNA**: bind each name to its initializer or the type's default
//! - **DAWAT**: read one line, split on commas, convert each field
//! - **IPAKITA**: render each item and append it to the output buffer
//! - **KUNG**: first arm whose condition holds, else `KUNG WALA`
//! - **ALANG SA**: init once, then condition, body, update
//!
//! `UG` and `O` always evaluate both operands.

pub mod input;
pub mod value;

use ExpressionKind::*;
use input::{LineSource, StdinLines};
use value::{Value, float_to_int};

use crate::{environment::Environment, error::interpreter::RuntimeError, parser::expression::{Expression, ExpressionKind, UnaryOperator}, scanner::Position, statement::{Program, Statement}, types::DataType};

/// Interpreter that executes Bisaya++ programs.
pub struct Interpreter {
	environment: Environment,
	/// Rendered `IPAKITA` output of the current call
	output:      String,
	input:       Box<dyn LineSource>,
}

impl Default for Interpreter {
	fn default() -> Self { Self::new(StdinLines) }
}

impl Interpreter {
	pub fn new(input: impl LineSource + 'static) -> Self {
		Self { environment: Environment::new(), output: String::new(), input: Box::new(input) }
	}

	pub fn environment(&self) -> &Environment { &self.environment }

	/// Run a program and return everything it printed.
	///
	/// Variables persist across calls. On error the partial output is dropped,
	/// assignments made before the failure are kept.
	pub fn interpret(&mut self, program: &Program) -> Result<String, RuntimeError> {
		self.output.clear();
		let result = self.execute_all(&program.body);
		let output = std::mem::take(&mut self.output);
		result?;
		tracing::debug!(bytes = output.len(), variables = self.environment.len(), "interpreted program");
		Ok(output)
	}

	/// Each statement list gets its own loop, nested blocks never share it.
	fn execute_all(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
		for statement in statements {
			self.execute(statement)?;
		}
		Ok(())
	}

	fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
		match statement {
			Statement::VarDeclaration { data_type, bindings } => {
				for binding in bindings {
					let value = match &binding.initializer {
						Some(initializer) => self.evaluate(initializer)?,
						None => Value::default_for(*data_type),
					};
					self.environment.define(&binding.name, *data_type, value)?;
				}
			}
			Statement::Input { targets, position } => self.read_input(targets, *position)?,
			Statement::Output(items) => {
				for item in items {
					let value = self.evaluate(item)?;
					self.output.push_str(&value.to_string());
				}
			}
			Statement::If { condition, then_block, else_ifs, else_block } => {
				if self.condition(condition)? {
					return self.execute_all(&then_block.body);
				}
				for else_if in else_ifs {
					if self.condition(&else_if.condition)? {
						return self.execute_all(&else_if.block.body);
					}
				}
				if let Some(else_block) = else_block {
					self.execute_all(&else_block.body)?;
				}
			}
			Statement::For { init, condition, increment, body } => {
				self.evaluate(init)?;
				let mut iterations = 0usize;
				while self.condition(condition)? {
					self.execute_all(&body.body)?;
					self.evaluate(increment)?;
					iterations += 1;
				}
				tracing::trace!(iterations, "loop finished");
			}
			Statement::Block(block) => self.execute_all(&block.body)?,
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
		}
		Ok(())
	}

	fn condition(&mut self, condition: &Expression) -> Result<bool, RuntimeError> { self.evaluate(condition)?.as_bool() }

	fn evaluate(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
		match &expression.kind {
			Literal(literal) => Ok(Value::from(literal)),
			Identifier(name) => self.environment.get(name).cloned(),
			Assign { target, value } => {
				let value = self.evaluate(value)?;
				self.environment.assign(target, value)
			}
			Binary { left, operator, right } => {
				let left = self.evaluate(left)?;
				let right = self.evaluate(right)?;
				left.binary_op(*operator, &right)
			}
			Unary { operator: UnaryOperator::Not, operand } => self.evaluate(operand)?.not(),
			Empty => Ok(Value::Empty),
		}
	}

	fn read_input(&mut self, targets: &[String], position: Position) -> Result<(), RuntimeError> {
		let line = self.input.next_line()?;
		tracing::trace!(%line, "read input");
		let fields: Vec<&str> = line.split(',').map(str::trim).collect();
		if fields.len() < targets.len() {
			return Err(RuntimeError::InputLength { position, expected: targets.len(), found: fields.len() });
		}
		for (name, field) in targets.iter().zip(fields) {
			let data_type = self.environment.data_type(name).ok_or_else(|| RuntimeError::UndefinedVariable(name.clone()))?;
			let value = convert_field(name, field, data_type, position)?;
			self.environment.assign(name, value)?;
		}
		Ok(())
	}
}

/// Convert one input field to a value of the target variable's type.
fn convert_field(name: &str, field: &str, data_type: DataType, position: Position) -> Result<Value, RuntimeError> {
	let invalid =
		|| RuntimeError::InvalidInput { position, name: name.to_string(), expected: data_type, field: field.to_string() };
	match data_type {
		DataType::Int => match field.parse::<i64>() {
			Ok(n) => Ok(Value::Int(n)),
			Err(_) => field.parse::<f64>().ok().and_then(float_to_int).map(Value::Int).ok_or_else(invalid),
		},
		DataType::Float => {
			field.parse::<f64>().ok().filter(|n| n.is_finite()).map(Value::Float).ok_or_else(invalid)
		}
		DataType::Char => {
			let mut chars = field.chars();
			match (chars.next(), chars.next()) {
				(Some(c), None) => Ok(Value::Char(c)),
				_ => Err(RuntimeError::InputLength { position, expected: 1, found: field.chars().count() }),
			}
		}
		DataType::Bool => match field {
			"OO" => Ok(Value::Bool(true)),
			"DILI" => Ok(Value::Bool(false)),
			_ => Err(invalid()),
		},
		DataType::Text | DataType::Empty => Err(invalid()),
	}
}

#[cfg(test)]
mod tests {
	use indoc::indoc;

	use super::*;
	use crate::{
		interpreter::input::ScriptedLines,
		parser::{ParseMode, Parser},
		scanner::Scanner,
	};

	fn parse(parser: &mut Parser, source: &str, mode: ParseMode) -> Program {
		let tokens = Scanner::new(source).scan_tokens().unwrap();
		parser.parse(tokens, mode).unwrap()
	}

	fn run_with(source: &str, lines: &[&str]) -> Result<String, RuntimeError> {
		let program = parse(&mut Parser::new(), source, ParseMode::Program);
		Interpreter::new(ScriptedLines::new(lines.iter().copied())).interpret(&program)
	}

	fn run(source: &str) -> String { run_with(source, &[]).unwrap() }

	#[test]
	fn output_concatenates() {
		let source = indoc! {r#"
			SUGOD
				MUGNA NUMERO x, y, z=5
				MUGNA LETRA a_1='n'
				MUGNA TINUOD t="OO"
				x=y=4
				a_1='c'
				-- this is a comment
				IPAKITA: x & t & z & $ & a_1 & [#] & "last"
			KATAPUSAN
		"#};
		assert_eq!(run(source), "4OO5\nc#last");
	}

	#[test]
	fn arithmetic_and_logic() {
		let source = indoc! {r#"
			SUGOD
				MUGNA NUMERO xyz, abc=100
				xyz= ((abc *5)/10 + 10) * -1
				IPAKITA: [[] & xyz & []]
				MUGNA NUMERO a=100, b=200, c=300
				MUGNA TINUOD d="DILI"
				d = (a < b UG c <> 200)
				IPAKITA: d
			KATAPUSAN
		"#};
		assert_eq!(run(source), "[-60]OO");
	}

	#[test]
	fn defaults_render() {
		let source = "SUGOD\nMUGNA NUMERO n\nMUGNA TIPIK f\nMUGNA LETRA c\nMUGNA TINUOD t\nIPAKITA: n & \",\" & f & \",\" & c & \",\" & t\nKATAPUSAN";
		assert_eq!(run(source), "0,0,,DILI");
	}

	#[test]
	fn floats_and_truncation() {
		let source = indoc! {"
			SUGOD
				MUGNA TIPIK f = 7
				MUGNA NUMERO n = 3.9
				IPAKITA: f / 2 & \" \" & n & \" \" & f * 2 & \" \" & 7 / 2
			KATAPUSAN
		"};
		assert_eq!(run(source), "3.5 3 14 3");
	}

	#[test]
	fn if_chain_picks_first_match() {
		let source = indoc! {"
			SUGOD
				MUGNA NUMERO a = 3
				KUNG (a > 5) PUNDOK{
					IPAKITA: \"big\"
				}
				KUNG DILI (a > 1) PUNDOK{
					IPAKITA: \"medium\"
				}
				KUNG DILI (a > 0) PUNDOK{
					IPAKITA: \"small\"
				}
				KUNG WALA PUNDOK{
					IPAKITA: \"none\"
				}
			KATAPUSAN
		"};
		assert_eq!(run(source), "medium");
		assert_eq!(run(&source.replace("a = 3", "a = -3")), "none");
	}

	#[test]
	fn for_loop_with_nested_blocks() {
		let source = indoc! {"
			SUGOD
				MUGNA NUMERO i, j, sum = 0
				ALANG SA (i = 1, i <= 3, i++)
				PUNDOK{
					ALANG SA (j = 1, j <= i, j++)
					PUNDOK{
						KUNG (j == i) PUNDOK{
							IPAKITA: i & \";\"
						}
						sum = sum + j
					}
				}
				IPAKITA: sum
			KATAPUSAN
		"};
		assert_eq!(run(source), "1;2;3;10");
	}

	#[test]
	fn loop_condition_checked_first() {
		let source = "SUGOD\nMUGNA NUMERO i\nALANG SA (i = 5, i < 5, i++) PUNDOK{\nIPAKITA: \"never\"\n}\nIPAKITA: i\nKATAPUSAN";
		assert_eq!(run(source), "5");
	}

	#[test]
	fn declaration_in_loop_rebinds() {
		let source = indoc! {"
			SUGOD
				MUGNA NUMERO i
				ALANG SA (i = 0, i < 3, i++) PUNDOK{
					MUGNA NUMERO square = i * i
					IPAKITA: square & \" \"
				}
				IPAKITA: square
			KATAPUSAN
		"};
		assert_eq!(run(source), "0 1 4 4");
	}

	#[test]
	fn logic_has_no_short_circuit() {
		let source = indoc! {"
			SUGOD
				MUGNA NUMERO n = 0
				MUGNA TINUOD t
				t = (n > 100) UG ((n = n + 1) > 0)
				t = (n == 1) O ((n = n + 10) > 0)
				IPAKITA: n & \" \" & t
			KATAPUSAN
		"};
		assert_eq!(run(source), "11 OO");
	}

	#[test]
	fn increment_and_decrement() {
		let source = "SUGOD\nMUGNA NUMERO a = 5\na++\na++\na--\n++a\nMUGNA TIPIK f = 0.5\nf++\nIPAKITA: a & \" \" & f\nKATAPUSAN";
		assert_eq!(run(source), "7 1.5");
	}

	#[test]
	fn input_statement() {
		let source = indoc! {"
			SUGOD
				MUGNA NUMERO a, b
				MUGNA TIPIK f
				MUGNA LETRA c
				MUGNA TINUOD t
				DAWAT: a, b
				DAWAT: f, c, t
				IPAKITA: a + b & \" \" & f & c & t
			KATAPUSAN
		"};
		assert_eq!(run_with(source, &["10, 20", " 2.5 ,x,OO"]).unwrap(), "30 2.5xOO");
		assert_eq!(run_with(source, &["7.9,1,extra", "1,y,DILI"]).unwrap(), "8 1yDILI");
	}

	#[test]
	fn input_errors() {
		let source = "SUGOD\nMUGNA NUMERO x, y\nDAWAT: x, y\nKATAPUSAN";
		assert!(matches!(run_with(source, &["not-a-number, 1"]), Err(RuntimeError::InvalidInput {
			expected: DataType::Int,
			..
		})));
		assert!(matches!(run_with(source, &["1"]), Err(RuntimeError::InputLength { expected: 2, found: 1, .. })));
		assert!(matches!(run_with(source, &[]), Err(RuntimeError::ReadInput(_))));
		assert!(matches!(run_with(source, &["99999999999999999999, 1"]), Err(RuntimeError::InvalidInput {
			expected: DataType::Int,
			..
		})));
		assert!(matches!(run_with(source, &["1, -1e19"]), Err(RuntimeError::InvalidInput { .. })));

		let letter = "SUGOD\nMUGNA LETRA c\nDAWAT: c\nKATAPUSAN";
		assert!(matches!(run_with(letter, &["ab"]), Err(RuntimeError::InputLength { expected: 1, found: 2, .. })));
		let truth = "SUGOD\nMUGNA TINUOD t\nDAWAT: t\nKATAPUSAN";
		assert!(matches!(run_with(truth, &["yes"]), Err(RuntimeError::InvalidInput { .. })));
	}

	#[test]
	fn runtime_error_drops_output() {
		let source = "SUGOD\nMUGNA NUMERO z = 0\nIPAKITA: \"before\"\nz = 1 / z\nKATAPUSAN";
		assert!(matches!(run_with(source, &[]), Err(RuntimeError::DivisionByZero)));
	}

	#[test]
	fn repl_keeps_state() {
		let mut parser = Parser::new();
		let mut interpreter = Interpreter::new(ScriptedLines::default());
		let first = parse(&mut parser, "MUGNA NUMERO x = 42\n", ParseMode::Repl);
		assert_eq!(interpreter.interpret(&first).unwrap(), "");
		let second = parse(&mut parser, "IPAKITA: x\n", ParseMode::Repl);
		assert_eq!(interpreter.interpret(&second).unwrap(), "42");
		let third = parse(&mut parser, "x = x / 0\n", ParseMode::Repl);
		assert!(interpreter.interpret(&third).is_err());
		assert_eq!(interpreter.environment().get("x").unwrap(), &Value::Int(42));
		assert_eq!(interpreter.interpret(&second).unwrap(), "42");
	}
}
