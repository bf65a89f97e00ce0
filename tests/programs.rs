//! Whole programs through a `Session`.

use bisaya::{BisayaError, DataType, ParseErrorType, RuntimeError, ScriptedLines, Session};
use indoc::indoc;

fn run(source: &str) -> String { run_with(source, &[]).unwrap() }

fn run_with(source: &str, lines: &[&str]) -> Result<String, BisayaError> {
	Session::new(ScriptedLines::new(lines.iter().copied())).run(source)
}

fn parse_error(source: &str) -> ParseErrorType {
	match run_with(source, &[]) {
		Err(BisayaError::ParseError(error)) => error.r#type,
		other => panic!("expected a parse error, got {other:?}"),
	}
}

#[test]
fn output_determinism() {
	assert_eq!(run("SUGOD\nIPAKITA: 10 + 5\nKATAPUSAN"), "15");
	assert_eq!(run("SUGOD\nMUGNA NUMERO x = 42\nIPAKITA: x\nKATAPUSAN"), "42");
	assert_eq!(run("SUGOD\nMUGNA NUMERO x = 42\nIPAKITA: \"The answer is: \" & x\nKATAPUSAN"), "The answer is: 42");
}

#[test]
fn declare_before_use() {
	assert_eq!(parse_error("SUGOD\nIPAKITA: x\nMUGNA NUMERO x\nKATAPUSAN"), ParseErrorType::UnresolvedIdentifier(
		"x".to_string()
	));
	assert_eq!(run("SUGOD\nMUGNA NUMERO x\nIPAKITA: x\nKATAPUSAN"), "0");
	assert_eq!(run("SUGOD\nMUGNA NUMERO x=1, y=x+1\nIPAKITA: y\nKATAPUSAN"), "2");
}

#[test]
fn declare_once() {
	assert_eq!(parse_error("SUGOD\nMUGNA NUMERO x\nPUNDOK{\nMUGNA NUMERO x\n}\nKATAPUSAN"), ParseErrorType::DuplicateDeclaration(
		"x".to_string()
	));
}

#[test]
fn type_agreement() {
	assert_eq!(parse_error("SUGOD\nMUGNA TINUOD t = 1\nKATAPUSAN"), ParseErrorType::TypeMismatch {
		expected: DataType::Bool,
		found:    DataType::Int,
	});
	assert_eq!(parse_error("SUGOD\nMUGNA LETRA c\nMUGNA NUMERO n = c + 1\nKATAPUSAN"), ParseErrorType::TypeMismatch {
		expected: DataType::Int,
		found:    DataType::Char,
	});
}

#[test]
fn boolean_rendering() {
	let source = indoc! {r#"
		SUGOD
			MUGNA TINUOD a = "OO"
			MUGNA TINUOD b = "DILI"
			MUGNA TINUOD c = a UG b
			MUGNA TINUOD d = a O b
			IPAKITA: c & " " & d & " " & (DILI(a) == b)
		KATAPUSAN
	"#};
	assert_eq!(run(source), "DILI OO OO");
}

#[test]
fn loop_sum() {
	let source = indoc! {"
		SUGOD
			MUGNA NUMERO sum=0, i
			ALANG SA (i=1, i<=5, i++) PUNDOK{ sum=sum+i }
			IPAKITA: sum
		KATAPUSAN
	"};
	assert_eq!(run(source), "15");
}

#[test]
fn nested_conditions() {
	let source = indoc! {r#"
		SUGOD
			MUGNA NUMERO x = 7
			MUGNA NUMERO y = 3
			MUGNA NUMERO z = 10
			KUNG (x > 5) PUNDOK {
				KUNG (y < 5) PUNDOK {
					KUNG (z == 10) PUNDOK {
						IPAKITA: "Path 1"
					}
					KUNG WALA PUNDOK {
						IPAKITA: "Path 2"
					}
				}
				KUNG WALA PUNDOK {
					IPAKITA: "Path 3"
				}
			}
			KUNG WALA PUNDOK {
				IPAKITA: "Path 4"
			}
		KATAPUSAN
	"#};
	assert_eq!(run(source), "Path 1");
}

#[test]
fn fibonacci() {
	let source = indoc! {"
		SUGOD
			MUGNA NUMERO n = 10
			MUGNA NUMERO a = 0
			MUGNA NUMERO b = 1
			MUGNA NUMERO temp
			MUGNA NUMERO i = 1

			ALANG SA (i = 1, i < n, i++)
			PUNDOK {
				temp = a + b
				a = b
				b = temp
			}

			IPAKITA: b
		KATAPUSAN
	"};
	assert_eq!(run(source), "55");
}

#[test]
fn prime_check() {
	let source = indoc! {r#"
		SUGOD
			MUGNA NUMERO num = 17
			MUGNA TINUOD isPrime = "OO"
			MUGNA NUMERO i = 2

			KUNG (num <= 1) PUNDOK {
				isPrime = "DILI"
			}

			ALANG SA (i = 2, i * i <= num, i++)
			PUNDOK {
				KUNG (num % i == 0) PUNDOK {
					isPrime = "DILI"
				}
			}

			IPAKITA: isPrime
		KATAPUSAN
	"#};
	assert_eq!(run(source), "OO");
	assert_eq!(run(&source.replace("= 17", "= 91")), "DILI");
}

#[test]
fn fizzbuzz_with_input() {
	let source = indoc! {"
		SUGOD
			MUGNA NUMERO n
			DAWAT: n
			MUGNA NUMERO i = 1
			MUGNA NUMERO sum = 0

			ALANG SA (i = 1, i <= n, i++)
			PUNDOK {
				KUNG (i % 3 == 0 UG i % 5 == 0) PUNDOK {
					sum = sum + i
				}
				KUNG DILI (i % 3 == 0) PUNDOK {
					sum = sum + 1
				}
				KUNG DILI (i % 5 == 0) PUNDOK {
					sum = sum + 5
				}
			}

			IPAKITA: sum
		KATAPUSAN
	"};
	assert_eq!(run_with(source, &["15"]).unwrap(), "29");
}

#[test]
fn bubble_sort() {
	let source = indoc! {"
		SUGOD
			MUGNA NUMERO a = 5, b = 2, c = 8, d = 1, e = 9
			MUGNA NUMERO temp, i

			ALANG SA (i = 0, i < 4, i++)
			PUNDOK {
				-- a and b
				KUNG (a > b) PUNDOK {
					temp = a
					a = b
					b = temp
				}
				-- b and c
				KUNG (b > c) PUNDOK {
					temp = b
					b = c
					c = temp
				}
				-- c and d
				KUNG (c > d) PUNDOK {
					temp = c
					c = d
					d = temp
				}
				-- d and e
				KUNG (d > e) PUNDOK {
					temp = d
					d = e
					e = temp
				}
			}

			IPAKITA: a & \",\" & b & \",\" & c & \",\" & d & \",\" & e
		KATAPUSAN
	"};
	assert_eq!(run(source), "1,2,5,8,9");
}

#[test]
fn loops_with_expression_headers() {
	let gcd = indoc! {"
		SUGOD
			MUGNA NUMERO a = 48
			MUGNA NUMERO b = 18
			MUGNA NUMERO temp
			ALANG SA (b, b <> 0, b)
			PUNDOK {
				a = a % b
				temp = b
				b = a
				a = temp
			}
			IPAKITA: a
		KATAPUSAN
	"};
	assert_eq!(run(gcd), "6");

	let factors = indoc! {r#"
		SUGOD
			MUGNA NUMERO n = 84
			MUGNA NUMERO i = 2
			ALANG SA (i <= n, i <= n, i = i)
			PUNDOK {
				KUNG (n % i == 0) PUNDOK {
					IPAKITA: i & ","
					n = n / i
				}
				KUNG WALA PUNDOK {
					i = i + 1
				}
			}
		KATAPUSAN
	"#};
	assert_eq!(run(factors), "2,2,3,7,");

	let collatz = indoc! {"
		SUGOD
			MUGNA NUMERO n = 27
			MUGNA NUMERO steps = 0
			ALANG SA (n, n <> 1, n)
			PUNDOK {
				KUNG (n % 2 == 0) PUNDOK {
					n = n / 2
				}
				KUNG WALA PUNDOK {
					n = 3 * n + 1
				}
				steps = steps + 1
			}
			IPAKITA: steps
		KATAPUSAN
	"};
	assert_eq!(run(collatz), "111");
}

#[test]
fn armstrong_number() {
	let source = indoc! {r#"
		SUGOD
			MUGNA NUMERO num = 153
			MUGNA NUMERO original = num
			MUGNA NUMERO sum = 0
			MUGNA NUMERO digit

			ALANG SA (num, num > 0, num = num / 10)
			PUNDOK {
				digit = num % 10
				sum = sum + (digit * digit * digit)
			}

			IPAKITA: sum & $

			KUNG (sum == original) PUNDOK {
				IPAKITA: "OO"
			}
			KUNG WALA PUNDOK {
				IPAKITA: "DILI"
			}
		KATAPUSAN
	"#};
	assert_eq!(run(source), "153\nOO");
}

#[test]
fn expression_precedence() {
	let cases = [
		("2 + 3 * 4 - 8 / 2", "10"),
		("(2 + 3) * (4 - 1)", "15"),
		("10 - 5 - 3", "2"),
		("(2 + 3) * (4 - (1 + 1)) + 7", "17"),
		("2 + 3 * 4 % 5 - 6 / 3", "2"),
		("-(-(5 + 3))", "8"),
		("2 * -3 + 4 * -(1 + 2)", "-18"),
		("17 / 5", "3"),
		("17 % 5", "2"),
		("5.5 + 2.5 * 1.5 - 5.5 / 2.5", "7.05"),
		("10 > 5 UG 5 * 4 == 20", "OO"),
		("5 + 3 * 2 > 5 * 2 UG 3 < 5", "OO"),
	];
	for (expression, expected) in cases {
		let source = format!("SUGOD\nIPAKITA: {expression}\nKATAPUSAN");
		assert_eq!(run(&source), expected, "{expression}");
	}
}

#[test]
fn de_morgan() {
	let source = indoc! {r#"
		SUGOD
			MUGNA TINUOD p = "OO"
			MUGNA TINUOD q = "DILI"
			MUGNA TINUOD result1
			MUGNA TINUOD result2
			-- ¬(p ∧ q) ≡ ¬p ∨ ¬q
			result1 = DILI(p UG q)
			result2 = (DILI p) O (DILI q)
			IPAKITA: result1 == result2 & " " & DILI(DILI(p) UG DILI(q))
		KATAPUSAN
	"#};
	assert_eq!(run(source), "OO OO");
}

#[test]
fn input_validation() {
	let source = "SUGOD\nMUGNA NUMERO a, b\nDAWAT: a, b\nIPAKITA: a + b\nKATAPUSAN";
	assert_eq!(run_with(source, &["10, 20"]).unwrap(), "30");
	assert!(matches!(
		run_with(source, &["ten, 20"]),
		Err(BisayaError::RuntimeError(RuntimeError::InvalidInput { expected: DataType::Int, .. }))
	));
	assert!(matches!(
		run_with(source, &["10"]),
		Err(BisayaError::RuntimeError(RuntimeError::InputLength { expected: 2, found: 1, .. }))
	));
}

#[test]
fn division_by_zero_is_reported() {
	let source = "SUGOD\nMUGNA NUMERO a = 1, b\nIPAKITA: a / b\nKATAPUSAN";
	let error = run_with(source, &[]).unwrap_err();
	assert!(matches!(error, BisayaError::RuntimeError(RuntimeError::DivisionByZero)));
	assert_eq!(error.to_string(), "Runtime error: Cannot divide by zero");
}

#[test]
fn repl_persistence() {
	let mut session = Session::repl(ScriptedLines::default());
	assert_eq!(session.run("MUGNA NUMERO x = 42\n").unwrap(), "");
	assert!(session.run("MUGNA NUMERO y = oops\n").is_err());
	assert!(session.run("IPAKITA: y\n").is_err());
	assert_eq!(session.run("MUGNA NUMERO y = x + 1\n").unwrap(), "");
	assert_eq!(session.run("IPAKITA: x & \" \" & y\n").unwrap(), "42 43");

	assert!(matches!(
		session.run("MUGNA NUMERO z = 1 / 0\n"),
		Err(BisayaError::RuntimeError(RuntimeError::DivisionByZero))
	));
	assert!(matches!(session.run("IPAKITA: z\n"), Err(BisayaError::ParseError(_))));
	assert_eq!(session.run("MUGNA NUMERO z = 5\n").unwrap(), "");
	assert_eq!(session.run("z = z + 1\n").unwrap(), "");
	assert_eq!(session.run("IPAKITA: z\n").unwrap(), "6");
}

#[test]
fn out_of_range_integers_are_errors() {
	let stored = "SUGOD\nMUGNA NUMERO n = 10000000000.0 * 10000000000.0\nIPAKITA: n\nKATAPUSAN";
	assert!(matches!(run_with(stored, &[]), Err(BisayaError::RuntimeError(RuntimeError::Overflow(_)))));
	let read = "SUGOD\nMUGNA NUMERO n\nDAWAT: n\nIPAKITA: n\nKATAPUSAN";
	assert!(matches!(
		run_with(read, &["99999999999999999999"]),
		Err(BisayaError::RuntimeError(RuntimeError::InvalidInput { .. }))
	));
	assert_eq!(run_with(read, &["-42.7"]).unwrap(), "-42");
}

#[test]
fn scanner_errors_are_collected() {
	let error = run_with("SUGOD\nIPAKITA: 1 ? 2\nMUGNA LETRA c = ''\nKATAPUSAN", &[]).unwrap_err();
	let BisayaError::ScannerErrors(errors) = &error else { panic!("expected scanner errors, got {error:?}") };
	assert_eq!(errors.len(), 2);
	assert!(error.to_string().contains("line 2"));
}
