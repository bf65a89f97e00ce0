use std::fmt::Display;

/// Where a token starts in the source, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
	pub line:   usize,
	pub column: usize,
}

impl Position {
	pub fn new(line: usize, column: usize) -> Self { Self { line, column } }
}

impl Display for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}, column {}", self.line, self.column)
	}
}

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
	pub r#type:   TokenType<'a>,
	pub lexeme:   &'a str,
	pub position: Position,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType<'a>, lexeme: &'a str, position: Position) -> Self {
		Self { r#type, lexeme, position }
	}
}

/// The different kinds of tokens, keywords already resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType<'a> {
	/// New line `\n`, statements end here.
	NewLine,
	/// Skipped whitespace: ` `, `\r`, `\t`.
	EmptyChar,
	/// Comment `-- ...`
	Comment,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Comma `,`.
	Comma,
	/// Colon `:`.
	Colon,
	/// Output concatenation `&`.
	Ampersand,
	/// Carriage return literal `$`.
	CarriageReturn,
	Plus,
	Minus,
	Star,
	Slash,
	Percent,
	/// Increment `++`.
	PlusPlus,
	/// Decrement `--`, only directly after an identifier.
	MinusMinus,
	/// Assignment `=`.
	Equal,
	EqualEqual,
	/// Not equal `<>`.
	NotEqual,
	Greater,
	GreaterEqual,
	Less,
	LessEqual,
	Identifier(&'a str),
	/// Double quoted text, quotes stripped.
	StringLiteral(&'a str),
	IntLiteral(i64),
	FloatLiteral(f64),
	/// Single quoted character `'a'`.
	CharLiteral(char),
	/// Bracket escaped character `[&]`.
	EscapedChar(char),
	/// `OO`, `"OO"` or `"DILI"`.
	BoolLiteral(bool),
	/// Program start `SUGOD`.
	Sugod,
	/// Program end `KATAPUSAN`.
	Katapusan,
	/// Declaration `MUGNA`.
	Mugna,
	/// One of `NUMERO`, `TIPIK`, `LETRA`, `TINUOD`.
	TypeName,
	/// Input `DAWAT`.
	Dawat,
	/// Output `IPAKITA`.
	Ipakita,
	/// If `KUNG`.
	Kung,
	/// Else, in `KUNG WALA`.
	Wala,
	/// Block `PUNDOK`.
	Pundok,
	/// For loop, first half of `ALANG SA`.
	Alang,
	/// For loop, second half of `ALANG SA`.
	Sa,
	/// Logical AND `UG`.
	Ug,
	/// Logical OR `O`.
	O,
	/// Logical NOT `DILI`, also else-if in `KUNG DILI`.
	Dili,
	/// End of input.
	Eof,
}

impl<'a> TokenType<'a> {
	pub fn is_ignored(&self) -> bool { matches!(self, TokenType::EmptyChar | TokenType::Comment) }

	pub fn keyword_or_identifier(value: &'a str) -> Self {
		match value {
			"SUGOD" => TokenType::Sugod,
			"KATAPUSAN" => TokenType::Katapusan,
			"MUGNA" => TokenType::Mugna,
			"NUMERO" | "TIPIK" | "LETRA" | "TINUOD" => TokenType::TypeName,
			"DAWAT" => TokenType::Dawat,
			"IPAKITA" => TokenType::Ipakita,
			"KUNG" => TokenType::Kung,
			"WALA" => TokenType::Wala,
			"PUNDOK" => TokenType::Pundok,
			"ALANG" => TokenType::Alang,
			"SA" => TokenType::Sa,
			"UG" => TokenType::Ug,
			"O" => TokenType::O,
			"DILI" => TokenType::Dili,
			"OO" => TokenType::BoolLiteral(true),
			_ => TokenType::Identifier(value),
		}
	}
}
