/// Lexical tokens shared by the path grammar and the filter/index expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Number with a fraction or exponent
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 1e3
    /// ```
    Float(f64),

    /// Number without a fraction
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// ```
    Integer(i64),

    /// Quoted string, single or double quotes
    ///
    /// # Examples
    /// ```text
    /// 'name'
    /// "it's"
    /// ''
    /// ```
    String(String),

    /// Bare name
    ///
    /// Starts with a letter or underscore, followed by letters, digits, or underscores.
    /// Keywords (`true`, `false`, `null`, `length`, `indexOf`) are identifiers at this level;
    /// the parser decides what they mean in context.
    Identifier(String),

    // References
    /// Root document reference (`$`)
    Dollar,

    /// Current value reference (`@`)
    At,

    // Path punctuation
    /// Child access (`.`)
    Dot,

    /// Recursive search (`..`)
    DotDot,

    /// Wildcard or multiplication (`*`)
    Star,

    /// Filter marker in `[?(...)]`
    Question,

    // Arithmetic
    Plus,
    Minus,
    Slash,
    Percent,
    /// Exponent (`^`)
    Caret,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,

    // Delimiters
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,

    /// End of input
    Eof,
}

impl Token {
    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Float(n) => format!("number {}", n),
            Token::Integer(n) => format!("integer {}", n),
            Token::String(s) => format!("string '{}'", s),
            Token::Identifier(s) => format!("name '{}'", s),
            Token::Eof => "end of input".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::Dollar => "$",
            Token::At => "@",
            Token::Dot => ".",
            Token::DotDot => "..",
            Token::Star => "*",
            Token::Question => "?",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Caret => "^",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Bang => "!",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Colon => ":",
            _ => "",
        }
    }
}
