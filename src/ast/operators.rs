/// Binary operators of the filter/index expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,
    /// Exponent (`^`)
    Exponent,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessOrEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterOrEqual,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation (`-`)
    Negate,
    /// Logical not (`!`)
    Not,
}

/// Binding strength of prefix operators; higher than every binary operator.
pub const UNARY_PRECEDENCE: u8 = 8;

/// Binding strength of literals and path references.
pub const ATOM_PRECEDENCE: u8 = 9;

impl BinaryOp {
    pub fn precedence(self) -> u8 {
        use BinaryOp::*;
        match self {
            Or => 1,
            And => 2,
            Equal | NotEqual => 3,
            LessThan | LessOrEqual | GreaterThan | GreaterOrEqual => 4,
            Add | Subtract => 5,
            Multiply | Divide | Modulo => 6,
            Exponent => 7,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == BinaryOp::Exponent
    }

    /// Comparison and logical operators always produce a boolean.
    pub fn is_boolean(self) -> bool {
        use BinaryOp::*;
        matches!(
            self,
            Equal | NotEqual | LessThan | LessOrEqual | GreaterThan | GreaterOrEqual | And | Or
        )
    }

    pub fn symbol(self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Exponent => "^",
            Equal => "==",
            NotEqual => "!=",
            LessThan => "<",
            LessOrEqual => "<=",
            GreaterThan => ">",
            GreaterOrEqual => ">=",
            And => "&&",
            Or => "||",
        }
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}
