/// Binary operators, one per precedence tier operator text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Window
    /// Window application (`over`)
    Over,

    // Logical
    /// Logical OR (`or`)
    Or,
    /// Logical AND (`and`)
    And,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
}

impl BinOp {
    /// Map an operator token's text to its operator.
    pub fn from_text(text: &str) -> Option<Self> {
        let op = match text {
            "over" => BinOp::Over,
            "or" => BinOp::Or,
            "and" => BinOp::And,
            "==" => BinOp::Equal,
            "!=" => BinOp::NotEqual,
            "<" => BinOp::LessThan,
            ">" => BinOp::GreaterThan,
            "<=" => BinOp::LessEqual,
            ">=" => BinOp::GreaterEqual,
            "+" => BinOp::Add,
            "-" => BinOp::Subtract,
            "*" => BinOp::Multiply,
            "/" => BinOp::Divide,
            _ => return None,
        };
        Some(op)
    }

    /// Source spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Over => "over",
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::GreaterThan => ">",
            BinOp::LessEqual => "<=",
            BinOp::GreaterEqual => ">=",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl UnaryOp {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "+" => Some(UnaryOp::Plus),
            "-" => Some(UnaryOp::Minus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Join flavours carried by the `JOINS` token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `join`
    Inner,
    /// `left join`
    Left,
    /// `right join`
    Right,
}

impl JoinKind {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "join" => Some(JoinKind::Inner),
            "left join" => Some(JoinKind::Left),
            "right join" => Some(JoinKind::Right),
            _ => None,
        }
    }

    /// Source spelling, e.g. `left join`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "join",
            JoinKind::Left => "left join",
            JoinKind::Right => "right join",
        }
    }

    /// Value passed as `how=` to the DataFrame join call.
    pub fn how(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
        }
    }
}

/// Set operators carried by the `JOINS` token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKind {
    /// `union`
    Distinct,
    /// `union all`
    All,
}

impl UnionKind {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "union" => Some(UnionKind::Distinct),
            "union all" => Some(UnionKind::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnionKind::Distinct => "union",
            UnionKind::All => "union all",
        }
    }
}

/// Clause keyword of a filter statement inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `where` - row filter
    Where,
    /// `having` - aggregate
    Having,
    /// `group by` - grouping columns
    GroupBy,
}

impl FilterKind {
    pub const KEYWORDS: [&'static str; 3] = ["where", "having", "group by"];

    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "where" => Some(FilterKind::Where),
            "having" => Some(FilterKind::Having),
            "group by" => Some(FilterKind::GroupBy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Where => "where",
            FilterKind::Having => "having",
            FilterKind::GroupBy => "group by",
        }
    }
}
