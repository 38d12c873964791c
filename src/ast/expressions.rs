use crate::ast::{BinOp, JoinKind, Statement, UnaryOp, UnionKind};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Trees are built once by the parser and only ever read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// String literal, quotes stripped
    ///
    /// # Example
    /// ```text
    /// 'active'
    /// ```
    String(String),

    /// Integer or decimal literal, kept as written
    ///
    /// # Example
    /// ```text
    /// 42
    /// 0.25
    /// ```
    Number(String),

    /// Null literal
    Null,

    // References
    /// Plain or dotted column reference
    ///
    /// `source_table` is the first segment of a dotted chain and is absent for
    /// single-segment names.
    ///
    /// # Examples
    /// ```text
    /// amount          // value "amount", no source table
    /// orders.amount   // value "orders.amount", source table "orders"
    /// ```
    Identifier {
        value: String,
        source_table: Option<String>,
    },

    // Operations
    /// Binary operation (window, logical, comparison, arithmetic)
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Membership test
    ///
    /// # Example
    /// ```text
    /// status in ['open' 'pending']
    /// ```
    Membership {
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Prefix sign
    Unary { op: UnaryOp, argument: Box<Expr> },

    /// Keyword-headed call
    ///
    /// # Examples
    /// ```text
    /// count(id)
    /// sum(amount, 2)
    /// ```
    Function { name: String, args: Vec<Expr> },

    /// Grouping parentheses, kept so they survive into the output
    Parenthesized(Box<Expr>),

    /// Array of literals
    ///
    /// # Example
    /// ```text
    /// [1 2 3]
    /// ['a', 'b']
    /// ```
    Array(Vec<Expr>),

    // Conditionals
    /// Pattern match made of case arms
    ///
    /// # Example
    /// ```text
    /// match {
    ///     case amount > 100 => 'large'
    ///     case _ => 'small'
    /// }
    /// ```
    Match(Vec<Expr>),

    /// A single `case CONDITION => VALUE` arm. The condition `_` is the default arm.
    Case {
        condition: Box<Expr>,
        value: Box<Expr>,
    },

    /// Window partition list
    ///
    /// # Example
    /// ```text
    /// partition by region, country
    /// ```
    PartitionBy(Vec<Expr>),

    // Tables
    /// Join of two table expressions
    ///
    /// Chains nest to the left: `a join b on x join c on y` is
    /// `Join(Join(a, b, x), c, y)`.
    Join {
        kind: JoinKind,
        left: Box<Expr>,
        right: Box<Expr>,
        condition: Box<Expr>,
    },

    /// Union of two table expressions (`union` and `union all`)
    Union {
        kind: UnionKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Named projection
    ///
    /// # Example
    /// ```text
    /// project totals as { orders.region, total: sum(orders.amount) }
    /// ```
    Project { name: String, body: Box<Statement> },
}

impl Expr {
    pub fn identifier(value: impl Into<String>) -> Self {
        let value = value.into();
        let source_table = value
            .split_once('.')
            .map(|(table, _)| table.to_string());
        Expr::Identifier {
            value,
            source_table,
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True for the `_` identifier used as the default case arm.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Expr::Identifier { value, .. } if value == "_")
    }
}
