use crate::ast::{Expr, FilterKind};

/// Top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable binding
    ///
    /// # Example
    /// ```text
    /// let totals = { orders.region, total: sum(orders.amount) group by orders.region }
    /// ```
    VariableAssignment { name: String, value: Box<Statement> },

    /// Braced pipeline with an optional leading modifier
    ///
    /// # Example
    /// ```text
    /// { distinct orders.region }
    /// ```
    Block {
        modifier: Option<String>,
        body: Vec<Statement>,
    },

    /// One or more `where` / `having` / `group by` clauses
    FilterList(Vec<Filter>),

    /// Comma-separated column assignments
    ///
    /// # Example
    /// ```text
    /// orders.id, total: orders.price * orders.quantity
    /// ```
    ColumnList(Vec<ColumnAssignment>),

    /// Bare expression
    Expression(Expr),
}

/// A single filter clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub kind: FilterKind,
    pub body: FilterBody,
}

/// Body of a filter clause: `group by` takes a nested statement, the rest an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterBody {
    Expression(Expr),
    Statement(Box<Statement>),
}

/// `name : value`, or a bare expression passed through unaliased when `value` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment {
    pub name: Expr,
    pub value: Option<Expr>,
}

impl ColumnAssignment {
    /// The expression that produces the column's values.
    pub fn value_expr(&self) -> &Expr {
        self.value.as_ref().unwrap_or(&self.name)
    }
}
