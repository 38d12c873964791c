//! JSON rendering of parsed programs.
//!
//! Every node becomes an object tagged with a `type` field, so a parse can be
//! inspected or handed to other tools without depending on this crate's types.
//!
//! # Examples
//!
//! ```
//! use dfql::output::to_json;
//!
//! let program = dfql::parse("let a = b.c").unwrap();
//! let json = to_json(&program);
//! assert!(json.starts_with(r#"{"body":[{"name":"a""#));
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::{Value, json};

use crate::ast::{ColumnAssignment, Expr, Filter, FilterBody, Program, Statement};

/// Convert a program to a JSON value.
pub fn program_to_json(program: &Program) -> Value {
    json!({
        "type": "StatementList",
        "body": program.statements.iter().map(statement_to_json).collect::<Vec<_>>(),
    })
}

/// Converts a program to compact JSON.
pub fn to_json(program: &Program) -> String {
    program_to_json(program).to_string()
}

/// Converts a program to JSON with 2-space indentation.
pub fn to_json_pretty(program: &Program) -> String {
    format!("{:#}", program_to_json(program))
}

fn statement_to_json(statement: &Statement) -> Value {
    match statement {
        Statement::VariableAssignment { name, value } => json!({
            "type": "VariableAssignment",
            "name": name,
            "value": statement_to_json(value),
        }),
        Statement::Block { modifier, body } => json!({
            "type": "BlockStatement",
            "modifier": modifier,
            "body": body.iter().map(statement_to_json).collect::<Vec<_>>(),
        }),
        Statement::FilterList(filters) => json!({
            "type": "FilterStatementList",
            "body": filters.iter().map(filter_to_json).collect::<Vec<_>>(),
        }),
        Statement::ColumnList(columns) => json!({
            "type": "ColumnAssignmentList",
            "body": columns.iter().map(column_to_json).collect::<Vec<_>>(),
        }),
        Statement::Expression(expr) => expr_to_json(expr),
    }
}

fn filter_to_json(filter: &Filter) -> Value {
    let body = match &filter.body {
        FilterBody::Expression(expr) => expr_to_json(expr),
        FilterBody::Statement(statement) => statement_to_json(statement),
    };
    json!({
        "type": "filter",
        "value": filter.kind.as_str(),
        "body": body,
    })
}

// A bare column is emitted as its expression alone.
fn column_to_json(column: &ColumnAssignment) -> Value {
    match &column.value {
        Some(value) => json!({
            "type": "ColumnAssignmentStatement",
            "name": expr_to_json(&column.name),
            "value": expr_to_json(value),
        }),
        None => expr_to_json(&column.name),
    }
}

fn exprs_to_json(exprs: &[Expr]) -> Vec<Value> {
    exprs.iter().map(expr_to_json).collect()
}

// Literals a JSON number cannot hold exactly stay as their source text.
fn number_to_json(text: &str) -> Value {
    let Ok(n) = Decimal::from_str(text) else {
        return Value::String(text.to_string());
    };
    if n.to_string() != text {
        return Value::String(text.to_string());
    }
    let value = if n.is_integer() {
        n.to_i64().map(Value::from)
    } else {
        n.to_f64().map(Value::from)
    };
    value.unwrap_or_else(|| Value::String(text.to_string()))
}

fn expr_to_json(expr: &Expr) -> Value {
    match expr {
        Expr::String(s) => json!({ "type": "StringLiteral", "value": s }),
        Expr::Number(text) => json!({
            "type": "NumericLiteral",
            "value": number_to_json(text),
        }),
        Expr::Null => json!({ "type": "NULL", "value": null }),

        Expr::Identifier {
            value,
            source_table,
        } => {
            let mut node = json!({ "type": "IdentifierExpression", "value": value });
            if let Some(table) = source_table {
                node["source_table"] = json!(table);
            }
            node
        }

        Expr::Binary { op, left, right } => json!({
            "type": "BinaryExpression",
            "operator": op.as_str(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Membership { left, right } => json!({
            "type": "MembershipExpression",
            "operator": "in",
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Unary { op, argument } => json!({
            "type": "unary_expression",
            "operator": op.as_str(),
            "argument": expr_to_json(argument),
        }),

        Expr::Function { name, args } => json!({
            "type": "FunctionalExpression",
            "name": name,
            "args": exprs_to_json(args),
        }),
        Expr::Parenthesized(body) => json!({
            "type": "ParenthesizedExpression",
            "body": expr_to_json(body),
        }),
        Expr::Array(items) => json!({ "type": "ArrayExpression", "body": exprs_to_json(items) }),
        Expr::Match(cases) => json!({ "type": "MatchExpression", "body": exprs_to_json(cases) }),
        Expr::Case { condition, value } => json!({
            "type": "CaseExpression",
            "conditions": expr_to_json(condition),
            "value": expr_to_json(value),
        }),
        Expr::PartitionBy(columns) => json!({
            "type": "PartitionByExpression",
            "body": exprs_to_json(columns),
        }),

        Expr::Join {
            kind,
            left,
            right,
            condition,
        } => json!({
            "type": "JoinExpression",
            "join_type": kind.as_str(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
            "condition": expr_to_json(condition),
        }),
        Expr::Union { kind, left, right } => json!({
            "type": "UnionExpression",
            "join_type": kind.as_str(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Project { name, body } => json!({
            "type": "ProjectExpression",
            "name": name,
            "body": statement_to_json(body),
        }),
    }
}
