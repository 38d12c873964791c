//! # dfql - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for dfql, a small
//! declarative query language whose programs are translated into chained
//! DataFrame API calls.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, columns, operations, joins)
//! - **[operators]** - Binary, unary, join and filter operator enums
//! - **[statements]** - Statements (bindings, blocks, filters, column lists)
//! - **[program]** - A complete parsed source file
//!
//! ## Quick Start
//!
//! ```text
//! let totals = {
//!     orders.region,
//!     revenue: sum(orders.amount)
//!     where orders.status == 'paid'
//!     group by orders.region
//! }
//! ```
//!
//! becomes
//!
//! ```text
//! totals = (
//!     orders.select(orders['region'], sum(orders['amount']).alias('revenue'))
//!     .filter(orders['status'] == "paid")
//!     .groupBy(orders['region'])
//!     .alias('totals')
//! )
//! ```
//!
//! ## Core Concepts
//!
//! ### Blocks
//!
//! A block opens with an optional `distinct` modifier, then a column list that
//! becomes the `select(...)` projection, then any number of filter clauses:
//!
//! - **`where`** → `filter(...)`
//! - **`having`** → `agg(...)`
//! - **`group by`** → `groupBy(...)`
//!
//! ### Source tables
//!
//! There is no `from` clause. The table a block selects from is the first
//! segment of the first dotted identifier found under its first column.
//!
//! ### Joins and unions
//!
//! ```text
//! let joined = orders join customers on orders.customer_id == customers.id
//! ```
//!
//! Chains fold to the left and render as nested `.join(...)` calls.
pub mod expressions;
pub mod operators;
pub mod program;
pub mod statements;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{BinOp, FilterKind, JoinKind, UnaryOp, UnionKind};
pub use program::Program;
pub use statements::{ColumnAssignment, Filter, FilterBody, Statement};
pub use tokens::{Span, Token, TokenKind};
