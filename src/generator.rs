//! DataFrame code generation.
//!
//! Walks a [`Program`] and renders each binding as a chained DataFrame API
//! expression (`select`, `filter`, `agg`, `groupBy`, `join`, `union`, ...).
//! Children are rendered first and spliced into their parent's template.

use thiserror::Error;

use crate::{
    ast::{BinOp, ColumnAssignment, Expr, Filter, FilterBody, FilterKind, Program, Statement},
    source::find_source_table,
};

/// Code generation error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error(
        "no source table for block starting with column `{column}`: \
         use a dotted column such as table.column or configure a default source"
    )]
    MissingSourceTable { column: String },

    #[error("block has no column list to select")]
    MissingProjection,

    #[error("cannot render {0} here")]
    Unsupported(&'static str),
}

type GenResult<T> = Result<T, GenerateError>;

/// Generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Table used when no dotted identifier names one.
    pub default_source: Option<String>,
    /// Spaces of indentation inside a binding's parentheses.
    pub indent: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            default_source: None,
            indent: 4,
        }
    }
}

/// DataFrame API code generator.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Generator { options }
    }

    /// Generator that falls back to `source` when a block names no table.
    pub fn with_default_source(source: &str) -> Self {
        Generator {
            options: GeneratorOptions {
                default_source: Some(source.to_string()),
                ..GeneratorOptions::default()
            },
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Render every binding and top-level projection, in source order.
    ///
    /// Other top-level statements produce no output.
    pub fn generate(&self, program: &Program) -> GenResult<String> {
        tracing::debug!(statements = program.statements.len(), "generating");

        let mut rendered = vec![];
        for statement in &program.statements {
            match statement {
                Statement::VariableAssignment { name, value } => {
                    rendered.push(self.generate_assignment(name, value)?);
                }
                Statement::Expression(Expr::Project { body, .. }) => {
                    rendered.push(self.generate_block(body)?.join("\n"));
                }
                other => {
                    tracing::debug!(kind = statement_kind(other), "skipping top-level statement");
                }
            }
        }
        Ok(rendered.join("\n"))
    }

    fn generate_assignment(&self, name: &str, value: &Statement) -> GenResult<String> {
        let mut links = match value {
            Statement::Block { .. } => self.generate_block(value)?,
            Statement::Expression(Expr::Project { body, .. }) => self.generate_block(body)?,
            Statement::Expression(expr) => vec![self.generate_expr(expr)?],
            other => return Err(GenerateError::Unsupported(statement_kind(other))),
        };
        links.push(format!(".alias('{}')", name));

        let indent = " ".repeat(self.options.indent);
        let body = links
            .iter()
            .map(|link| format!("{}{}", indent, link))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(format!("{} = (\n{}\n)", name, body))
    }

    /// Render a block as chain links: `source.select(...)`, then `.filter(...)`
    /// and friends, then the modifier call.
    fn generate_block(&self, block: &Statement) -> GenResult<Vec<String>> {
        let Statement::Block { modifier, body } = block else {
            return Err(GenerateError::Unsupported(statement_kind(block)));
        };

        let Some(Statement::ColumnList(columns)) = body.first() else {
            return Err(GenerateError::MissingProjection);
        };
        let Some(first) = columns.first() else {
            return Err(GenerateError::MissingProjection);
        };

        let source = self.resolve_source(first)?;
        let projection = self.generate_columns(columns)?;

        let mut links = vec![format!("{}.select({})", source, projection)];
        for statement in &body[1..] {
            let Statement::FilterList(filters) = statement else {
                return Err(GenerateError::Unsupported(statement_kind(statement)));
            };
            for filter in filters {
                links.push(format!(".{}", self.generate_filter(filter)?));
            }
        }

        if let Some(modifier) = modifier {
            links.push(format!(".{}()", modifier));
        }
        Ok(links)
    }

    fn resolve_source(&self, first: &ColumnAssignment) -> GenResult<String> {
        if let Some(table) = find_source_table(first) {
            return Ok(table.to_string());
        }

        match &self.options.default_source {
            Some(source) => {
                tracing::debug!(%source, "no dotted column found, using default source");
                Ok(source.clone())
            }
            None => Err(GenerateError::MissingSourceTable {
                column: self.generate_expr(first.value_expr())?,
            }),
        }
    }

    fn generate_columns(&self, columns: &[ColumnAssignment]) -> GenResult<String> {
        let rendered = columns
            .iter()
            .map(|column| self.generate_column(column))
            .collect::<GenResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    fn generate_column(&self, column: &ColumnAssignment) -> GenResult<String> {
        let Some(value) = &column.value else {
            return self.generate_expr(&column.name);
        };

        let alias = match &column.name {
            Expr::Identifier { value, .. } => value.clone(),
            other => self.generate_expr(other)?,
        };
        Ok(format!("{}.alias('{}')", self.generate_expr(value)?, alias))
    }

    fn generate_filter(&self, filter: &Filter) -> GenResult<String> {
        let body = match &filter.body {
            FilterBody::Expression(expr) => self.generate_expr(expr)?,
            FilterBody::Statement(statement) => self.generate_column_statement(statement)?,
        };

        let call = match filter.kind {
            FilterKind::Where => "filter",
            FilterKind::Having => "agg",
            FilterKind::GroupBy => "groupBy",
        };
        Ok(format!("{}({})", call, body))
    }

    fn generate_column_statement(&self, statement: &Statement) -> GenResult<String> {
        match statement {
            Statement::ColumnList(columns) => self.generate_columns(columns),
            Statement::Expression(expr) => self.generate_expr(expr),
            other => Err(GenerateError::Unsupported(statement_kind(other))),
        }
    }

    pub fn generate_expr(&self, expr: &Expr) -> GenResult<String> {
        match expr {
            Expr::String(s) => Ok(format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))),
            Expr::Number(n) => Ok(n.clone()),
            Expr::Null => Ok("None".to_string()),

            Expr::Identifier { value, .. } => Ok(match value.split_once('.') {
                Some((first, rest)) => format!("{}['{}']", first, rest),
                None => value.clone(),
            }),

            Expr::Binary { op, left, right } => self.generate_binary(*op, left, right),

            Expr::Membership { left, right } => Ok(format!(
                "{}.isin({})",
                self.generate_receiver(left)?,
                self.generate_expr(right)?
            )),

            Expr::Unary { op, argument } => {
                Ok(format!("{}{}", op.as_str(), self.generate_expr(argument)?))
            }

            Expr::Function { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.generate_expr(arg))
                    .collect::<GenResult<Vec<_>>>()?;
                Ok(format!("{}({})", name, args.join(", ")))
            }

            Expr::Parenthesized(body) => Ok(format!("({})", self.generate_expr(body)?)),

            Expr::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| {
                        let raw = raw_literal(item).replace('\\', "\\\\").replace('\'', "\\'");
                        format!("'{}'", raw)
                    })
                    .collect::<Vec<_>>();
                Ok(format!("[{}]", items.join(", ")))
            }

            Expr::Match(cases) => {
                let cases = cases
                    .iter()
                    .map(|case| self.generate_expr(case))
                    .collect::<GenResult<Vec<_>>>()?;
                Ok(cases.join("."))
            }

            Expr::Case { condition, value } => {
                let value = self.generate_expr(value)?;
                if condition.is_wildcard() {
                    Ok(format!("otherwise({})", value))
                } else {
                    Ok(format!("when({}, {})", self.generate_expr(condition)?, value))
                }
            }

            Expr::PartitionBy(columns) => {
                let columns = columns
                    .iter()
                    .map(|column| self.generate_expr(column))
                    .collect::<GenResult<Vec<_>>>()?;
                Ok(format!("Window.partitionBy({})", columns.join(", ")))
            }

            Expr::Join { .. } | Expr::Union { .. } => self.generate_table(expr),

            Expr::Project { body, .. } => Ok(format!("({})", self.generate_block(body)?.join("\n"))),
        }
    }

    fn generate_binary(&self, op: BinOp, left: &Expr, right: &Expr) -> GenResult<String> {
        match op {
            BinOp::NotEqual if matches!(right, Expr::Null) => {
                Ok(format!("{}.isNotNull()", self.generate_receiver(left)?))
            }
            BinOp::Over => Ok(format!(
                "{}.over({})",
                self.generate_receiver(left)?,
                self.generate_expr(right)?
            )),
            _ if op.is_logical() => Ok(format!(
                "({}) {} ({})",
                self.generate_expr(left)?,
                if op == BinOp::And { "&" } else { "|" },
                self.generate_expr(right)?
            )),
            _ => Ok(format!(
                "{} {} {}",
                self.generate_expr(left)?,
                op.as_str(),
                self.generate_expr(right)?
            )),
        }
    }

    /// Render an expression that a method call is chained onto, parenthesising
    /// anything that is not already atomic.
    fn generate_receiver(&self, expr: &Expr) -> GenResult<String> {
        let rendered = self.generate_expr(expr)?;
        match expr {
            Expr::Identifier { .. }
            | Expr::Function { .. }
            | Expr::Parenthesized(_)
            | Expr::String(_)
            | Expr::Number(_)
            | Expr::Null
            | Expr::Array(_) => Ok(rendered),
            _ => Ok(format!("({})", rendered)),
        }
    }

    /// Render a join or union operand. Bare names are emitted as written so a
    /// dotted table reference stays a variable path.
    fn generate_table(&self, expr: &Expr) -> GenResult<String> {
        match expr {
            Expr::Join {
                kind,
                left,
                right,
                condition,
            } => Ok(format!(
                "{}.join({}, on={}, how=\"{}\")",
                self.generate_table(left)?,
                self.generate_table(right)?,
                self.generate_expr(condition)?,
                kind.how()
            )),
            Expr::Union { left, right, .. } => Ok(format!(
                "{}.union({})",
                self.generate_table(left)?,
                self.generate_table(right)?
            )),
            Expr::Identifier { value, .. } => Ok(value.clone()),
            Expr::Parenthesized(body) => Ok(format!("({})", self.generate_table(body)?)),
            other => self.generate_expr(other),
        }
    }
}

/// The literal's stored value as plain text.
fn raw_literal(expr: &Expr) -> String {
    match expr {
        Expr::String(s) => s.clone(),
        Expr::Number(n) => n.clone(),
        Expr::Null => "None".to_string(),
        Expr::Identifier { value, .. } => value.clone(),
        _ => String::new(),
    }
}

fn statement_kind(statement: &Statement) -> &'static str {
    match statement {
        Statement::VariableAssignment { .. } => "variable assignment",
        Statement::Block { .. } => "block",
        Statement::FilterList(_) => "filter list",
        Statement::ColumnList(_) => "column list",
        Statement::Expression(_) => "expression",
    }
}

/// Generate code with default options.
pub fn generate(program: &Program) -> GenResult<String> {
    Generator::new().generate(program)
}
