use crate::ast::{ColumnAssignment, Expr, FilterBody, Statement};

/// Find the table a block's projection is chained off.
///
/// Walks the first column assignment depth-first (name before value, fields in
/// declaration order, lists in order) and returns the `source_table` of the
/// first dotted identifier it meets.
///
/// # Examples
/// ```text
/// { orders.id, ... }            // "orders"
/// { total: sum(orders.amount) } // "orders"
/// { count(id) }                 // None
/// ```
pub fn find_source_table(column: &ColumnAssignment) -> Option<&str> {
    find_in_expr(&column.name).or_else(|| column.value.as_ref().and_then(find_in_expr))
}

fn find_in_expr(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Identifier { source_table, .. } => source_table.as_deref(),

        Expr::Binary { left, right, .. }
        | Expr::Membership { left, right }
        | Expr::Union { left, right, .. } => find_in_expr(left).or_else(|| find_in_expr(right)),

        Expr::Join {
            left,
            right,
            condition,
            ..
        } => find_in_expr(left)
            .or_else(|| find_in_expr(right))
            .or_else(|| find_in_expr(condition)),

        Expr::Case { condition, value } => {
            find_in_expr(condition).or_else(|| find_in_expr(value))
        }

        Expr::Unary { argument, .. } => find_in_expr(argument),
        Expr::Parenthesized(body) => find_in_expr(body),

        Expr::Function { args: items, .. }
        | Expr::Array(items)
        | Expr::Match(items)
        | Expr::PartitionBy(items) => items.iter().find_map(find_in_expr),

        Expr::Project { body, .. } => find_in_statement(body),

        Expr::String(_) | Expr::Number(_) | Expr::Null => None,
    }
}

fn find_in_statement(statement: &Statement) -> Option<&str> {
    match statement {
        Statement::VariableAssignment { value, .. } => find_in_statement(value),
        Statement::Block { body, .. } => body.iter().find_map(find_in_statement),
        Statement::FilterList(filters) => filters.iter().find_map(|filter| match &filter.body {
            FilterBody::Expression(expr) => find_in_expr(expr),
            FilterBody::Statement(statement) => find_in_statement(statement),
        }),
        Statement::ColumnList(columns) => columns.iter().find_map(find_source_table),
        Statement::Expression(expr) => find_in_expr(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinOp;

    fn column(name: Expr, value: Option<Expr>) -> ColumnAssignment {
        ColumnAssignment { name, value }
    }

    #[test]
    fn test_dotted_name() {
        let col = column(Expr::identifier("orders.id"), None);
        assert_eq!(find_source_table(&col), Some("orders"));
    }

    #[test]
    fn test_plain_name_has_no_source() {
        let col = column(Expr::identifier("id"), None);
        assert_eq!(find_source_table(&col), None);
    }

    #[test]
    fn test_name_searched_before_value() {
        let col = column(
            Expr::identifier("a.total"),
            Some(Expr::identifier("b.amount")),
        );
        assert_eq!(find_source_table(&col), Some("a"));
    }

    #[test]
    fn test_first_match_in_left_to_right_order() {
        let value = Expr::binary(
            BinOp::Add,
            Expr::Function {
                name: "sum".to_string(),
                args: vec![Expr::identifier("x")],
            },
            Expr::binary(
                BinOp::Multiply,
                Expr::identifier("left_t.price"),
                Expr::identifier("right_t.qty"),
            ),
        );
        let col = column(Expr::identifier("total"), Some(value));
        assert_eq!(find_source_table(&col), Some("left_t"));
    }

    #[test]
    fn test_literals_only() {
        let col = column(
            Expr::identifier("n"),
            Some(Expr::Array(vec![Expr::Null, Expr::String("a.b".to_string())])),
        );
        assert_eq!(find_source_table(&col), None);
    }
}
