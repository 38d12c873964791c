// tests/end_to_end_tests.rs

use dfql::{Error, GenerateError, Generator, parse, transpile};
use pretty_assertions::assert_eq;

#[test]
fn test_aggregate_block_with_default_source() {
    let program = parse("let x = { count(a), b: sum(c) where a > 1 group by b }").unwrap();
    let code = Generator::with_default_source("t").generate(&program).unwrap();

    let expected = "\
x = (
    t.select(count(a), sum(c).alias('b'))
    .filter(a > 1)
    .groupBy(b)
    .alias('x')
)";
    assert_eq!(code, expected);
}

#[test]
fn test_aggregate_block_without_source_fails() {
    let err = transpile("let x = { count(a), b: sum(c) where a > 1 group by b }").unwrap_err();
    assert_eq!(
        err,
        Error::Generate(GenerateError::MissingSourceTable {
            column: "count(a)".to_string()
        })
    );
}

#[test]
fn test_orders_report() {
    let source = r#"
        let open_orders = {
            orders.id,
            orders.region,
            size: match {
                case orders.amount > 100 => 'large'
                case _ => 'small'
            }
            where orders.status in ['open' 'pending'] and orders.shipped != null
        }

        let totals = {
            orders.region,
            total: sum(orders.amount)
            group by orders.region
            having sum(orders.amount) > 1000
        }

        let enriched = open_orders join customers on open_orders.customer == customers.id
    "#;

    let expected = "\
open_orders = (
    orders.select(orders['id'], orders['region'], when(orders['amount'] > 100, \"large\").otherwise(\"small\").alias('size'))
    .filter((orders['status'].isin(['open', 'pending'])) & (orders['shipped'].isNotNull()))
    .alias('open_orders')
)
totals = (
    orders.select(orders['region'], sum(orders['amount']).alias('total'))
    .groupBy(orders['region'])
    .agg(sum(orders['amount']) > 1000)
    .alias('totals')
)
enriched = (
    open_orders.join(customers, on=open_orders['customer'] == customers['id'], how=\"inner\")
    .alias('enriched')
)";
    assert_eq!(transpile(source).unwrap(), expected);
}

#[test]
fn test_windowed_distinct_projection() {
    let source = "let ranked = { distinct sales.region, \
                  running: sum(sales.amount) over partition by sales.region }";
    let expected = "\
ranked = (
    sales.select(sales['region'], sum(sales['amount']).over(Window.partitionBy(sales['region'])).alias('running'))
    .distinct()
    .alias('ranked')
)";
    assert_eq!(transpile(source).unwrap(), expected);
}

#[test]
fn test_parse_error_surfaces_through_transpile() {
    let err = transpile("let x = { t.a").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(
        err.to_string(),
        "parse error: unexpected end of input: expected CLOSING_CURLY_BRACKET"
    );
}
