// tests/generator_tests.rs

use dfql::{GenerateError, Generator, GeneratorOptions, generate, parse};
use pretty_assertions::assert_eq;

fn render(source: &str) -> String {
    let program = parse(source).unwrap();
    generate(&program).unwrap()
}

/// Render `let _t = { t.k, c: EXPR }` and return the projected column for EXPR.
fn render_column(expr: &str) -> String {
    let code = render(&format!("let _t = {{ t.k, c: {} }}", expr));
    let select = code.lines().nth(1).unwrap().trim();
    let inner = select
        .strip_prefix("t.select(t['k'], ")
        .and_then(|s| s.strip_suffix(".alias('c'))"))
        .unwrap_or_else(|| panic!("unexpected select line: {}", select));
    inner.to_string()
}

// ============================================================================
// Bindings and Blocks
// ============================================================================

#[test]
fn test_block_binding_layout() {
    let code = render("let x = { t.a, b: sum(t.c) where t.a > 1 group by t.b }");
    assert_eq!(
        code,
        "x = (\n    t.select(t['a'], sum(t['c']).alias('b'))\n    .filter(t['a'] > 1)\n    .groupBy(t['b'])\n    .alias('x')\n)"
    );
}

#[test]
fn test_expression_binding() {
    assert_eq!(render("let x = 1"), "x = (\n    1\n    .alias('x')\n)");
}

#[test]
fn test_bindings_in_source_order() {
    let code = render("let a = { t.x } let b = { u.y }");
    let names: Vec<&str> = code
        .lines()
        .filter(|line| line.ends_with("= ("))
        .collect();
    assert_eq!(names, vec!["a = (", "b = ("]);
}

#[test]
fn test_distinct_modifier_is_last() {
    assert_eq!(
        render("let x = { distinct t.a where t.a > 0 }"),
        "x = (\n    t.select(t['a'])\n    .filter(t['a'] > 0)\n    .distinct()\n    .alias('x')\n)"
    );
}

#[test]
fn test_having_becomes_agg() {
    let code = render("let x = { t.a having sum(t.b) > 1 }");
    assert!(code.contains("    .agg(sum(t['b']) > 1)\n"));
}

#[test]
fn test_clauses_keep_source_order() {
    let code = render("let x = { t.a group by t.a where t.a > 1 }");
    let group = code.find(".groupBy(").unwrap();
    let filter = code.find(".filter(").unwrap();
    assert!(group < filter);
}

#[test]
fn test_source_table_from_aliased_value() {
    let code = render("let x = { total: sum(orders.amount) }");
    assert!(code.contains("orders.select(sum(orders['amount']).alias('total'))"));
}

#[test]
fn test_top_level_projection() {
    assert_eq!(
        render("project p as { t.a where t.a > 1 }"),
        "t.select(t['a'])\n.filter(t['a'] > 1)"
    );
}

#[test]
fn test_other_top_level_statements_are_skipped() {
    assert_eq!(render("t.a, t.b"), "");
    assert_eq!(render("where t.a > 1"), "");
    assert_eq!(render(""), "");
}

#[test]
fn test_custom_indent() {
    let program = parse("let x = { t.a }").unwrap();
    let generator = Generator::with_options(GeneratorOptions {
        indent: 2,
        ..GeneratorOptions::default()
    });
    assert_eq!(generator.options().indent, 2);
    assert_eq!(
        generator.generate(&program).unwrap(),
        "x = (\n  t.select(t['a'])\n  .alias('x')\n)"
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_identifiers() {
    assert_eq!(render_column("t.a"), "t['a']");
    assert_eq!(render_column("db.t.a"), "db['t.a']");
    assert_eq!(render_column("a"), "a");
}

#[test]
fn test_literals() {
    assert_eq!(render_column("'open'"), "\"open\"");
    assert_eq!(render_column("1.50"), "1.50");
    assert_eq!(render_column("null"), "None");
}

#[test]
fn test_not_null_idiom() {
    assert_eq!(render_column("t.a != null"), "t['a'].isNotNull()");
    assert_eq!(render_column("t.a + t.b != null"), "(t['a'] + t['b']).isNotNull()");
    assert_eq!(render_column("t.a == null"), "t['a'] == None");
}

#[test]
fn test_wide_numbers_render_verbatim() {
    let code = render(
        "let x = { t.a where t.a > 100000000000000000000000000000 \
         and t.b < 0.12345678901234567890123456789012 }",
    );
    assert!(code.contains(
        ".filter((t['a'] > 100000000000000000000000000000) & (t['b'] < 0.12345678901234567890123456789012))"
    ));
}

#[test]
fn test_array_items_escape_backslash_and_quote() {
    assert_eq!(
        render_column(r#"t.s in ["a\" "it's"]"#),
        r#"t['s'].isin(['a\\', 'it\'s'])"#
    );
}

#[test]
fn test_membership() {
    assert_eq!(render_column("t.s in ['a' 1]"), "t['s'].isin(['a', '1'])");
    assert_eq!(render_column("(t.a + 1) in [2]"), "(t['a'] + 1).isin(['2'])");
}

#[test]
fn test_logical_operators() {
    assert_eq!(
        render_column("t.a > 1 and t.b < 2 or t.c"),
        "((t['a'] > 1) & (t['b'] < 2)) | (t['c'])"
    );
}

#[test]
fn test_arithmetic_and_unary() {
    assert_eq!(render_column("-t.a * 2 + 1"), "-t['a'] * 2 + 1");
    assert_eq!(render_column("(t.a + 1) / 2"), "(t['a'] + 1) / 2");
}

#[test]
fn test_functions() {
    assert_eq!(render_column("count()"), "count()");
    assert_eq!(render_column("sum(t.a, 2)"), "sum(t['a'], 2)");
}

#[test]
fn test_match_expression() {
    assert_eq!(
        render_column("match { case t.a > 100 => 'large' case t.a > 10 => 'medium' case _ => 'small' }"),
        "when(t['a'] > 100, \"large\").when(t['a'] > 10, \"medium\").otherwise(\"small\")"
    );
}

#[test]
fn test_window() {
    assert_eq!(
        render_column("sum(t.a) over partition by t.r, t.s"),
        "sum(t['a']).over(Window.partitionBy(t['r'], t['s']))"
    );
}

// ============================================================================
// Joins and Unions
// ============================================================================

#[test]
fn test_join_chain() {
    let code = render("let j = a join b on a.id == b.id join c on b.id == c.id");
    assert_eq!(
        code,
        "j = (\n    a.join(b, on=a['id'] == b['id'], how=\"inner\").join(c, on=b['id'] == c['id'], how=\"inner\")\n    .alias('j')\n)"
    );
}

#[test]
fn test_outer_join_kinds() {
    let code = render("let j = a left join b on a.id == b.id right join c on a.id == c.id");
    assert!(code.contains("a.join(b, on=a['id'] == b['id'], how=\"left\")"));
    assert!(code.contains(".join(c, on=a['id'] == c['id'], how=\"right\")"));
}

#[test]
fn test_union() {
    let code = render("let u = a union all b union c");
    assert!(code.contains("    a.union(b).union(c)\n"));
}

// ============================================================================
// Errors and Options
// ============================================================================

#[test]
fn test_missing_source_table() {
    let program = parse("let x = { count(a) }").unwrap();
    assert_eq!(
        generate(&program),
        Err(GenerateError::MissingSourceTable {
            column: "count(a)".to_string()
        })
    );
}

#[test]
fn test_default_source() {
    let program = parse("let x = { count(a) }").unwrap();
    let code = Generator::with_default_source("events")
        .generate(&program)
        .unwrap();
    assert_eq!(code, "x = (\n    events.select(count(a))\n    .alias('x')\n)");
}

#[test]
fn test_dotted_column_wins_over_default_source() {
    let program = parse("let x = { t.a }").unwrap();
    let code = Generator::with_default_source("events")
        .generate(&program)
        .unwrap();
    assert!(code.contains("t.select(t['a'])"));
}

#[test]
fn test_block_without_columns() {
    let program = parse("let x = { where t.a > 1 }").unwrap();
    assert_eq!(generate(&program), Err(GenerateError::MissingProjection));
}

#[test]
fn test_generate_is_deterministic() {
    let program = parse("let x = { t.a, n: count(t.b) where t.a in [1 2] }").unwrap();
    assert_eq!(generate(&program), generate(&program));
}
