//! Documentation content for dfql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Blocks,
    Expressions,
    Joins,
    Output,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "keywords" => Some(Self::Syntax),
            "blocks" | "block" | "select" => Some(Self::Blocks),
            "expressions" | "expression" | "expr" | "operators" | "ops" => {
                Some(Self::Expressions)
            }
            "joins" | "join" | "unions" | "union" => Some(Self::Joins),
            "output" | "codegen" | "target" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"DFQL DOCUMENTATION

dfql is a small declarative query language. Programs bind names to blocks of
column projections and filters, joins and unions, and are translated into
chained DataFrame API calls.

DOCUMENTATION CATEGORIES

  syntax            Keywords, punctuation, literals and identifiers
  blocks            let bindings, { ... } blocks, where / having / group by
  expressions       Operators, precedence, functions, match / case, windows
  joins             join, left join, right join, union, union all
  output            How each construct maps onto the DataFrame API

QUICK REFERENCE

  let x = { ... }           Bind a block
  t.col                     Column of table t
  name: expr                Aliased column
  where / having / group by Block clauses
  a join b on cond          Join
  match { case c => v }     Conditional column

Run 'dfql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Blocks) => Ok(BLOCKS_DOC),
        Some(DocCategory::Expressions) => Ok(EXPRESSIONS_DOC),
        Some(DocCategory::Joins) => Ok(JOINS_DOC),
        Some(DocCategory::Output) => Ok(OUTPUT_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Tokens

KEYWORDS
  let distinct where group by having as project count first match case on
  sum partition by in null over and or
  join left join right join union union all

  Multi-word keywords are written with exactly one space: "group by".
  Keywords cannot be used as column names.

PUNCTUATION
  ( ) [ ] { } , . : = =>

LITERALS
  42  1.50          Numbers (integer or decimal)
  'text' "text"     Strings, either quote style
  null              Null

IDENTIFIERS
  orders            Letters, digits and underscores
  orders.amount     Dotted: the first segment names the source table
  _                 Wildcard, used as the default case arm

WHITESPACE
  Spaces and newlines separate tokens and are otherwise ignored.
  Any other character that is not part of a token is an error
  (use --permissive to skip such characters instead).
"#;

const BLOCKS_DOC: &str = r#"BLOCKS - Bindings and pipelines

LET BINDINGS
  let NAME = { ... }
  let NAME = EXPRESSION

    Example:
      let big = { orders.id, orders.amount where orders.amount > 100 }

BLOCKS
  { [distinct] COLUMNS [CLAUSES] }

  COLUMNS is a comma-separated list. Each entry is either an expression,
  passed through as-is, or NAME: EXPRESSION, which aliases the result.

    { orders.region, total: sum(orders.amount) }

CLAUSES
  where EXPR        Keep rows matching EXPR
  having EXPR       Aggregate with EXPR
  group by COLUMNS  Group rows

  Clauses may repeat and are applied in source order.

DISTINCT
  { distinct orders.region }
    Deduplicates the result.

SOURCE TABLE
  There is no "from". The table is the first segment of the first dotted
  identifier inside the first column. { count(id) } names no table; pass
  --default-source NAME to supply one.

PROJECTIONS
  project NAME as { ... }
    A named block that is emitted on its own without a binding.
"#;

const EXPRESSIONS_DOC: &str = r#"EXPRESSIONS - Operators and forms

PRECEDENCE (loosest first, all left-associative)
  over
  join / left join / right join / union / union all
  or
  and
  ==
  >  >=  <  <=  ==  !=
  +  -
  *  /
  in
  unary + -

  a or b and c      is  a or (b and c)
  a - b - c         is  (a - b) - c

FUNCTIONS
  count(x)  sum(x)  first(x)  distinct(x)
    Any non-structural keyword followed by parentheses.

MEMBERSHIP
  status in ['open' 'pending']
    Arrays hold literals only; commas between items are optional.

NULL CHECKS
  amount != null

CONDITIONALS
  match {
      case amount > 100 => 'large'
      case _ => 'small'
  }

WINDOWS
  sum(amount) over partition by region, country
"#;

const JOINS_DOC: &str = r#"JOINS - Combining tables

JOIN
  a join b on CONDITION
  a left join b on CONDITION
  a right join b on CONDITION

UNION
  a union b
  a union all b

CHAINS
  Chains fold to the left:

    a join b on a.id == b.id join c on b.id == c.id

  is ((a join b) join c) and renders as two nested join calls.
"#;

const OUTPUT_DOC: &str = r#"OUTPUT - Generated DataFrame code

BINDINGS
  let x = { t.a, b: sum(t.c) where t.a > 1 group by t.b }

    x = (
        t.select(t['a'], sum(t['c']).alias('b'))
        .filter(t['a'] > 1)
        .groupBy(t['b'])
        .alias('x')
    )

MAPPING
  where EXPR            .filter(EXPR)
  having EXPR           .agg(EXPR)
  group by COLS         .groupBy(COLS)
  distinct modifier     .distinct()
  NAME: EXPR            EXPR.alias('NAME')
  t.col                 t['col']
  a and b / a or b      (a) & (b) / (a) | (b)
  x in [1 2]            x.isin(['1', '2'])
  x != null             x.isNotNull()
  match / case          when(c, v).otherwise(v)
  a join b on c         a.join(b, on=c, how="inner")
  a union b             a.union(b)
  f(x) over partition by p
                        f(x).over(Window.partitionBy(p))

Only let bindings and top-level project blocks produce output.
"#;
