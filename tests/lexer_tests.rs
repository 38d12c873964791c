// tests/lexer_tests.rs

use dfql::ast::{Token, TokenKind};
use dfql::lexer::{LexError, Lexer, tokenize};

fn lex(input: &str) -> Vec<Token> {
    tokenize(input).unwrap()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).into_iter().map(|t| t.kind).collect()
}

// ============================================================================
// Single Tokens
// ============================================================================

#[test]
fn test_punctuation() {
    let test_cases = vec![
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("[", TokenKind::LBracket),
        ("]", TokenKind::RBracket),
        ("{", TokenKind::LBrace),
        ("}", TokenKind::RBrace),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        (":", TokenKind::Colon),
        ("=", TokenKind::Equals),
        ("=>", TokenKind::FatArrow),
    ];

    for (input, expected) in test_cases {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, expected, "Failed for input: {}", input);
        assert_eq!(tokens[0].text, input);
    }
}

#[test]
fn test_operators() {
    let test_cases = vec![
        (">", TokenKind::Comparison),
        (">=", TokenKind::Comparison),
        ("<", TokenKind::Comparison),
        ("<=", TokenKind::Comparison),
        ("==", TokenKind::Comparison),
        ("!=", TokenKind::Comparison),
        ("+", TokenKind::Additive),
        ("-", TokenKind::Additive),
        ("*", TokenKind::Multiplicative),
        ("/", TokenKind::Multiplicative),
        ("in", TokenKind::Membership),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("over", TokenKind::Over),
    ];

    for (input, expected) in test_cases {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, expected, "Failed for input: {}", input);
        assert_eq!(tokens[0].text, input);
    }
}

#[test]
fn test_double_equals_is_comparison_not_equality() {
    assert_eq!(kinds("a == b")[1], TokenKind::Comparison);
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_all_keywords() {
    let words = [
        "let",
        "distinct",
        "where",
        "group by",
        "having",
        "as",
        "project",
        "count",
        "first",
        "match",
        "case",
        "on",
        "sum",
        "partition by",
    ];
    for word in words {
        let tokens = lex(word);
        assert_eq!(tokens.len(), 1, "Failed for keyword: {}", word);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, word);
    }
}

#[test]
fn test_join_forms() {
    for word in ["join", "left join", "right join", "union", "union all"] {
        let tokens = lex(word);
        assert_eq!(tokens.len(), 1, "Failed for: {}", word);
        assert_eq!(tokens[0].kind, TokenKind::Joins);
        assert_eq!(tokens[0].text, word);
    }
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(kinds("lettuce"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("counter"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("joined"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("inside"), vec![TokenKind::Identifier]);
}

#[test]
fn test_group_without_by_is_identifier() {
    assert_eq!(
        kinds("group x"),
        vec![TokenKind::Identifier, TokenKind::Identifier]
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    let tokens = lex("42 1.50");
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].text, "1.50");
}

#[test]
fn test_strings_keep_quotes() {
    let tokens = lex(r#"'open' "paid in full""#);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "'open'");
    assert_eq!(tokens[1].text, "\"paid in full\"");
}

#[test]
fn test_null() {
    assert_eq!(kinds("null"), vec![TokenKind::Null]);
}

#[test]
fn test_dotted_identifier() {
    assert_eq!(
        kinds("orders.amount"),
        vec![TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier]
    );
}

// ============================================================================
// Whitespace and Errors
// ============================================================================

#[test]
fn test_whitespace_produces_no_tokens() {
    assert!(lex("  \n\t ").is_empty());
    assert!(lex("").is_empty());
}

#[test]
fn test_rejoined_tokens_reproduce_input() {
    let inputs = [
        "let x = { count ( a ) , b : sum ( c ) where a > 1 group by b }",
        "a join b on a . id == b . id",
        "match { case x >= 1 => 'big' case _ => null }",
        "a in [ 1 2 3 ] or b != 4 and c <= 5",
    ];
    for input in inputs {
        let rejoined = lex(input)
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, input);
    }
}

#[test]
fn test_unknown_character_is_error() {
    let err = tokenize("a @ b").unwrap_err();
    assert!(matches!(err, LexError::UnexpectedCharacter { ch: '@', .. }));
}

#[test]
fn test_permissive_lexer_skips() {
    let tokens: Vec<Token> = Lexer::permissive("a @ b")
        .collect::<Result<_, _>>()
        .unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn test_lexer_is_lazy() {
    let mut lexer = Lexer::new("a b @");
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
}
