use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::ast::{Span, Token, TokenKind};

/// Ordered token rules. At any position the first rule that matches wins, so
/// `in` precedes identifiers and multi-word keywords precede their prefixes.
const RULES: &[(&str, TokenKind)] = &[
    (r"\bin\b", TokenKind::Membership),
    (r"=>", TokenKind::FatArrow),
    (r":", TokenKind::Colon),
    (r"\bor\b", TokenKind::Or),
    (r"\band\b", TokenKind::And),
    (r">=|>|<=|<|==|!=", TokenKind::Comparison),
    (r"\*|/", TokenKind::Multiplicative),
    (r"\+|-", TokenKind::Additive),
    (r"==", TokenKind::Equality),
    (r"=", TokenKind::Equals),
    (r"\.", TokenKind::Dot),
    (r",", TokenKind::Comma),
    (r"\[", TokenKind::LBracket),
    (r"\]", TokenKind::RBracket),
    (r"\(", TokenKind::LParen),
    (r"\)", TokenKind::RParen),
    (r"\{", TokenKind::LBrace),
    (r"\}", TokenKind::RBrace),
    (r"\bover\b", TokenKind::Over),
    (
        r"\bleft join\b|\bright join\b|\bjoin\b|\bunion all\b|\bunion\b",
        TokenKind::Joins,
    ),
    (
        r"\blet\b|\bdistinct\b|\bwhere\b|\bgroup by\b|\bhaving\b|\bas\b|\bproject\b|\bcount\b|\bfirst\b|\bmatch\b|\bcase\b|\bon\b|\bsum\b|\bpartition by\b",
        TokenKind::Keyword,
    ),
    (r"\bnull\b", TokenKind::Null),
    (r"\d+(?:\.\d+)?", TokenKind::Number),
    (r#""[^"]*"|'[^']*'"#, TokenKind::String),
    (r"\w+", TokenKind::Identifier),
];

/// All rules joined into one alternation, rule `i` captured by group `i + 1`.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = RULES
        .iter()
        .map(|(pattern, _)| format!("({pattern})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("token rule table is a valid regex")
});

/// Line and column (both 1-based) of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn locate(input: &str, offset: usize) -> Self {
        let before = &input[..offset.min(input.len())];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        Position {
            offset,
            line,
            column,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },
}

/// Lazy token stream over a source string.
///
/// Whitespace between matches is dropped. Any other unmatched character is a
/// [`LexError`] unless the lexer was built with [`Lexer::permissive`], in which
/// case it is skipped. The stream ends after the last token or the first error.
pub struct Lexer {
    input: String,
    position: usize,
    permissive: bool,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.to_string(),
            position: 0,
            permissive: false,
            finished: false,
        }
    }

    /// A lexer that silently skips characters no rule matches.
    pub fn permissive(input: &str) -> Self {
        Lexer {
            permissive: true,
            ..Lexer::new(input)
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Check the unmatched gap `[self.position, end)`.
    fn check_gap(&self, end: usize) -> Result<(), LexError> {
        if self.permissive {
            return Ok(());
        }
        let gap = &self.input[self.position..end];
        match gap.char_indices().find(|(_, ch)| !ch.is_whitespace()) {
            Some((offset, ch)) => Err(LexError::UnexpectedCharacter {
                ch,
                position: Position::locate(&self.input, self.position + offset),
            }),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: LexError) -> Option<Result<Token, LexError>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(captures) = TOKEN_PATTERN.captures_at(&self.input, self.position) else {
            self.finished = true;
            if let Err(err) = self.check_gap(self.input.len()) {
                return Some(Err(err));
            }
            self.position = self.input.len();
            return None;
        };

        let Some((kind, matched)) = RULES
            .iter()
            .enumerate()
            .find_map(|(i, (_, kind))| captures.get(i + 1).map(|m| (*kind, m)))
        else {
            self.finished = true;
            return None;
        };

        if let Err(err) = self.check_gap(matched.start()) {
            return self.fail(err);
        }

        self.position = matched.end();
        let token = Token::new(
            kind,
            matched.as_str(),
            Span::new(matched.start(), matched.end()),
        );
        tracing::trace!(kind = %token.kind, text = %token.text, "token");
        Some(Ok(token))
    }
}

/// Tokenize a whole source string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}
