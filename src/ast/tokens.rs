use std::fmt;

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the start.
    pub start: usize,
    /// Byte offset of the end (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

/// Category of a matched source substring.
///
/// The set is closed: every token the lexer emits carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Membership operator
    ///
    /// # Examples
    /// ```text
    /// status in ['open' 'closed']
    /// ```
    Membership,

    /// Separates a case condition from its value
    ///
    /// # Examples
    /// ```text
    /// case amount > 100 => 'large'
    /// ```
    FatArrow,

    /// Separates a column alias from its value
    ///
    /// # Examples
    /// ```text
    /// total: sum(amount)
    /// ```
    Colon,

    /// Logical OR (word, not symbol)
    Or,

    /// Logical AND (word, not symbol)
    And,

    /// Relational comparison: `>`, `>=`, `<`, `<=`, `==`, `!=`
    Comparison,

    /// `*` or `/`
    Multiplicative,

    /// `+` or `-`, both binary and prefix
    Additive,

    /// Dedicated `==` kind.
    ///
    /// The comparison rule is matched first, so source text never produces this
    /// kind. The parser still owns an equality tier for it.
    Equality,

    /// Variable binding
    ///
    /// # Examples
    /// ```text
    /// let orders = { ... }
    /// ```
    Equals,

    /// Dotted column access
    ///
    /// # Examples
    /// ```text
    /// orders.customer_id
    /// ```
    Dot,

    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,

    /// Window application
    ///
    /// # Examples
    /// ```text
    /// sum(amount) over partition by region
    /// ```
    Over,

    /// Join and set operators: `join`, `left join`, `right join`, `union`, `union all`
    Joins,

    /// Reserved words such as `let`, `where`, `group by`, `count`, `match`
    Keyword,

    /// The `null` literal
    Null,

    /// Integer or decimal literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 1.50
    /// ```
    Number,

    /// Quoted string literal, single or double quotes
    String,

    /// Table, column or variable name
    ///
    /// # Examples
    /// ```text
    /// orders
    /// customer_id
    /// _
    /// ```
    Identifier,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Membership => "MEMBERSHIP_OPERATOR",
            TokenKind::FatArrow => "FAT_ARROW",
            TokenKind::Colon => "COLON",
            TokenKind::Or => "LOGICAL_OR",
            TokenKind::And => "LOGICAL_AND",
            TokenKind::Comparison => "COMPARISON_OPERATOR",
            TokenKind::Multiplicative => "MULTIPLICATIVE_OPERATOR",
            TokenKind::Additive => "ADDITIVE_OPERATOR",
            TokenKind::Equality => "EQUALITY",
            TokenKind::Equals => "EQUALS",
            TokenKind::Dot => "DOT",
            TokenKind::Comma => "COMMA",
            TokenKind::LBracket => "OPENING_SQUARE_BRACKET",
            TokenKind::RBracket => "CLOSING_SQUARE_BRACKET",
            TokenKind::LParen => "OPENING_PARENTHESIS",
            TokenKind::RParen => "CLOSING_PARENTHESIS",
            TokenKind::LBrace => "OPENING_CURLY_BRACKET",
            TokenKind::RBrace => "CLOSING_CURLY_BRACKET",
            TokenKind::Over => "OVER",
            TokenKind::Joins => "JOINS",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Null => "NULL",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token: its kind, the exact matched text, and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Matched substring. String tokens keep their quotes.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True when this is a keyword token whose text is one of `words`.
    pub fn is_keyword(&self, words: &[&str]) -> bool {
        self.kind == TokenKind::Keyword && words.contains(&self.text.as_str())
    }
}
