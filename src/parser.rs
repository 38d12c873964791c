use thiserror::Error;

use crate::{
    ast::{
        BinOp, ColumnAssignment, Expr, Filter, FilterBody, FilterKind, JoinKind, Program,
        Statement, Token, TokenKind, UnaryOp, UnionKind,
    },
    lexer::{LexError, Lexer, Position},
};

/// Errors raised while parsing. All of them abort the parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected token '{text}' ({found}) at {position}: expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        text: String,
        position: Position,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },
}

type ParseResult<T> = Result<T, ParseError>;

/// Operand parser for one precedence tier.
type Tier = fn(&mut Parser) -> ParseResult<Expr>;

/// Recursive-descent parser with one token of lookahead.
pub struct Parser {
    lexer: Lexer,
    current_token: Option<Token>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> ParseResult<Self> {
        let current_token = lexer.next().transpose()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.current_token = self.lexer.next().transpose()?;
        Ok(())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.as_ref().is_some_and(|t| t.is(kind))
    }

    fn check_keyword(&self, words: &[&str]) -> bool {
        self.current_token
            .as_ref()
            .is_some_and(|t| t.is_keyword(words))
    }

    /// The current token, or an end-of-input error naming what was expected.
    fn peek(&self, expected: &str) -> ParseResult<&Token> {
        self.current_token
            .as_ref()
            .ok_or_else(|| ParseError::UnexpectedEof {
                expected: expected.to_string(),
            })
    }

    fn unexpected(&self, token: &Token, expected: impl Into<String>) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: token.kind,
            text: token.text.clone(),
            position: Position::locate(self.lexer.input(), token.span.start),
        }
    }

    /// Consume and return the current token if it has the expected kind.
    ///
    /// Exhausted input is checked before the kind comparison.
    fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        let token = self.peek(expected.name())?;
        if !token.is(expected) {
            return Err(self.unexpected(token, expected.name()));
        }
        self.take()
    }

    fn expect_keyword(&mut self, word: &str) -> ParseResult<Token> {
        let expected = format!("'{}'", word);
        let token = self.peek(&expected)?;
        if !token.is_keyword(&[word]) {
            return Err(self.unexpected(token, expected));
        }
        self.take()
    }

    /// Move the current token out and advance past it.
    fn take(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next().transpose()?;
        match std::mem::replace(&mut self.current_token, next) {
            Some(token) => Ok(token),
            None => Err(ParseError::UnexpectedEof {
                expected: "token".to_string(),
            }),
        }
    }

    /// Parse a complete program: statements until the token stream is exhausted.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut statements = vec![];
        while self.current_token.is_some() {
            statements.push(self.parse_statement()?);
        }
        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.peek("statement")?;

        if token.is_keyword(&["let"]) {
            self.parse_variable_assignment()
        } else if token.is(TokenKind::LBrace) {
            self.parse_block()
        } else if token.is_keyword(&FilterKind::KEYWORDS) {
            self.parse_filter_list()
        } else if token.is(TokenKind::Identifier) {
            self.parse_column_list()
        } else {
            Ok(Statement::Expression(self.parse_expression()?))
        }
    }

    fn parse_variable_assignment(&mut self) -> ParseResult<Statement> {
        self.expect_keyword("let")?;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Equals)?;

        let value = if self.check(TokenKind::LBrace) {
            self.parse_block()?
        } else {
            Statement::Expression(self.parse_expression()?)
        };

        Ok(Statement::VariableAssignment {
            name,
            value: Box::new(value),
        })
    }

    fn parse_block(&mut self) -> ParseResult<Statement> {
        self.expect(TokenKind::LBrace)?;

        let modifier = if self.check_keyword(&["distinct"]) {
            Some(self.take()?.text)
        } else {
            None
        };

        let mut body = vec![];
        loop {
            let token = self.peek(TokenKind::RBrace.name())?;
            if token.is(TokenKind::RBrace) {
                break;
            }
            body.push(self.parse_block_item()?);
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Statement::Block { modifier, body })
    }

    /// Inside a block anything that is not a clause, binding or nested block
    /// starts a column list, including keyword-headed calls like `count(id)`.
    fn parse_block_item(&mut self) -> ParseResult<Statement> {
        let token = self.peek("statement")?;

        if token.is_keyword(&FilterKind::KEYWORDS) {
            self.parse_filter_list()
        } else if token.is_keyword(&["let"]) {
            self.parse_variable_assignment()
        } else if token.is(TokenKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_column_list()
        }
    }

    fn parse_filter_list(&mut self) -> ParseResult<Statement> {
        let mut filters = vec![self.parse_filter()?];
        while self.check_keyword(&FilterKind::KEYWORDS) {
            filters.push(self.parse_filter()?);
        }
        Ok(Statement::FilterList(filters))
    }

    fn parse_filter(&mut self) -> ParseResult<Filter> {
        let token = self.peek("where, having or group by")?;
        let Some(kind) = token
            .is(TokenKind::Keyword)
            .then(|| FilterKind::from_text(&token.text))
            .flatten()
        else {
            return Err(self.unexpected(token, "where, having or group by"));
        };
        self.advance()?;

        let body = match kind {
            FilterKind::GroupBy => FilterBody::Statement(Box::new(self.parse_statement()?)),
            FilterKind::Where | FilterKind::Having => {
                FilterBody::Expression(self.parse_expression()?)
            }
        };

        Ok(Filter { kind, body })
    }

    fn parse_column_list(&mut self) -> ParseResult<Statement> {
        let mut columns = vec![self.parse_column_assignment()?];
        while self.check(TokenKind::Comma) {
            self.advance()?;
            columns.push(self.parse_column_assignment()?);
        }
        Ok(Statement::ColumnList(columns))
    }

    fn parse_column_assignment(&mut self) -> ParseResult<ColumnAssignment> {
        let name = self.parse_expression()?;
        let value = if self.check(TokenKind::Colon) {
            self.advance()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(ColumnAssignment { name, value })
    }
}

// Expression precedence ladder, loosest first. Every tier parses operands at the
// next tighter tier and folds its own operators to the left.
impl Parser {
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_over()
    }

    fn parse_over(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_join_union, TokenKind::Over)
    }

    fn parse_join_union(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_or()?;

        while self.check(TokenKind::Joins) {
            let operator = self.take()?;
            let right = self.parse_or()?;

            left = if let Some(kind) = JoinKind::from_text(&operator.text) {
                self.expect_keyword("on")?;
                let condition = self.parse_or()?;
                Expr::Join {
                    kind,
                    left: Box::new(left),
                    right: Box::new(right),
                    condition: Box::new(condition),
                }
            } else if let Some(kind) = UnionKind::from_text(&operator.text) {
                Expr::Union {
                    kind,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            } else {
                return Err(self.unexpected(&operator, TokenKind::Joins.name()));
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_and, TokenKind::Or)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_equality, TokenKind::And)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_relational, TokenKind::Equality)
    }

    fn parse_relational(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_additive, TokenKind::Comparison)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_multiplicative, TokenKind::Additive)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_binary(Parser::parse_membership, TokenKind::Multiplicative)
    }

    fn parse_membership(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        while self.check(TokenKind::Membership) {
            self.advance()?;
            let right = self.parse_unary()?;

            left = Expr::Membership {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if !self.check(TokenKind::Additive) {
            return self.parse_primary();
        }

        let token = self.take()?;
        let Some(op) = UnaryOp::from_text(&token.text) else {
            return Err(self.unexpected(&token, "'+' or '-'"));
        };
        let argument = self.parse_primary()?;

        Ok(Expr::Unary {
            op,
            argument: Box::new(argument),
        })
    }

    fn parse_binary(&mut self, operand: Tier, kind: TokenKind) -> ParseResult<Expr> {
        let mut left = operand(self)?;

        while self.check(kind) {
            let token = self.take()?;
            let Some(op) = BinOp::from_text(&token.text) else {
                return Err(self.unexpected(&token, kind.name()));
            };
            let right = operand(self)?;

            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek("expression")?;
        let kind = token.kind;
        let keyword = (kind == TokenKind::Keyword).then(|| token.text.clone());

        match (kind, keyword.as_deref()) {
            (TokenKind::Identifier, _) => self.parse_identifier(),
            (TokenKind::Keyword, Some("match")) => self.parse_match(),
            (TokenKind::Keyword, Some("case")) => self.parse_case(),
            (TokenKind::Keyword, Some("project")) => self.parse_project(),
            (TokenKind::Keyword, Some("partition by")) => self.parse_partition_by(),
            (TokenKind::Keyword, _) => self.parse_function(),
            (TokenKind::LParen, _) => self.parse_parenthesized(),
            (TokenKind::LBracket, _) => self.parse_array(),
            _ => self.parse_literal(),
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<Expr> {
        let mut segments = vec![self.expect(TokenKind::Identifier)?.text];
        while self.check(TokenKind::Dot) {
            self.advance()?;
            segments.push(self.expect(TokenKind::Identifier)?.text);
        }

        let source_table = (segments.len() > 1).then(|| segments[0].clone());
        Ok(Expr::Identifier {
            value: segments.join("."),
            source_table,
        })
    }

    fn parse_match(&mut self) -> ParseResult<Expr> {
        self.expect_keyword("match")?;
        self.expect(TokenKind::LBrace)?;

        let mut cases = vec![];
        loop {
            let token = self.peek(TokenKind::RBrace.name())?;
            if token.is(TokenKind::RBrace) {
                break;
            }
            cases.push(self.parse_case()?);
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Expr::Match(cases))
    }

    fn parse_case(&mut self) -> ParseResult<Expr> {
        self.expect_keyword("case")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::FatArrow)?;
        let value = self.parse_expression()?;

        Ok(Expr::Case {
            condition: Box::new(condition),
            value: Box::new(value),
        })
    }

    fn parse_project(&mut self) -> ParseResult<Expr> {
        self.expect_keyword("project")?;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect_keyword("as")?;
        let body = self.parse_statement()?;

        Ok(Expr::Project {
            name,
            body: Box::new(body),
        })
    }

    fn parse_partition_by(&mut self) -> ParseResult<Expr> {
        self.expect_keyword("partition by")?;
        let mut columns = vec![self.parse_expression()?];
        while self.check(TokenKind::Comma) {
            self.advance()?;
            columns.push(self.parse_expression()?);
        }
        Ok(Expr::PartitionBy(columns))
    }

    fn parse_function(&mut self) -> ParseResult<Expr> {
        let name = self.expect(TokenKind::Keyword)?.text;
        self.expect(TokenKind::LParen)?;

        let mut args = vec![];
        if !self.check(TokenKind::RParen) {
            args.push(self.parse_expression()?);
            while self.check(TokenKind::Comma) {
                self.advance()?;
                args.push(self.parse_expression()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        Ok(Expr::Function { name, args })
    }

    fn parse_parenthesized(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let body = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(Expr::Parenthesized(Box::new(body)))
    }

    /// Arrays hold literals only; separating commas are optional.
    fn parse_array(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LBracket)?;

        let mut items = vec![];
        loop {
            let token = self.peek(TokenKind::RBracket.name())?;
            if token.is(TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_literal()?);
            if self.check(TokenKind::Comma) {
                self.advance()?;
            }
        }
        self.expect(TokenKind::RBracket)?;

        Ok(Expr::Array(items))
    }

    fn parse_literal(&mut self) -> ParseResult<Expr> {
        let kind = self.peek("literal")?.kind;

        match kind {
            TokenKind::String => {
                let token = self.take()?;
                let text = token.text.as_str();
                // Quotes are always single-byte ASCII.
                Ok(Expr::String(text[1..text.len() - 1].to_string()))
            }
            TokenKind::Number => Ok(Expr::Number(self.take()?.text)),
            _ => {
                self.expect(TokenKind::Null)?;
                Ok(Expr::Null)
            }
        }
    }
}
