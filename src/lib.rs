pub mod ast;
pub mod cli;
pub mod generator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod source;

pub use ast::{BinOp, Expr, Program, Statement, Token, TokenKind};
pub use generator::{GenerateError, Generator, GeneratorOptions};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};

use thiserror::Error;

/// Any failure of a full source-to-code translation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
}

/// Parse source text into a program.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(Lexer::new(source))?.parse()
}

/// Generate DataFrame code for a program with default options.
pub fn generate(program: &Program) -> Result<String, GenerateError> {
    generator::generate(program)
}

/// Parse and generate in one step.
pub fn transpile(source: &str) -> Result<String, Error> {
    let program = parse(source)?;
    Ok(generate(&program)?)
}
