//! Parse a dfql program and emit code, its AST, or a syntax verdict

use super::CliError;
use crate::{Generator, GeneratorOptions, Lexer, Parser, output::program_to_json};

/// What a check run should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Generated DataFrame code
    #[default]
    Code,
    /// The parsed AST as JSON
    Ast,
    /// Nothing beyond validating syntax
    SyntaxOnly,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The dfql source text
    pub query: String,
    /// What to produce
    pub emit: Emit,
    /// Skip characters no token rule matches instead of failing
    pub permissive: bool,
    /// Table to select from when a block names none
    pub default_source: Option<String>,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Generated code
    Code(String),
    /// Parsed program as JSON
    Ast(serde_json::Value),
}

/// Execute a dfql check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = &options.query;
    if query.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let lexer = if options.permissive {
        Lexer::permissive(query)
    } else {
        Lexer::new(query)
    };
    let program = Parser::new(lexer)?.parse()?;

    match options.emit {
        Emit::SyntaxOnly => Ok(CheckResult::SyntaxValid),
        Emit::Ast => Ok(CheckResult::Ast(program_to_json(&program))),
        Emit::Code => {
            let generator = Generator::with_options(GeneratorOptions {
                default_source: options.default_source.clone(),
                ..GeneratorOptions::default()
            });
            Ok(CheckResult::Code(generator.generate(&program)?))
        }
    }
}
