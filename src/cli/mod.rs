//! CLI support for dfql
//!
//! Programmatic access to the command-line operations, so other tools can embed
//! translation without going through the binary.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, Emit, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parser error
    Parse(crate::ParseError),
    /// Code generation error
    Generate(crate::GenerateError),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Generate(e) => write!(f, "Generation error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(
                f,
                "No input provided. Pass a query, use --file, or pipe source to stdin."
            ),
            CliError::UnknownCategory(c) => {
                write!(f, "Unknown category: '{}'\nRun 'dfql docs' to see available categories.", c)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Generate(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::GenerateError> for CliError {
    fn from(e: crate::GenerateError) -> Self {
        CliError::Generate(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
