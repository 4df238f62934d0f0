//! Structural and internal parse failures.
//!
//! A structural (syntax) error is an ordinary value: it travels up through
//! the recursive descent as the `Err` arm of each parsing function's result
//! and is converted to an `Invalid` node plus a diagnostic at the nearest
//! recovery boundary. An internal failure is not recovered; it aborts the
//! whole document parse, which then degrades to an empty script.

use ahkls_ast::Token;
use ahkls_diagnostics::Diagnostic;
use thiserror::Error;

/// A structural error: the grammar could not be satisfied at `token`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    /// The offending token the error is anchored to.
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.token.range(), self.message.clone())
    }
}

/// Everything a parsing function can fail with.
#[derive(Debug, Clone, Error)]
pub enum ParseFailure {
    /// Recovered at the nearest statement/expression boundary.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    /// Not recovered; surfaces as a degraded empty script.
    #[error("internal parser failure: {0}")]
    Internal(String),
}

pub type ParseResult<T> = Result<T, ParseFailure>;
