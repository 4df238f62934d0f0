//! The script-level artifact produced by a whole-document parse.

use crate::stmt::Stmt;
use crate::token::Token;
use indexmap::IndexSet;

/// Everything a downstream consumer (symbol-table builder, editor features)
/// needs from one parsed document: the statement tree, the verbatim token
/// stream, collected comments, and the raw include paths encountered.
/// Immutable once built; discarded wholesale on the next reparse.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// The document this script was parsed from.
    pub uri: String,
    /// Top-level statements in source order.
    pub statements: Vec<Stmt>,
    /// Every token fetched during the parse, for verbatim reconstruction.
    pub tokens: Vec<Token>,
    /// Comment pseudo-tokens, attached to the script rather than any
    /// statement.
    pub comments: Vec<Token>,
    /// Raw `#Include` path literals, in first-seen order.
    pub includes: IndexSet<String>,
}

impl Script {
    pub fn new(
        uri: impl Into<String>,
        statements: Vec<Stmt>,
        tokens: Vec<Token>,
        comments: Vec<Token>,
        includes: IndexSet<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            statements,
            tokens,
            comments,
            includes,
        }
    }

    /// The degraded result used when a parse aborts on an internal failure.
    pub fn empty(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }
}
