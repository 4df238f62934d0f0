//! The token type produced by the scanner and stored in AST nodes.

use crate::node::SyntaxNode;
use crate::token_kind::TokenKind;
use ahkls_core::{Position, Range};
use std::fmt;

/// A scanned token: category, raw lexeme, and document range.
///
/// `content` is the exact source text of the lexeme (string literals keep
/// their quotes, labels their trailing colon) so that reconstructing a node
/// from its tokens re-tokenizes to the same stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            content: content.into(),
            start,
            end,
        }
    }

    pub fn range(&self) -> Range {
        Range::new(self.start, self.end)
    }
}

impl SyntaxNode for Token {
    fn start(&self) -> Position {
        self.start
    }

    fn end(&self) -> Position {
        self.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        vec![self.content.clone()]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.content)
    }
}
