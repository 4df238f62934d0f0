//! ahkls_parser: the AutoHotkey statement and expression parser.
//!
//! Single-pass recursive descent over a precedence-climbing expression core,
//! with bounded backtracking for the `id(...)` call-vs-definition ambiguity
//! and per-statement error recovery.

pub mod parse_error;
pub mod parser;
pub mod precedence;
pub mod token_buffer;

pub use parse_error::{ParseError, ParseFailure, ParseResult};
pub use parser::{ParsedDocument, Parser};
pub use token_buffer::TokenBuffer;
