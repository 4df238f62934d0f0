//! ahkls_scanner: the AutoHotkey tokenizer.
//!
//! Converts source text into a stream of tokens, one at a time, under a
//! context hint from the parser: the same characters lex differently
//! depending on whether hotkey syntax is expected (`^!c::`, `:*:btw::`,
//! `mylabel:`, `#Include`) or ordinary expression syntax.

pub mod tokenizer;

pub use tokenizer::{ScanResult, Tokenizer};
