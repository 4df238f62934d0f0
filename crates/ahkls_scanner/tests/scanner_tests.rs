//! Scanner integration tests.
//!
//! Drives the tokenizer the way the parser does: one token at a time, with
//! the previous token's kind as the disambiguation hint.

use ahkls_ast::{Token, TokenKind};
use ahkls_diagnostics::Diagnostic;
use ahkls_scanner::{ScanResult, Tokenizer};

/// Drain a tokenizer into real tokens, comments, and diagnostics.
fn lex_all(source: &str, hotkey_mode: bool) -> (Vec<Token>, Vec<Token>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(source);
    tokenizer.set_hotkey_mode(hotkey_mode);
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    let mut diagnostics = Vec::new();
    let mut prev = TokenKind::Eol;

    loop {
        match tokenizer.next(prev) {
            ScanResult::Token(token) => {
                prev = token.kind;
                let done = token.kind == TokenKind::Eof;
                tokens.push(token);
                if done {
                    break;
                }
            }
            ScanResult::Comment(comment) => {
                comments.push(comment);
                prev = TokenKind::Unknown;
            }
            ScanResult::Diagnostic(diagnostic) => {
                diagnostics.push(diagnostic);
                prev = TokenKind::Unknown;
            }
        }
    }
    (tokens, comments, diagnostics)
}

fn lex_kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, _, _) = lex_all(source, true);
    tokens.into_iter().map(|t| t.kind).collect()
}

// ============================================================================
// Core lexemes
// ============================================================================

#[test]
fn test_assignment_line() {
    assert_eq!(
        lex_kinds("x := 1\n"),
        vec![
            TokenKind::Id,
            TokenKind::Aassign,
            TokenKind::Number,
            TokenKind::Eol,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        lex_kinds("WHILE While while\n")[..3],
        [TokenKind::While, TokenKind::While, TokenKind::While]
    );
}

#[test]
fn test_word_operators() {
    assert_eq!(
        lex_kinds("a and b or not c\n")[..6],
        [
            TokenKind::Id,
            TokenKind::LogicAnd,
            TokenKind::Id,
            TokenKind::LogicOr,
            TokenKind::Not,
            TokenKind::Id,
        ]
    );
}

#[test]
fn test_compound_operators_longest_match() {
    assert_eq!(
        lex_kinds("a //= b << c >>= d ** e\n")[..9],
        [
            TokenKind::Id,
            TokenKind::FloorDivEqual,
            TokenKind::Id,
            TokenKind::LeftShift,
            TokenKind::Id,
            TokenKind::RshiftEqual,
            TokenKind::Id,
            TokenKind::Power,
            TokenKind::Id,
        ]
    );
}

#[test]
fn test_dot_member_access_vs_concatenation() {
    assert_eq!(
        lex_kinds("a.b\n")[..3],
        [TokenKind::Id, TokenKind::Dot, TokenKind::Id]
    );
    assert_eq!(
        lex_kinds("a . b\n")[..3],
        [TokenKind::Id, TokenKind::Sconnect, TokenKind::Id]
    );
    assert_eq!(
        lex_kinds("a .= b\n")[..3],
        [TokenKind::Id, TokenKind::ConcatEqual, TokenKind::Id]
    );
}

#[test]
fn test_number_forms() {
    let (tokens, _, _) = lex_all("12 3.5 0x1F\n", true);
    assert_eq!(tokens[0].content, "12");
    assert_eq!(tokens[1].content, "3.5");
    assert_eq!(tokens[2].content, "0x1F");
    assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_string_keeps_quotes_and_escape() {
    let (tokens, _, _) = lex_all("x := \"he said \"\"hi\"\"\"\n", true);
    let string = tokens
        .iter()
        .find(|t| t.kind == TokenKind::String)
        .expect("string token");
    assert_eq!(string.content, "\"he said \"\"hi\"\"\"");
}

#[test]
fn test_unterminated_string_is_a_diagnostic() {
    let (tokens, _, diagnostics) = lex_all("x := \"oops\n", true);
    assert_eq!(diagnostics.len(), 1);
    // the stream continues with the line terminator
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Eol));
}

#[test]
fn test_invalid_character_is_a_diagnostic() {
    let (_, _, diagnostics) = lex_all("x := 'abc'\n", true);
    assert!(!diagnostics.is_empty());
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_line_comment_routed_to_side_channel() {
    let (tokens, comments, _) = lex_all("; setup\nx := 1\n", true);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "; setup");
    assert_eq!(tokens[0].kind, TokenKind::Eol);
    assert_eq!(tokens[1].kind, TokenKind::Id);
}

#[test]
fn test_block_comment_routed_to_side_channel() {
    let (tokens, comments, _) = lex_all("/* a\nb */\nx := 1\n", true);
    assert_eq!(comments.len(), 1);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Id));
}

// ============================================================================
// Hotkey-sensitive lexing
// ============================================================================

#[test]
fn test_hotkey_line() {
    assert_eq!(
        lex_kinds("^!c::\n")[..3],
        [TokenKind::Key, TokenKind::Hotkey, TokenKind::Eol]
    );
}

#[test]
fn test_combined_hotkey_line() {
    assert_eq!(
        lex_kinds("a & b::\n")[..4],
        [
            TokenKind::Key,
            TokenKind::HotkeyAnd,
            TokenKind::Key,
            TokenKind::Hotkey,
        ]
    );
}

#[test]
fn test_hotkey_lexing_suspended_in_expression_mode() {
    let (tokens, _, _) = lex_all("x::y\n", false);
    assert_eq!(
        tokens[..3].iter().map(|t| t.kind).collect::<Vec<_>>(),
        [TokenKind::Id, TokenKind::Hotkey, TokenKind::Id]
    );
}

#[test]
fn test_hotstring_line() {
    let (tokens, _, _) = lex_all(":*:btw::by the way\n", true);
    assert_eq!(tokens[0].kind, TokenKind::HotstringOpen);
    assert_eq!(tokens[0].content, ":*:");
    assert_eq!(tokens[1].kind, TokenKind::HotstringEnd);
    assert_eq!(tokens[1].content, "btw::");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].content, "by the way");
}

#[test]
fn test_label_requires_its_own_line() {
    let (tokens, _, _) = lex_all("finish:\n", true);
    assert_eq!(tokens[0].kind, TokenKind::Label);
    assert_eq!(tokens[0].content, "finish:");

    // an associative-array style `key: value` is not a label
    let (tokens, _, _) = lex_all("a: 1\n", true);
    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[1].kind, TokenKind::Colon);
}

#[test]
fn test_directive_token() {
    let (tokens, _, _) = lex_all("#NoEnv\n", true);
    assert_eq!(tokens[0].kind, TokenKind::Directive);
    assert_eq!(tokens[0].content, "#NoEnv");
}

#[test]
fn test_literal_mode_takes_rest_of_line() {
    let mut tokenizer = Tokenizer::new("#Include lib\\a.ahk\n");
    let first = match tokenizer.next(TokenKind::Eol) {
        ScanResult::Token(t) => t,
        other => panic!("expected token, got {other:?}"),
    };
    assert_eq!(first.kind, TokenKind::Directive);

    tokenizer.set_literal_mode(true);
    let path = match tokenizer.next(first.kind) {
        ScanResult::Token(t) => t,
        other => panic!("expected token, got {other:?}"),
    };
    assert_eq!(path.kind, TokenKind::String);
    assert_eq!(path.content, "lib\\a.ahk");
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_token_positions_track_lines_and_columns() {
    let (tokens, _, _) = lex_all("x := 1\ny := 2\n", true);
    let second_id = &tokens[4];
    assert_eq!(second_id.kind, TokenKind::Id);
    assert_eq!(second_id.start.line, 1);
    assert_eq!(second_id.start.character, 0);
    assert_eq!(second_id.end.character, 1);
}

#[test]
fn test_every_token_range_is_monotonic() {
    let (tokens, _, _) = lex_all("f(a, b) {\nreturn a + b\n}\n", true);
    for token in &tokens {
        assert!(token.start <= token.end, "token {token}");
    }
}
