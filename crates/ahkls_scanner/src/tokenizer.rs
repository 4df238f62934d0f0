//! The AutoHotkey scanner.
//!
//! A character-cursor lexer over the source text. Each call to `next`
//! produces one result: a real token, a comment pseudo-token, or a
//! diagnostic pseudo-token for malformed input. The parser filters the
//! pseudo-tokens out before they reach the grammar.
//!
//! Two mode flags make the lexing context-sensitive:
//!
//! - `is_parse_hotkey`: while set, a line can open with hotkey syntax
//!   (`key::`, `key & key::`), a hotstring (`:opts:trigger::expansion`), a
//!   label (`name:`), or a directive (`#name`). The parser clears this for
//!   the full extent of expression parsing, where those characters are plain
//!   operators.
//! - `is_literal_token`: one-shot; the next token is the rest of the line
//!   taken verbatim (the `#Include` path form). Self-clears.

use ahkls_ast::{keyword_kind, Token, TokenKind};
use ahkls_core::{Position, Range};
use ahkls_diagnostics::Diagnostic;
use unicode_xid::UnicodeXID;

/// One scanner step: a token for the grammar, or a pseudo-token routed to
/// the comment / lexical-error side channels.
#[derive(Debug, Clone)]
pub enum ScanResult {
    Token(Token),
    Comment(Token),
    Diagnostic(Diagnostic),
}

/// Progress through a hotstring line: `:opts:` then `trigger::` then the
/// expansion text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HotstringState {
    None,
    Trigger,
    Expansion,
}

pub struct Tokenizer {
    text: Vec<char>,
    pos: usize,
    line: u32,
    character: u32,
    is_parse_hotkey: bool,
    is_literal_token: bool,
    /// Lexing the key part of a recognized hotkey line.
    in_hotkey_line: bool,
    hotstring: HotstringState,
    /// Whitespace was skipped immediately before the current token.
    had_space: bool,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            line: 0,
            character: 0,
            is_parse_hotkey: true,
            is_literal_token: false,
            in_hotkey_line: false,
            hotstring: HotstringState::None,
            had_space: false,
        }
    }

    /// Rewind to the top of the document, clearing all mid-line state.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.line = 0;
        self.character = 0;
        self.is_literal_token = false;
        self.in_hotkey_line = false;
        self.hotstring = HotstringState::None;
        self.had_space = false;
    }

    /// Enable or suspend hotkey-sensitive lexing. Suspended for the full
    /// extent of expression parsing.
    pub fn set_hotkey_mode(&mut self, on: bool) {
        self.is_parse_hotkey = on;
    }

    pub fn hotkey_mode(&self) -> bool {
        self.is_parse_hotkey
    }

    /// Take the next token as a literal rest-of-line path (one-shot).
    pub fn set_literal_mode(&mut self, on: bool) {
        self.is_literal_token = on;
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    fn position(&self) -> Position {
        Position::new(self.line, self.character)
    }

    /// Advance one character, keeping the line/character position current.
    fn bump(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.character = 0;
        } else {
            self.character += 1;
        }
        Some(ch)
    }

    /// Skip spaces, tabs, and carriage returns (never newlines; those are
    /// tokens).
    fn skip_blank(&mut self) {
        self.had_space = false;
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.had_space = true;
                    self.bump();
                }
                _ => break,
            }
        }
    }

    fn token(&self, kind: TokenKind, content: impl Into<String>, start: Position) -> ScanResult {
        ScanResult::Token(Token::new(kind, content, start, self.position()))
    }

    // ========================================================================
    // Entry point
    // ========================================================================

    /// Scan the next result. `prev` is the category of the previous
    /// significant token, the disambiguation hint: a preceding line
    /// terminator puts the scanner at line-start context.
    pub fn next(&mut self, prev: TokenKind) -> ScanResult {
        if self.is_literal_token {
            self.is_literal_token = false;
            if let Some(result) = self.scan_literal_path() {
                return result;
            }
        }

        self.skip_blank();

        let start = self.position();
        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return self.token(TokenKind::Eof, "", start),
        };

        if ch == '\n' {
            self.bump();
            self.in_hotkey_line = false;
            self.hotstring = HotstringState::None;
            return self.token(TokenKind::Eol, "\n", start);
        }

        // Comments never reach the grammar.
        if ch == ';' {
            return self.scan_line_comment(start);
        }
        let line_start = prev == TokenKind::Eol;
        if line_start && ch == '/' && self.char_at(1) == Some('*') {
            return self.scan_block_comment(start);
        }

        match self.hotstring {
            HotstringState::Trigger => return self.scan_hotstring_trigger(start),
            HotstringState::Expansion => {
                self.hotstring = HotstringState::None;
                return self.scan_rest_of_line(TokenKind::String, start);
            }
            HotstringState::None => {}
        }

        if self.in_hotkey_line {
            return self.scan_hotkey_component(start);
        }

        if self.is_parse_hotkey && line_start {
            if ch == ':' && self.char_at(1) != Some('=') {
                if let Some(result) = self.try_scan_hotstring_open(start) {
                    return result;
                }
            }
            if ch == '#' && self.char_at(1).map_or(false, is_id_start) {
                return self.scan_directive(start);
            }
            if self.line_has_hotkey() {
                self.in_hotkey_line = true;
                return self.scan_hotkey_component(start);
            }
        }

        if is_id_start(ch) {
            return self.scan_identifier(start, line_start);
        }
        if ch.is_ascii_digit() {
            return self.scan_number(start);
        }
        if ch == '"' {
            return self.scan_string(start);
        }

        self.scan_operator(start)
    }

    // ========================================================================
    // Comments and literals
    // ========================================================================

    fn scan_line_comment(&mut self, start: Position) -> ScanResult {
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            content.push(ch);
            self.bump();
        }
        ScanResult::Comment(Token::new(TokenKind::Unknown, content, start, self.position()))
    }

    fn scan_block_comment(&mut self, start: Position) -> ScanResult {
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '*' && self.char_at(1) == Some('/') {
                content.push('*');
                content.push('/');
                self.bump();
                self.bump();
                return ScanResult::Comment(Token::new(
                    TokenKind::Unknown,
                    content,
                    start,
                    self.position(),
                ));
            }
            content.push(ch);
            self.bump();
        }
        ScanResult::Diagnostic(Diagnostic::error(
            Range::new(start, self.position()),
            "Unterminated block comment",
        ))
    }

    /// The `#Include` path form: the rest of the line, verbatim, surrounding
    /// whitespace trimmed. Returns None when the line is already spent.
    fn scan_literal_path(&mut self) -> Option<ScanResult> {
        self.skip_blank();
        let start = self.position();
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            content.push(ch);
            self.bump();
        }
        let trimmed = content.trim_end();
        if trimmed.is_empty() {
            return None;
        }
        Some(ScanResult::Token(Token::new(
            TokenKind::String,
            trimmed,
            start,
            self.position(),
        )))
    }

    fn scan_rest_of_line(&mut self, kind: TokenKind, start: Position) -> ScanResult {
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            content.push(ch);
            self.bump();
        }
        self.token(kind, content, start)
    }

    // ========================================================================
    // Hotkeys, hotstrings, directives, labels
    // ========================================================================

    /// Whether the rest of the current line reads as a hotkey declaration:
    /// a `::` preceded only by key-name characters.
    fn line_has_hotkey(&self) -> bool {
        let mut i = self.pos;
        let mut seen_key_char = false;
        while let Some(&ch) = self.text.get(i) {
            match ch {
                '\n' => return false,
                ':' => return seen_key_char && self.text.get(i + 1) == Some(&':'),
                c if c.is_alphanumeric()
                    || c.is_ascii_whitespace()
                    || "#!^+<>*~$&_@,.'-".contains(c) =>
                {
                    if !c.is_ascii_whitespace() {
                        seen_key_char = true;
                    }
                    i += 1;
                }
                _ => return false,
            }
        }
        false
    }

    /// One component of a recognized hotkey line: a key cluster, the `&`
    /// combiner, or the closing `::`.
    fn scan_hotkey_component(&mut self, start: Position) -> ScanResult {
        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return self.token(TokenKind::Eof, "", start),
        };
        if ch == '&' {
            self.bump();
            return self.token(TokenKind::HotkeyAnd, "&", start);
        }
        if ch == ':' && self.char_at(1) == Some(':') {
            self.bump();
            self.bump();
            self.in_hotkey_line = false;
            return self.token(TokenKind::Hotkey, "::", start);
        }
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_whitespace() || ch == '&' {
                break;
            }
            if ch == ':' && self.char_at(1) == Some(':') {
                break;
            }
            content.push(ch);
            self.bump();
        }
        self.token(TokenKind::Key, content, start)
    }

    /// `:options:` at line start. Only commits when a second colon closes the
    /// option block on the same line; otherwise the colon lexes as an
    /// operator.
    fn try_scan_hotstring_open(&mut self, start: Position) -> Option<ScanResult> {
        let mut i = self.pos + 1;
        while let Some(&ch) = self.text.get(i) {
            if ch == ':' {
                let mut content = String::new();
                while self.pos <= i {
                    content.push(self.bump()?);
                }
                self.hotstring = HotstringState::Trigger;
                return Some(self.token(TokenKind::HotstringOpen, content, start));
            }
            if ch == '\n' || !(ch.is_alphanumeric() || "*?!-".contains(ch)) {
                return None;
            }
            i += 1;
        }
        None
    }

    /// The hotstring trigger text, through and including its `::`.
    fn scan_hotstring_trigger(&mut self, start: Position) -> ScanResult {
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.hotstring = HotstringState::None;
                return ScanResult::Diagnostic(Diagnostic::error(
                    Range::new(start, self.position()),
                    "Unterminated hotstring trigger",
                ));
            }
            if ch == ':' && self.char_at(1) == Some(':') {
                content.push(':');
                content.push(':');
                self.bump();
                self.bump();
                self.hotstring = HotstringState::Expansion;
                return self.token(TokenKind::HotstringEnd, content, start);
            }
            content.push(ch);
            self.bump();
        }
        self.hotstring = HotstringState::None;
        ScanResult::Diagnostic(Diagnostic::error(
            Range::new(start, self.position()),
            "Unterminated hotstring trigger",
        ))
    }

    /// `#name` at line start.
    fn scan_directive(&mut self, start: Position) -> ScanResult {
        let mut content = String::from('#');
        self.bump();
        while let Some(ch) = self.current_char() {
            if !is_id_continue(ch) {
                break;
            }
            content.push(ch);
            self.bump();
        }
        self.token(TokenKind::Directive, content, start)
    }

    // ========================================================================
    // Identifiers, numbers, strings
    // ========================================================================

    fn scan_identifier(&mut self, start: Position, line_start: bool) -> ScanResult {
        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            if !is_id_continue(ch) {
                break;
            }
            content.push(ch);
            self.bump();
        }

        // `name:` filling its whole line introduces a jump label; `name::`
        // is a hotkey, `name :=` an assignment, and `name: value` an
        // associative-array entry, none of which land here.
        if self.is_parse_hotkey
            && line_start
            && self.current_char() == Some(':')
            && self.char_at(1) != Some(':')
            && self.char_at(1) != Some('=')
            && self.rest_is_blank(1)
        {
            content.push(':');
            self.bump();
            return self.token(TokenKind::Label, content, start);
        }

        let kind = keyword_kind(&content.to_ascii_lowercase()).unwrap_or(TokenKind::Id);
        self.token(kind, content, start)
    }

    fn scan_number(&mut self, start: Position) -> ScanResult {
        let mut content = String::new();
        if self.current_char() == Some('0')
            && matches!(self.char_at(1), Some('x') | Some('X'))
        {
            content.push(self.bump().unwrap_or_default());
            content.push(self.bump().unwrap_or_default());
            while let Some(ch) = self.current_char() {
                if !ch.is_ascii_hexdigit() {
                    break;
                }
                content.push(ch);
                self.bump();
            }
            return self.token(TokenKind::Number, content, start);
        }
        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            content.push(ch);
            self.bump();
        }
        if self.current_char() == Some('.') && self.char_at(1).map_or(false, |c| c.is_ascii_digit())
        {
            content.push('.');
            self.bump();
            while let Some(ch) = self.current_char() {
                if !ch.is_ascii_digit() {
                    break;
                }
                content.push(ch);
                self.bump();
            }
        }
        self.token(TokenKind::Number, content, start)
    }

    /// A `"..."` string; `""` is the embedded-quote escape. Content keeps
    /// the surrounding quotes.
    fn scan_string(&mut self, start: Position) -> ScanResult {
        let mut content = String::from('"');
        self.bump();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            if ch == '"' {
                if self.char_at(1) == Some('"') {
                    content.push_str("\"\"");
                    self.bump();
                    self.bump();
                    continue;
                }
                content.push('"');
                self.bump();
                return self.token(TokenKind::String, content, start);
            }
            content.push(ch);
            self.bump();
        }
        ScanResult::Diagnostic(Diagnostic::error(
            Range::new(start, self.position()),
            "Unterminated string",
        ))
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn scan_operator(&mut self, start: Position) -> ScanResult {
        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return self.token(TokenKind::Eof, "", start),
        };
        match ch {
            '(' => self.single(TokenKind::OpenParen, start),
            ')' => self.single(TokenKind::CloseParen, start),
            '[' => self.single(TokenKind::OpenBracket, start),
            ']' => self.single(TokenKind::CloseBracket, start),
            '{' => self.single(TokenKind::OpenBrace, start),
            '}' => self.single(TokenKind::CloseBrace, start),
            ',' => self.single(TokenKind::Comma, start),
            '%' => self.single(TokenKind::Percent, start),
            '?' => self.single(TokenKind::Question, start),
            '~' => self.single(TokenKind::BitNot, start),
            ':' => self.scan_colon(start),
            '+' => self.scan_plus(start),
            '-' => self.scan_minus(start),
            '*' => self.scan_asterisk(start),
            '/' => self.scan_slash(start),
            '.' => self.scan_dot(start),
            '!' => self.scan_exclamation(start),
            '=' => self.scan_equals(start),
            '<' => self.scan_less_than(start),
            '>' => self.scan_greater_than(start),
            '&' => self.scan_ampersand(start),
            '|' => self.scan_bar(start),
            '^' => self.scan_caret(start),
            _ => {
                self.bump();
                ScanResult::Diagnostic(Diagnostic::error(
                    Range::new(start, self.position()),
                    format!("Invalid character '{ch}'"),
                ))
            }
        }
    }

    fn single(&mut self, kind: TokenKind, start: Position) -> ScanResult {
        let ch = self.bump().unwrap_or_default();
        self.token(kind, ch.to_string(), start)
    }

    fn multi(&mut self, kind: TokenKind, len: usize, start: Position) -> ScanResult {
        let mut content = String::new();
        for _ in 0..len {
            if let Some(ch) = self.bump() {
                content.push(ch);
            }
        }
        self.token(kind, content, start)
    }

    fn scan_colon(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('=') => self.multi(TokenKind::Aassign, 2, start),
            Some(':') => self.multi(TokenKind::Hotkey, 2, start),
            _ => self.single(TokenKind::Colon, start),
        }
    }

    fn scan_plus(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('+') => self.multi(TokenKind::PlusPlus, 2, start),
            Some('=') => self.multi(TokenKind::PlusEqual, 2, start),
            _ => self.single(TokenKind::Plus, start),
        }
    }

    fn scan_minus(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('-') => self.multi(TokenKind::MinusMinus, 2, start),
            Some('=') => self.multi(TokenKind::MinusEqual, 2, start),
            _ => self.single(TokenKind::Minus, start),
        }
    }

    fn scan_asterisk(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('*') => self.multi(TokenKind::Power, 2, start),
            Some('=') => self.multi(TokenKind::MultiEqual, 2, start),
            _ => self.single(TokenKind::Multiply, start),
        }
    }

    fn scan_slash(&mut self, start: Position) -> ScanResult {
        if self.char_at(1) == Some('/') {
            if self.char_at(2) == Some('=') {
                return self.multi(TokenKind::FloorDivEqual, 3, start);
            }
            return self.multi(TokenKind::FloorDivide, 2, start);
        }
        if self.char_at(1) == Some('=') {
            return self.multi(TokenKind::DivEqual, 2, start);
        }
        self.single(TokenKind::Divide, start)
    }

    /// `.=` is compound concat-assign; a dot with whitespace on both sides
    /// is the concatenation operator; anything else is member access.
    fn scan_dot(&mut self, start: Position) -> ScanResult {
        if self.char_at(1) == Some('=') {
            return self.multi(TokenKind::ConcatEqual, 2, start);
        }
        let spaced_after = matches!(self.char_at(1), Some(' ') | Some('\t') | Some('\n') | None);
        if self.had_space && spaced_after {
            return self.single(TokenKind::Sconnect, start);
        }
        self.single(TokenKind::Dot, start)
    }

    fn scan_exclamation(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('=') => self.multi(TokenKind::NotEqual, 2, start),
            _ => self.single(TokenKind::Not, start),
        }
    }

    fn scan_equals(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('=') => self.multi(TokenKind::DoubleEqual, 2, start),
            _ => self.single(TokenKind::Equal, start),
        }
    }

    fn scan_less_than(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('<') => {
                if self.char_at(2) == Some('=') {
                    self.multi(TokenKind::LshiftEqual, 3, start)
                } else {
                    self.multi(TokenKind::LeftShift, 2, start)
                }
            }
            Some('=') => self.multi(TokenKind::LessEqual, 2, start),
            Some('>') => self.multi(TokenKind::NotEqual, 2, start),
            _ => self.single(TokenKind::Less, start),
        }
    }

    fn scan_greater_than(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('>') => {
                if self.char_at(2) == Some('=') {
                    self.multi(TokenKind::RshiftEqual, 3, start)
                } else {
                    self.multi(TokenKind::RightShift, 2, start)
                }
            }
            Some('=') => self.multi(TokenKind::GreaterEqual, 2, start),
            _ => self.single(TokenKind::Greater, start),
        }
    }

    fn scan_ampersand(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('&') => self.multi(TokenKind::LogicAnd, 2, start),
            Some('=') => self.multi(TokenKind::AndEqual, 2, start),
            _ => self.single(TokenKind::BitAnd, start),
        }
    }

    fn scan_bar(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('|') => self.multi(TokenKind::LogicOr, 2, start),
            Some('=') => self.multi(TokenKind::OrEqual, 2, start),
            _ => self.single(TokenKind::BitOr, start),
        }
    }

    fn scan_caret(&mut self, start: Position) -> ScanResult {
        match self.char_at(1) {
            Some('=') => self.multi(TokenKind::XorEqual, 2, start),
            _ => self.single(TokenKind::BitXor, start),
        }
    }
}

impl Tokenizer {
    /// Nothing but trailing whitespace or a comment between `pos + offset`
    /// and the end of the line.
    fn rest_is_blank(&self, offset: usize) -> bool {
        let mut i = self.pos + offset;
        while let Some(&ch) = self.text.get(i) {
            match ch {
                '\n' | ';' => return true,
                ' ' | '\t' | '\r' => i += 1,
                _ => return false,
            }
        }
        true
    }
}

/// AutoHotkey names admit `#`, `@`, and `$` alongside the usual identifier
/// characters.
fn is_id_start(ch: char) -> bool {
    ch.is_xid_start() || matches!(ch, '_' | '#' | '@' | '$')
}

fn is_id_continue(ch: char) -> bool {
    ch.is_xid_continue() || matches!(ch, '#' | '@' | '$')
}
