//! TokenKind enum - every token category the tokenizer can produce.
//!
//! Operator groupings (continuation starters, the assignment family, value
//! starters) are explicit named sets checked by membership, never by the
//! numeric ordering of the variants.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// The category of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Id,
    Number,
    String,

    // Operators
    PlusPlus,
    MinusMinus,
    Power,
    Not,
    BitNot,
    Multiply,
    Divide,
    FloorDivide,
    Plus,
    Minus,
    LeftShift,
    RightShift,
    BitAnd,
    BitXor,
    BitOr,
    /// Explicit string concatenation: a `.` surrounded by whitespace.
    Sconnect,
    /// Synthesized connective for two adjacent value expressions.
    ImplicitConcat,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    NotEqual,
    DoubleEqual,
    Equal,
    LogicAnd,
    LogicOr,
    Question,
    Colon,

    // Assignment family
    Aassign,
    PlusEqual,
    MinusEqual,
    MultiEqual,
    DivEqual,
    FloorDivEqual,
    ConcatEqual,
    OrEqual,
    AndEqual,
    XorEqual,
    RshiftEqual,
    LshiftEqual,

    Comma,
    Dot,

    // Brackets
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Percent,

    // Keywords
    If,
    Else,
    Switch,
    Case,
    Loop,
    While,
    For,
    In,
    Try,
    Catch,
    Finally,
    Until,
    Break,
    Return,
    Class,
    Extends,
    Global,
    Local,
    Static,
    New,
    ByRef,

    // Hotkey-mode constructs
    Key,
    /// The `::` hotkey terminator.
    Hotkey,
    /// The `&` combining two keys in a hotkey declaration.
    HotkeyAnd,
    /// The leading `:options:` of a hotstring.
    HotstringOpen,
    /// The hotstring trigger text, including its trailing `::`.
    HotstringEnd,
    /// A `name:` line; content keeps the trailing colon.
    Label,
    /// A `#name` line; content keeps the leading `#`.
    Directive,

    // Stream control
    Eol,
    Eof,
    Unknown,
}

impl TokenKind {
    /// Operators valid in prefix position.
    pub fn is_prefix_unary(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Not
                | TokenKind::BitNot
                | TokenKind::BitAnd
                | TokenKind::Multiply
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::New
        )
    }

    pub fn is_incr_decr(self) -> bool {
        matches!(self, TokenKind::PlusPlus | TokenKind::MinusMinus)
    }

    /// Left-associative infix operators.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Power
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::FloorDivide
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::LeftShift
                | TokenKind::RightShift
                | TokenKind::BitAnd
                | TokenKind::BitXor
                | TokenKind::BitOr
                | TokenKind::Sconnect
                | TokenKind::Greater
                | TokenKind::GreaterEqual
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::NotEqual
                | TokenKind::DoubleEqual
                | TokenKind::Equal
                | TokenKind::LogicAnd
                | TokenKind::LogicOr
        )
    }

    /// Right-associative continuations: the ternary `?` plus the whole
    /// assignment family.
    pub fn is_right_assoc(self) -> bool {
        self == TokenKind::Question || self.is_assignment()
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Aassign
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::MultiEqual
                | TokenKind::DivEqual
                | TokenKind::FloorDivEqual
                | TokenKind::ConcatEqual
                | TokenKind::OrEqual
                | TokenKind::AndEqual
                | TokenKind::XorEqual
                | TokenKind::RshiftEqual
                | TokenKind::LshiftEqual
        )
    }

    /// Tokens that can begin a value: the implicit-concatenation trigger set.
    pub fn is_value_start(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::OpenBrace
                | TokenKind::OpenBracket
                | TokenKind::Id
                | TokenKind::Percent
        )
    }

    /// Tokens that, at the start of a line, continue the previous logical
    /// line: the token buffer discards the line terminator before them.
    pub fn starts_continuation(self) -> bool {
        self.is_binary_operator()
            || self.is_right_assoc()
            || self.is_incr_decr()
            || matches!(
                self,
                TokenKind::Not
                    | TokenKind::BitNot
                    | TokenKind::Colon
                    | TokenKind::Comma
                    | TokenKind::Dot
            )
    }

    /// Tokens that open an independent statement: the synchronization
    /// boundary set used by error recovery.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Local
                | TokenKind::Global
                | TokenKind::Static
                | TokenKind::Class
                | TokenKind::If
                | TokenKind::Loop
                | TokenKind::While
                | TokenKind::Until
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Switch
                | TokenKind::For
                | TokenKind::Try
                | TokenKind::Directive
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Loop
                | TokenKind::While
                | TokenKind::For
                | TokenKind::In
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Until
                | TokenKind::Break
                | TokenKind::Return
                | TokenKind::Class
                | TokenKind::Extends
                | TokenKind::Global
                | TokenKind::Local
                | TokenKind::Static
                | TokenKind::New
                | TokenKind::ByRef
        )
    }
}

/// Case-insensitive keyword lookup. AutoHotkey keywords ignore case, so the
/// table is keyed on lowercase and callers pass a lowercased name.
pub fn keyword_kind(lowercase: &str) -> Option<TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    let table = KEYWORDS.get_or_init(|| {
        let mut m = FxHashMap::default();
        m.insert("if", TokenKind::If);
        m.insert("else", TokenKind::Else);
        m.insert("switch", TokenKind::Switch);
        m.insert("case", TokenKind::Case);
        m.insert("loop", TokenKind::Loop);
        m.insert("while", TokenKind::While);
        m.insert("for", TokenKind::For);
        m.insert("in", TokenKind::In);
        m.insert("try", TokenKind::Try);
        m.insert("catch", TokenKind::Catch);
        m.insert("finally", TokenKind::Finally);
        m.insert("until", TokenKind::Until);
        m.insert("break", TokenKind::Break);
        m.insert("return", TokenKind::Return);
        m.insert("class", TokenKind::Class);
        m.insert("extends", TokenKind::Extends);
        m.insert("global", TokenKind::Global);
        m.insert("local", TokenKind::Local);
        m.insert("static", TokenKind::Static);
        m.insert("new", TokenKind::New);
        m.insert("byref", TokenKind::ByRef);
        m.insert("and", TokenKind::LogicAnd);
        m.insert("or", TokenKind::LogicOr);
        m.insert("not", TokenKind::Not);
        m
    });
    table.get(lowercase).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_case_insensitive_by_contract() {
        assert_eq!(keyword_kind("while"), Some(TokenKind::While));
        assert_eq!(keyword_kind("and"), Some(TokenKind::LogicAnd));
        assert_eq!(keyword_kind("msgbox"), None);
    }

    #[test]
    fn test_operator_sets_are_disjoint_where_expected() {
        assert!(TokenKind::Aassign.is_right_assoc());
        assert!(!TokenKind::Aassign.is_binary_operator());
        assert!(TokenKind::Question.is_right_assoc());
        assert!(!TokenKind::Question.is_assignment());
        assert!(TokenKind::Power.is_binary_operator());
    }

    #[test]
    fn test_continuation_set_covers_operators_and_comma() {
        assert!(TokenKind::Plus.starts_continuation());
        assert!(TokenKind::Comma.starts_continuation());
        assert!(TokenKind::Aassign.starts_continuation());
        assert!(!TokenKind::Id.starts_continuation());
        assert!(!TokenKind::OpenBrace.starts_continuation());
    }
}
