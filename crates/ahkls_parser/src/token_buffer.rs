//! A growable, randomly-indexable window over the token source.
//!
//! The buffer pulls a token from the tokenizer only when the cursor reaches
//! its end, and permanently appends everything it fetches, so any previously
//! visited position can be rewound to in O(1); the statement-vs-definition
//! disambiguation depends on that. Comment and diagnostic pseudo-tokens are
//! routed to side channels before the grammar ever sees them.
//!
//! Line folding: when a freshly fetched token is a line terminator, the
//! buffer fetches one more token. If that token is a continuation starter
//! (an operator or a comma), the terminator is discarded and the operator
//! takes its place, so an operator or comma at line start continues the
//! previous logical line. `advance` and `peek` share the one fetch path, so
//! lookahead and consumption can never disagree about folding.

use ahkls_ast::{Token, TokenKind};
use ahkls_diagnostics::Diagnostic;
use ahkls_scanner::{ScanResult, Tokenizer};

pub struct TokenBuffer {
    tokenizer: Tokenizer,
    tokens: Vec<Token>,
    pos: usize,
    comments: Vec<Token>,
    token_errors: Vec<Diagnostic>,
}

impl TokenBuffer {
    pub fn new(source: &str) -> Self {
        let mut buffer = Self {
            tokenizer: Tokenizer::new(source),
            tokens: Vec::new(),
            pos: 0,
            comments: Vec::new(),
            token_errors: Vec::new(),
        };
        buffer.pull(TokenKind::Eol);
        buffer
    }

    /// Restart from the top of the document with the given lexing mode, for
    /// the single-expression entry point.
    pub fn reset(&mut self, hotkey_mode: bool) {
        self.tokenizer.reset();
        self.tokenizer.set_hotkey_mode(hotkey_mode);
        self.tokens.clear();
        self.pos = 0;
        self.comments.clear();
        self.token_errors.clear();
        self.pull(TokenKind::Eol);
    }

    /// Fetch one real token, routing pseudo-tokens to their side channels.
    fn fetch(&mut self, mut hint: TokenKind) -> Token {
        loop {
            match self.tokenizer.next(hint) {
                ScanResult::Token(token) => return token,
                ScanResult::Comment(comment) => {
                    self.comments.push(comment);
                    hint = TokenKind::Unknown;
                }
                ScanResult::Diagnostic(diagnostic) => {
                    self.token_errors.push(diagnostic);
                    hint = TokenKind::Unknown;
                }
            }
        }
    }

    /// Fetch and append one logical token, applying the line-folding rule.
    fn pull(&mut self, hint: TokenKind) {
        let token = self.fetch(hint);
        if token.kind == TokenKind::Eol {
            // The folding inspection reads the first token of the next line.
            // A line terminator hands the scanner back to statement context:
            // the suspended-hotkey flag applies to the line being parsed, not
            // the one after it.
            let saved_mode = self.tokenizer.hotkey_mode();
            self.tokenizer.set_hotkey_mode(true);
            let next = self.fetch(token.kind);
            self.tokenizer.set_hotkey_mode(saved_mode);
            if next.kind.starts_continuation() {
                // the terminator is discarded: the line continues
                self.tokens.push(next);
            } else {
                self.tokens.push(token);
                self.tokens.push(next);
            }
        } else {
            self.tokens.push(token);
        }
    }

    fn last_kind(&self) -> TokenKind {
        self.tokens.last().map_or(TokenKind::Eol, |t| t.kind)
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Move the cursor forward, fetching only at the buffer's end.
    pub fn advance(&mut self) {
        self.pos += 1;
        if self.pos >= self.tokens.len() {
            let hint = self.last_kind();
            self.pull(hint);
        }
    }

    /// The token one position ahead, fetched (and folded) if necessary.
    pub fn peek(&mut self) -> &Token {
        if self.pos + 1 >= self.tokens.len() {
            let hint = self.last_kind();
            self.pull(hint);
        }
        &self.tokens[self.pos + 1]
    }

    /// The token behind the cursor.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    /// Current cursor index, for later `backto`.
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Rewind to a previously visited index. O(1); nothing is re-tokenized.
    pub fn backto(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len());
        self.pos = pos;
    }

    /// The tokens consumed since `start`, exclusive of the current token.
    pub fn slice_from(&self, start: usize) -> Vec<Token> {
        self.tokens[start..self.pos].to_vec()
    }

    pub fn hotkey_mode(&self) -> bool {
        self.tokenizer.hotkey_mode()
    }

    pub fn set_hotkey_mode(&mut self, on: bool) {
        self.tokenizer.set_hotkey_mode(on);
    }

    pub fn set_literal_mode(&mut self, on: bool) {
        self.tokenizer.set_literal_mode(on);
    }

    /// Tear down into the full token list and the pseudo-token channels.
    pub fn into_parts(self) -> (Vec<Token>, Vec<Token>, Vec<Diagnostic>) {
        (self.tokens, self.comments, self.token_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_advance_agree_on_folding() {
        // the `+` at line start continues the line: the terminator is folded
        let mut buffer = TokenBuffer::new("1\n+ 2\n");
        assert_eq!(buffer.current().kind, TokenKind::Number);
        assert_eq!(buffer.peek().kind, TokenKind::Plus);
        buffer.advance();
        assert_eq!(buffer.current().kind, TokenKind::Plus);
        buffer.advance();
        assert_eq!(buffer.current().kind, TokenKind::Number);
    }

    #[test]
    fn test_non_continuation_keeps_the_terminator() {
        let mut buffer = TokenBuffer::new("1\n2\n");
        assert_eq!(buffer.current().kind, TokenKind::Number);
        assert_eq!(buffer.peek().kind, TokenKind::Eol);
        buffer.advance();
        assert_eq!(buffer.current().kind, TokenKind::Eol);
        buffer.advance();
        assert_eq!(buffer.current().kind, TokenKind::Number);
    }

    #[test]
    fn test_backto_rewinds_without_rescanning() {
        let mut buffer = TokenBuffer::new("a b c\n");
        let saved = buffer.cursor();
        let first = buffer.current().clone();
        buffer.advance();
        buffer.advance();
        assert_ne!(buffer.current().content, first.content);
        buffer.backto(saved);
        assert_eq!(buffer.current().content, first.content);
        assert_eq!(buffer.cursor(), saved);
    }

    #[test]
    fn test_comments_and_lexical_errors_take_side_channels() {
        let mut buffer = TokenBuffer::new("; note\nx := \"oops\n");
        while buffer.current().kind != TokenKind::Eof {
            buffer.advance();
        }
        let (_, comments, errors) = buffer.into_parts();
        assert_eq!(comments.len(), 1);
        assert_eq!(errors.len(), 1);
    }
}
