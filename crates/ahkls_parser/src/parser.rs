//! The AutoHotkey parser.
//!
//! A single-pass recursive-descent statement parser over a precedence-
//! climbing expression parser. Both share the token buffer and the recovery
//! protocol: a structural error travels up as an `Err` until the nearest
//! boundary (`declaration` for statements, `expression` for expressions)
//! converts it into an `Invalid` node plus one diagnostic and resynchronizes
//! the cursor to the next statement boundary. One malformed region therefore
//! costs exactly one diagnostic, and everything around it still parses.

use crate::parse_error::{ParseError, ParseFailure, ParseResult};
use crate::precedence::{operator_precedence, CONCAT, UNARY, UPDATE};
use crate::token_buffer::TokenBuffer;
use ahkls_ast::expr::{Binary, Expr, Factor, InvalidExpr, Ternary, Unary};
use ahkls_ast::stmt::*;
use ahkls_ast::suffix::{
    ArrayTerm, AssociativeArray, Atom, BracketIndex, Call, Grouping, Identifier, InvalidAtom,
    Literal, Pair, PercentDeref, SuffixTerm, SuffixTrailer, Trailer,
};
use ahkls_ast::{Script, SyntaxNode, Token, TokenKind};
use ahkls_diagnostics::{Diagnostic, DiagnosticCollection};
use indexmap::IndexSet;

/// Recursion ceiling; exceeding it is an internal failure, not a syntax
/// error, and degrades the whole parse.
const MAX_RECURSION_DEPTH: u32 = 200;

/// The produced artifact of a whole-document parse: the script node plus the
/// two diagnostic lists (recovered syntax errors, and lexical errors
/// forwarded verbatim from the tokenizer).
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub script: Script,
    pub syntax_errors: Vec<ParseError>,
    pub token_errors: Vec<Diagnostic>,
}

impl ParsedDocument {
    /// Both diagnostic lists flattened for publishing, lexical first.
    pub fn all_diagnostics(&self) -> DiagnosticCollection {
        let mut out = DiagnosticCollection::new();
        for diagnostic in &self.token_errors {
            out.add(diagnostic.clone());
        }
        for error in &self.syntax_errors {
            out.add(error.to_diagnostic());
        }
        out
    }
}

pub struct Parser {
    buffer: TokenBuffer,
    uri: String,
    syntax_errors: Vec<ParseError>,
    includes: IndexSet<String>,
    depth: u32,
}

impl Parser {
    pub fn new(source: &str, uri: &str) -> Self {
        Self {
            buffer: TokenBuffer::new(source),
            uri: uri.to_string(),
            syntax_errors: Vec::new(),
            includes: IndexSet::new(),
            depth: 0,
        }
    }

    /// Parse the whole document. Structural errors are recovered inside; an
    /// unexpected internal failure yields an empty script with no
    /// diagnostics rather than propagating to the caller.
    pub fn parse(mut self) -> ParsedDocument {
        let mut statements = Vec::new();
        let outcome = self.parse_statements(&mut statements);

        match outcome {
            Ok(()) => {
                let (tokens, comments, token_errors) = self.buffer.into_parts();
                ParsedDocument {
                    script: Script::new(self.uri, statements, tokens, comments, self.includes),
                    syntax_errors: self.syntax_errors,
                    token_errors,
                }
            }
            Err(_) => ParsedDocument {
                script: Script::empty(self.uri),
                syntax_errors: Vec::new(),
                token_errors: Vec::new(),
            },
        }
    }

    /// Single-statement entry point, for statement-by-statement re-analysis
    /// and tests.
    pub fn parse_statement(mut self) -> (Stmt, Vec<ParseError>) {
        self.jump_white_space();
        match self.declaration() {
            Ok(stmt) => (stmt, self.syntax_errors),
            Err(_) => {
                let position = self.buffer.current().start;
                (
                    Stmt::Invalid(InvalidStmt {
                        position,
                        tokens: vec![self.buffer.current().clone()],
                    }),
                    self.syntax_errors,
                )
            }
        }
    }

    /// Single-expression entry point. Restarts the token source with hotkey
    /// lexing suspended: an expression can never itself be a hotkey line.
    pub fn parse_expression(mut self) -> (Expr, Vec<ParseError>) {
        self.buffer.reset(false);
        match self.expression() {
            Ok(expr) => (expr, self.syntax_errors),
            Err(_) => {
                let position = self.buffer.current().start;
                (
                    Expr::Invalid(InvalidExpr {
                        position,
                        tokens: vec![self.buffer.current().clone()],
                    }),
                    self.syntax_errors,
                )
            }
        }
    }

    fn parse_statements(&mut self, statements: &mut Vec<Stmt>) -> ParseResult<()> {
        self.jump_white_space();
        while self.buffer.current().kind != TokenKind::Eof {
            let stmt = self.declaration()?;
            statements.push(stmt);
            self.jump_white_space();
        }
        Ok(())
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn kind(&self) -> TokenKind {
        self.buffer.current().kind
    }

    fn advance(&mut self) {
        self.buffer.advance();
    }

    /// Consume the current token and return it.
    fn eat(&mut self) -> Token {
        self.advance();
        self.buffer.previous().clone()
    }

    /// Consume the current token if it has the expected kind, else fail.
    fn eat_expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.kind() == kind {
            Ok(self.eat())
        } else {
            Err(self.error_current(message))
        }
    }

    /// Consume the expected kind, also reaching across one line terminator:
    /// a trailing comma, colon, or brace may sit at the start of the next
    /// line.
    fn eat_discard_cr(&mut self, kind: TokenKind) -> Option<Token> {
        if self.kind() == TokenKind::Eol {
            if self.buffer.peek().kind == kind {
                self.advance();
                self.advance();
                return Some(self.buffer.previous().clone());
            }
        } else if self.kind() == kind {
            self.advance();
            return Some(self.buffer.previous().clone());
        }
        None
    }

    fn match_tokens(&self, kinds: &[TokenKind]) -> bool {
        let current = self.kind();
        current != TokenKind::Eof && kinds.contains(&current)
    }

    fn jump_white_space(&mut self) {
        while self.kind() == TokenKind::Eol {
            self.advance();
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.kind(), TokenKind::Eol | TokenKind::Eof)
    }

    /// Every simple statement ends at end-of-input or a line terminator.
    fn terminal(&mut self) -> ParseResult<()> {
        if self.kind() != TokenKind::Eof {
            self.eat_expect(TokenKind::Eol, "Expect a line break to terminate statement")?;
        }
        Ok(())
    }

    fn error_current(&self, message: &str) -> ParseFailure {
        ParseFailure::Syntax(ParseError::new(self.buffer.current().clone(), message))
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Advance to the start of the next independent statement: stop on a
    /// statement keyword (by lookahead, so it is not consumed into the dead
    /// zone twice), or just past a line terminator or close brace.
    fn synchronize(&mut self) {
        while self.kind() != TokenKind::Eof {
            if matches!(self.kind(), TokenKind::Eol | TokenKind::CloseBrace) {
                self.advance();
                return;
            }
            if self.buffer.peek().kind.starts_statement() {
                self.advance();
                return;
            }
            self.advance();
        }
    }

    /// The tokens consumed by a failed attempt, plus the one recovery
    /// stopped on.
    fn recovered_tokens(&self, start: usize) -> Vec<Token> {
        let mut tokens = self.buffer.slice_from(start);
        tokens.push(self.buffer.current().clone());
        tokens
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// The statement-level recovery boundary.
    fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(ParseFailure::Internal(format!(
                "statement nesting exceeds {MAX_RECURSION_DEPTH}"
            )));
        }
        let depth0 = self.depth;
        self.depth += 1;
        let start = self.buffer.cursor();
        let result = self.declaration_inner();
        self.depth = depth0;

        match result {
            Ok(stmt) => Ok(stmt),
            Err(ParseFailure::Syntax(error)) => {
                self.synchronize();
                let tokens = self.recovered_tokens(start);
                let position = tokens[0].start;
                self.syntax_errors.push(error);
                Ok(Stmt::Invalid(InvalidStmt { position, tokens }))
            }
            Err(internal) => Err(internal),
        }
    }

    fn declaration_inner(&mut self) -> ParseResult<Stmt> {
        match self.kind() {
            TokenKind::Id => self.id_lead_statement(),
            TokenKind::Class => self.class_define(),
            TokenKind::Global | TokenKind::Local | TokenKind::Static => self.var_decl(),
            TokenKind::Label => self.label(),
            TokenKind::Key => self.hotkey(),
            TokenKind::HotstringOpen => self.hotstring(),
            _ => self.statement(),
        }
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        match self.kind() {
            TokenKind::Id => self.id_lead_statement(),
            TokenKind::OpenBrace => Ok(Stmt::Block(self.block()?)),
            TokenKind::If => self.if_stmt(),
            TokenKind::Break => self.break_stmt(),
            TokenKind::Return => self.return_stmt(),
            TokenKind::Switch => self.switch_stmt(),
            TokenKind::Loop => self.loop_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::For => self.for_stmt(),
            TokenKind::Try => self.try_stmt(),
            TokenKind::Directive => self.directive(),
            _ => Err(self.error_current("Unknown statement")),
        }
    }

    /// An identifier opens a definition, an assignment, a call statement, or
    /// a hotkey; one token of lookahead picks the branch.
    fn id_lead_statement(&mut self) -> ParseResult<Stmt> {
        let peeked = self.buffer.peek().clone();
        match peeked.kind {
            TokenKind::OpenParen => self.func(),
            TokenKind::Equal | TokenKind::Aassign | TokenKind::Dot | TokenKind::OpenBracket => {
                self.assign()
            }
            TokenKind::HotkeyAnd | TokenKind::Hotkey => self.hotkey(),
            k if k.is_assignment() => self.assign(),
            _ => Err(ParseFailure::Syntax(ParseError::new(
                peeked,
                "Invalid follower(s) of identifier",
            ))),
        }
    }

    fn var_decl(&mut self) -> ParseResult<Stmt> {
        let scope = self.eat();
        let mut bindings = Vec::new();

        loop {
            if self.kind() == TokenKind::Id {
                let name = self.eat();
                if matches!(self.kind(), TokenKind::Aassign | TokenKind::Equal) {
                    let assign = self.eat();
                    let value = self.expr_in_statement()?;
                    bindings.push(Binding {
                        name,
                        assign: Some(assign),
                        value: Some(value),
                    });
                } else {
                    bindings.push(Binding {
                        name,
                        assign: None,
                        value: None,
                    });
                }
            } else {
                // keep a placeholder binding so later siblings still parse
                let bad = self.buffer.current().clone();
                self.syntax_errors.push(ParseError::new(
                    bad.clone(),
                    "Expect an identifier in variable declaration",
                ));
                bindings.push(Binding {
                    name: bad.clone(),
                    assign: None,
                    value: Some(Expr::Invalid(InvalidExpr {
                        position: bad.start,
                        tokens: vec![bad],
                    })),
                });
            }
            if self.eat_discard_cr(TokenKind::Comma).is_none() {
                break;
            }
        }

        self.terminal()?;
        Ok(Stmt::VarDecl(VarDecl { scope, bindings }))
    }

    fn class_define(&mut self) -> ParseResult<Stmt> {
        let class_token = self.eat();
        let name = self.eat_expect(TokenKind::Id, "Expect an identifier in class definition")?;

        let (extends_token, parent) = if self.kind() == TokenKind::Extends {
            let ext = self.eat();
            let parent = self.eat_expect(
                TokenKind::Id,
                "Expect an identifier after \"extends\" keyword",
            )?;
            (Some(ext), Some(parent))
        } else {
            (None, None)
        };

        let body = self.block()?;
        Ok(Stmt::ClassDef(ClassDef {
            class_token,
            name,
            extends_token,
            parent,
            body,
        }))
    }

    fn label(&mut self) -> ParseResult<Stmt> {
        let name = self.eat();
        Ok(Stmt::Label(Label { name }))
    }

    fn hotkey(&mut self) -> ParseResult<Stmt> {
        let key1 = Key { token: self.eat() };

        if self.kind() == TokenKind::HotkeyAnd {
            let and = self.eat();
            let key2 = Key { token: self.eat() };
            let hotkey = self.eat_expect(
                TokenKind::Hotkey,
                "Expect a \"::\" at the end of hotkey declaration",
            )?;
            return Ok(Stmt::Hotkey(Hotkey {
                key1,
                and: Some(and),
                key2: Some(key2),
                hotkey,
            }));
        }

        let hotkey = self.eat_expect(
            TokenKind::Hotkey,
            "Expect a \"::\" at the end of hotkey declaration",
        )?;
        Ok(Stmt::Hotkey(Hotkey {
            key1,
            and: None,
            key2: None,
            hotkey,
        }))
    }

    fn hotstring(&mut self) -> ParseResult<Stmt> {
        let option = self.eat();
        let trigger = self.eat_expect(TokenKind::HotstringEnd, "Expect a hotstring trigger")?;

        // a same-line expansion is a string; otherwise the line terminator
        // stands in for a deferred (next-line) body
        let expansion = if self.kind() == TokenKind::Eol {
            self.eat()
        } else {
            self.eat_expect(TokenKind::String, "Expect an expansion string in hotstring")?
        };
        Ok(Stmt::HotString(HotString {
            option,
            trigger,
            expansion,
        }))
    }

    fn block(&mut self) -> ParseResult<Block> {
        let open = match self.eat_discard_cr(TokenKind::OpenBrace) {
            Some(token) => token,
            None => return Err(self.error_current("Expect a \"{\" at beginning of block")),
        };

        let mut statements = Vec::new();
        self.jump_white_space();
        while self.kind() != TokenKind::CloseBrace && self.kind() != TokenKind::Eof {
            statements.push(self.declaration()?);
            self.jump_white_space();
        }
        let close = self.eat_expect(TokenKind::CloseBrace, "Expect a \"}\" at block end")?;

        Ok(Block {
            open,
            statements,
            close,
        })
    }

    fn if_stmt(&mut self) -> ParseResult<Stmt> {
        let if_token = self.eat();
        let condition = self.expr_in_statement()?;
        self.jump_white_space();
        let body = Box::new(self.declaration()?);

        self.jump_white_space();
        let else_stmt = if self.kind() == TokenKind::Else {
            let else_token = self.eat();
            self.jump_white_space();
            // `else if` falls out of the body being another if statement
            let else_body = Box::new(self.declaration()?);
            Some(Else {
                else_token,
                body: else_body,
            })
        } else {
            None
        };

        Ok(Stmt::If(If {
            if_token,
            condition,
            body,
            else_stmt,
        }))
    }

    fn break_stmt(&mut self) -> ParseResult<Stmt> {
        let break_token = self.eat();

        if !self.at_line_end() {
            self.eat_discard_cr(TokenKind::Comma);
            let label = self.eat_expect(TokenKind::Id, "Expect a label name")?;
            self.terminal()?;
            return Ok(Stmt::Break(Break {
                break_token,
                label: Some(label),
            }));
        }

        self.terminal()?;
        Ok(Stmt::Break(Break {
            break_token,
            label: None,
        }))
    }

    fn return_stmt(&mut self) -> ParseResult<Stmt> {
        let return_token = self.eat();

        if !self.at_line_end() {
            self.eat_discard_cr(TokenKind::Comma);
            let value = self.expr_in_statement()?;
            self.terminal()?;
            return Ok(Stmt::Return(Return {
                return_token,
                value: Some(value),
            }));
        }

        self.terminal()?;
        Ok(Stmt::Return(Return {
            return_token,
            value: None,
        }))
    }

    fn switch_stmt(&mut self) -> ParseResult<Stmt> {
        let switch_token = self.eat();
        let condition = self.expr_in_statement()?;
        let open = match self.eat_discard_cr(TokenKind::OpenBrace) {
            Some(token) => token,
            None => return Err(self.error_current("Expect a \"{\" after switch condition")),
        };

        let mut cases = Vec::new();
        loop {
            self.jump_white_space();
            match self.kind() {
                TokenKind::CloseBrace | TokenKind::Eof => break,
                TokenKind::Case => {
                    let case_token = self.eat();
                    let mut conditions = Vec::new();
                    loop {
                        conditions.push(self.expr_in_statement()?);
                        if self.eat_discard_cr(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    let colon =
                        self.eat_expect(TokenKind::Colon, "Expect a \":\" at end of case")?;
                    let statements = self.stmt_list()?;
                    cases.push(CaseStmt {
                        case: CaseNode::Case(CaseExpr {
                            case_token,
                            conditions,
                            colon,
                        }),
                        statements,
                    });
                }
                TokenKind::Label
                    if self
                        .buffer
                        .current()
                        .content
                        .eq_ignore_ascii_case("default:") =>
                {
                    let token = self.eat();
                    let statements = self.stmt_list()?;
                    cases.push(CaseStmt {
                        case: CaseNode::Default(DefaultCase { token }),
                        statements,
                    });
                }
                _ => return Err(self.error_current("Expect \"case\" statement or \"default:\"")),
            }
        }

        let close = self.eat_expect(TokenKind::CloseBrace, "Expect a \"}\" to end switch")?;
        Ok(Stmt::Switch(Switch {
            switch_token,
            condition,
            open,
            cases,
            close,
        }))
    }

    /// The statements below one case arm, running until the next arm or the
    /// switch's close brace.
    fn stmt_list(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        loop {
            self.jump_white_space();
            statements.push(self.declaration()?);
            self.jump_white_space();

            if self.kind() == TokenKind::Label
                && self
                    .buffer
                    .current()
                    .content
                    .eq_ignore_ascii_case("default:")
            {
                break;
            }
            if matches!(
                self.kind(),
                TokenKind::Case | TokenKind::CloseBrace | TokenKind::Eof
            ) {
                break;
            }
        }
        Ok(statements)
    }

    fn loop_stmt(&mut self) -> ParseResult<Stmt> {
        let loop_token = self.eat();

        // bare loop: check for the until form once the body is parsed
        if self.match_tokens(&[TokenKind::Eol, TokenKind::OpenBrace]) {
            self.jump_white_space();
            let body = Box::new(self.declaration()?);
            self.jump_white_space();
            if self.kind() == TokenKind::Until {
                let until_token = self.eat();
                let condition = self.expr_in_statement()?;
                self.terminal()?;
                return Ok(Stmt::UntilLoop(UntilLoop {
                    loop_token,
                    body,
                    until_token,
                    condition,
                }));
            }
            return Ok(Stmt::Loop(Loop {
                loop_token,
                condition: None,
                body,
            }));
        }

        let condition = self.expr_in_statement()?;
        self.jump_white_space();
        let body = Box::new(self.declaration()?);
        Ok(Stmt::Loop(Loop {
            loop_token,
            condition: Some(condition),
            body,
        }))
    }

    fn while_stmt(&mut self) -> ParseResult<Stmt> {
        let while_token = self.eat();
        let condition = self.expr_in_statement()?;
        self.jump_white_space();
        let body = Box::new(self.declaration()?);
        Ok(Stmt::While(While {
            while_token,
            condition,
            body,
        }))
    }

    fn for_stmt(&mut self) -> ParseResult<Stmt> {
        let for_token = self.eat();
        let id1 = self.eat_expect(TokenKind::Id, "Expect an identifier in for loop")?;

        let (comma, id2) = if self.kind() == TokenKind::Comma {
            let comma = self.eat();
            let id2 = self.eat_expect(
                TokenKind::Id,
                "Expect a second identifier after \",\" in for loop",
            )?;
            (Some(comma), Some(id2))
        } else {
            (None, None)
        };

        let in_token = self.eat_expect(TokenKind::In, "Expect \"in\" keyword in for loop")?;
        let iterable = self.expr_in_statement()?;
        self.jump_white_space();
        let body = Box::new(self.declaration()?);
        Ok(Stmt::For(For {
            for_token,
            id1,
            comma,
            id2,
            in_token,
            iterable,
            body,
        }))
    }

    fn try_stmt(&mut self) -> ParseResult<Stmt> {
        let try_token = self.eat();
        self.jump_white_space();
        let body = Box::new(self.declaration()?);

        self.jump_white_space();
        let catch_stmt = if self.kind() == TokenKind::Catch {
            let catch_token = self.eat();
            let variable = if self.kind() == TokenKind::Id {
                Some(self.eat())
            } else {
                None
            };
            self.jump_white_space();
            let body = Box::new(self.declaration()?);
            Some(CatchStmt {
                catch_token,
                variable,
                body,
            })
        } else {
            None
        };

        self.jump_white_space();
        let finally_stmt = if self.kind() == TokenKind::Finally {
            let finally_token = self.eat();
            self.jump_white_space();
            let body = Box::new(self.declaration()?);
            Some(FinallyStmt {
                finally_token,
                body,
            })
        } else {
            None
        };

        Ok(Stmt::Try(Try {
            try_token,
            body,
            catch_stmt,
            finally_stmt,
        }))
    }

    fn directive(&mut self) -> ParseResult<Stmt> {
        let token = self.buffer.current().clone();
        let is_include = token
            .content
            .strip_prefix('#')
            .is_some_and(|name| name.eq_ignore_ascii_case("include"));

        if is_include {
            // the path argument lexes as a literal rest-of-line token; the
            // mode must be set before the buffer fetches past the directive
            self.buffer.set_literal_mode(true);
            self.advance();
            if self.kind() != TokenKind::String {
                self.buffer.set_literal_mode(false);
                self.syntax_errors.push(ParseError::new(
                    self.buffer.current().clone(),
                    "Expect a file path after #Include",
                ));
                return Ok(Stmt::Directive(Directive {
                    token,
                    args: Vec::new(),
                }));
            }
            let path = self.eat();
            self.includes.insert(path.content.clone());
            self.terminal()?;
            let arg = Expr::Factor(Factor::new(SuffixTerm {
                atom: Atom::Literal(Literal { token: path }),
                trailers: Vec::new(),
            }));
            return Ok(Stmt::Directive(Directive {
                token,
                args: vec![arg],
            }));
        }

        self.advance();
        let mut args = Vec::new();
        while !self.at_line_end() {
            args.push(self.expr_in_statement()?);
        }
        self.terminal()?;
        Ok(Stmt::Directive(Directive { token, args }))
    }

    fn assign(&mut self) -> ParseResult<Stmt> {
        let saved_mode = self.buffer.hotkey_mode();
        self.buffer.set_hotkey_mode(false);
        let left = self.factor();
        self.buffer.set_hotkey_mode(saved_mode);
        let left = left?;

        if self.kind().is_assignment() || self.kind() == TokenKind::Equal {
            let operator = self.eat();
            let expr = self.expr_in_statement()?;
            self.terminal()?;
            return Ok(Stmt::Assign(Assign {
                left,
                operator,
                expr,
            }));
        }

        // a comma stands in for the line terminator in joined statements
        if self.kind() == TokenKind::Comma {
            self.eat();
        } else {
            self.terminal()?;
        }
        Ok(Stmt::ExprStmt(ExprStmt {
            expr: Expr::Factor(left),
        }))
    }

    /// `id(` opens either a function definition or a call statement; the
    /// grammar is not locally distinguishable at the name, so scan to the
    /// matching close paren, look one token further for a block, and rewind.
    fn func(&mut self) -> ParseResult<Stmt> {
        let name_pos = self.buffer.cursor();
        let name = self.eat();
        let paren_pos = self.buffer.cursor();

        let mut unclosed = 1u32;
        while unclosed > 0 && self.kind() != TokenKind::Eof {
            match self.buffer.peek().kind {
                TokenKind::CloseParen => unclosed -= 1,
                TokenKind::OpenParen => unclosed += 1,
                _ => {}
            }
            self.advance();
        }
        self.advance();

        if self.eat_discard_cr(TokenKind::OpenBrace).is_some() {
            self.buffer.backto(paren_pos);
            let params = self.parameters()?;
            let body = self.block()?;
            return Ok(Stmt::FuncDef(FuncDef { name, params, body }));
        }

        self.buffer.backto(name_pos);
        let saved_mode = self.buffer.hotkey_mode();
        self.buffer.set_hotkey_mode(false);
        let call = self.factor();
        self.buffer.set_hotkey_mode(saved_mode);
        let call = call?;

        if self.kind() == TokenKind::Comma {
            self.eat();
        } else {
            self.terminal()?;
        }
        Ok(Stmt::ExprStmt(ExprStmt {
            expr: Expr::Factor(call),
        }))
    }

    fn parameters(&mut self) -> ParseResult<ParamList> {
        let open = self.eat();
        let mut params = Vec::new();

        if self.kind() != TokenKind::CloseParen {
            loop {
                let byref = if self.kind() == TokenKind::ByRef {
                    Some(self.eat())
                } else {
                    None
                };
                let name = self.eat_expect(TokenKind::Id, "Expect an identifier in parameter")?;
                let default = if self.match_tokens(&[TokenKind::Aassign, TokenKind::Equal]) {
                    let assign = self.eat();
                    let value = self.expr_in_statement()?;
                    Some((assign, value))
                } else {
                    None
                };
                params.push(Param {
                    byref,
                    name,
                    default,
                });
                if self.eat_discard_cr(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let close = self.eat_expect(TokenKind::CloseParen, "Expect a \")\"")?;
        Ok(ParamList {
            open,
            params,
            close,
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// An expression embedded in a statement. Hotkey-sensitive lexing is
    /// suspended for the full extent of the expression and restored on exit;
    /// structural errors propagate to the enclosing statement boundary, so
    /// one malformed line costs one statement-level `Invalid` and one
    /// diagnostic.
    fn expr_in_statement(&mut self) -> ParseResult<Expr> {
        let saved_mode = self.buffer.hotkey_mode();
        self.buffer.set_hotkey_mode(false);
        let result = self.expression_prec(0);
        self.buffer.set_hotkey_mode(saved_mode);
        result
    }

    /// The expression-level recovery boundary, for the single-expression
    /// entry point: a structural error becomes an `Invalid` expression
    /// spanning the consumed tokens plus the one recovery stopped on.
    fn expression(&mut self) -> ParseResult<Expr> {
        let start = self.buffer.cursor();
        let depth0 = self.depth;
        let saved_mode = self.buffer.hotkey_mode();
        self.buffer.set_hotkey_mode(false);
        let result = self.expression_prec(0);
        self.buffer.set_hotkey_mode(saved_mode);
        self.depth = depth0;

        match result {
            Ok(expr) => Ok(expr),
            Err(ParseFailure::Syntax(error)) => {
                self.synchronize();
                let tokens = self.recovered_tokens(start);
                let position = tokens[0].start;
                self.syntax_errors.push(error);
                Ok(Expr::Invalid(InvalidExpr { position, tokens }))
            }
            Err(internal) => Err(internal),
        }
    }

    /// Precedence climbing with minimum binding power `p`.
    fn expression_prec(&mut self, p: u8) -> ParseResult<Expr> {
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(ParseFailure::Internal(format!(
                "expression nesting exceeds {MAX_RECURSION_DEPTH}"
            )));
        }
        self.depth += 1;
        let result = self.expression_prec_inner(p);
        self.depth -= 1;
        result
    }

    fn expression_prec_inner(&mut self, p: u8) -> ParseResult<Expr> {
        let mut result = match self.kind() {
            kind if kind.is_prefix_unary() => {
                let operator = self.eat();
                let q = if operator.kind.is_incr_decr() {
                    UPDATE
                } else {
                    UNARY
                };
                let operand = self.expression_prec(q)?;
                Expr::Unary(Unary {
                    operator,
                    operand: Box::new(operand),
                })
            }
            TokenKind::OpenParen => Expr::Factor(self.factor()?),
            kind if kind.is_value_start() => Expr::Factor(self.factor()?),
            _ => return Err(self.error_current("Expect an expression")),
        };

        loop {
            let kind = self.kind();

            // left-associative infix
            if kind.is_binary_operator() && operator_precedence(kind) >= p {
                let operator = self.eat();
                let q = operator_precedence(operator.kind);
                let right = self.expression_prec(q + 1)?;
                result = Expr::Binary(Binary {
                    left: Box::new(result),
                    operator,
                    right: Box::new(right),
                });
                continue;
            }

            // postfix increment/decrement wrap what is already built
            if kind.is_incr_decr() && operator_precedence(kind) >= p {
                let operator = self.eat();
                result = Expr::Unary(Unary {
                    operator,
                    operand: Box::new(result),
                });
                continue;
            }

            // right-associative: ternary and the assignment family
            if kind.is_right_assoc() && operator_precedence(kind) >= p {
                let operator = self.eat();
                let q = operator_precedence(operator.kind);

                if operator.kind == TokenKind::Question {
                    // the true branch is unconstrained; only the false
                    // branch continues at this tier
                    let true_expr = self.expression_prec(0)?;
                    let colon = self
                        .eat_expect(TokenKind::Colon, "Expect a \":\" in ternary expression")?;
                    let false_expr = self.expression_prec(q)?;
                    result = Expr::Ternary(Ternary {
                        condition: Box::new(result),
                        question: operator,
                        true_expr: Box::new(true_expr),
                        colon,
                        false_expr: Box::new(false_expr),
                    });
                } else {
                    let right = self.expression_prec(q)?;
                    result = Expr::Binary(Binary {
                        left: Box::new(result),
                        operator,
                        right: Box::new(right),
                    });
                }
                continue;
            }

            // implicit concatenation: two adjacent values with no operator
            // between them string-join. An `{` that ends its line opens a
            // block, never a value.
            if kind.is_value_start()
                && CONCAT >= p
                && !(kind == TokenKind::OpenBrace
                    && matches!(self.buffer.peek().kind, TokenKind::Eol | TokenKind::Eof))
            {
                let right = self.expression_prec(CONCAT + 1)?;
                let connective = Token::new(
                    TokenKind::ImplicitConcat,
                    " ",
                    result.end(),
                    result.end(),
                );
                result = Expr::Binary(Binary {
                    left: Box::new(result),
                    operator: connective,
                    right: Box::new(right),
                });
                continue;
            }

            break;
        }

        Ok(result)
    }

    // ========================================================================
    // Suffix terms
    // ========================================================================

    /// One suffix term plus an optional dotted access chain.
    fn factor(&mut self) -> ParseResult<Factor> {
        let suffix_term = self.suffix_term(false)?;
        let mut factor = Factor::new(suffix_term);

        if self.kind() == TokenKind::Dot {
            let mut links = Vec::new();
            while self.kind() == TokenKind::Dot {
                let dot = self.eat();
                let term = self.suffix_term(true)?;
                links.push((dot, term));
            }

            // link rightward: each trailer owns the dot and trailer of the
            // link after it, and is never re-linked once placed
            let mut next: Option<Box<SuffixTrailer>> = None;
            let mut next_dot: Option<Token> = None;
            for (dot, term) in links.into_iter().rev() {
                next = Some(Box::new(SuffixTrailer {
                    suffix_term: term,
                    dot: next_dot.take(),
                    trailer: next.take(),
                }));
                next_dot = Some(dot);
            }
            factor.dot = next_dot;
            factor.trailer = next;
        }

        Ok(factor)
    }

    fn suffix_term(&mut self, is_tailor: bool) -> ParseResult<SuffixTerm> {
        let atom = self.atom(is_tailor)?;
        let mut trailers = Vec::new();

        if !atom.is_invalid() {
            loop {
                match self.kind() {
                    TokenKind::OpenBracket => {
                        trailers.push(Trailer::BracketIndex(self.bracket_index()?));
                    }
                    TokenKind::OpenParen => {
                        trailers.push(Trailer::Call(self.call_trailer()?));
                    }
                    _ => break,
                }
            }
        }

        Ok(SuffixTerm { atom, trailers })
    }

    fn atom(&mut self, is_tailor: bool) -> ParseResult<Atom> {
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(ParseFailure::Internal(format!(
                "term nesting exceeds {MAX_RECURSION_DEPTH}"
            )));
        }
        match self.kind() {
            TokenKind::Id => Ok(Atom::Identifier(Identifier { token: self.eat() })),
            // keywords are admissible names in trailer position (`obj.class`)
            kind if is_tailor && kind.is_keyword() => {
                Ok(Atom::Identifier(Identifier { token: self.eat() }))
            }
            TokenKind::Number | TokenKind::String => Ok(Atom::Literal(Literal { token: self.eat() })),
            TokenKind::Percent => {
                let open = self.eat();
                self.depth += 1;
                let inner = self.atom(false);
                self.depth -= 1;
                let inner = inner?;
                if self.kind() != TokenKind::Percent {
                    return Err(self.error_current("Expect \"%\" to close dereference"));
                }
                let close = self.eat();
                // a deref around a single token keeps its percent pair; a
                // composite inner atom substitutes directly
                match inner {
                    Atom::Identifier(id) => Ok(Atom::PercentDeref(PercentDeref {
                        open,
                        value: id.token,
                        close,
                    })),
                    Atom::Literal(lit) => Ok(Atom::PercentDeref(PercentDeref {
                        open,
                        value: lit.token,
                        close,
                    })),
                    other => Ok(other),
                }
            }
            TokenKind::OpenBracket => self.array_term(),
            TokenKind::OpenBrace => self.associative_array(),
            TokenKind::OpenParen => self.grouping(),
            _ => {
                if is_tailor {
                    // a missing trailer atom is locally recoverable
                    let previous = self.buffer.previous().clone();
                    let position = previous.end;
                    self.syntax_errors
                        .push(ParseError::new(previous, "Expected suffix"));
                    Ok(Atom::Invalid(InvalidAtom { position }))
                } else {
                    Err(self.error_current("Expect an expression"))
                }
            }
        }
    }

    fn grouping(&mut self) -> ParseResult<Atom> {
        let open = self.eat();
        let expr = self.expression_prec(0)?;
        let close = self.eat_expect(TokenKind::CloseParen, "Expect a \")\" to close grouping")?;
        Ok(Atom::Grouping(Grouping {
            open,
            expr: Box::new(expr),
            close,
        }))
    }

    fn array_term(&mut self) -> ParseResult<Atom> {
        let open = self.eat();
        let mut items = Vec::new();

        if self.kind() != TokenKind::CloseBracket && self.kind() != TokenKind::Eof {
            items.push(self.expression_prec(0)?);
            while self.eat_discard_cr(TokenKind::Comma).is_some() {
                items.push(self.expression_prec(0)?);
            }
        }

        let close = self.eat_expect(TokenKind::CloseBracket, "Expect a \"]\" to end array")?;
        Ok(Atom::ArrayTerm(ArrayTerm { open, items, close }))
    }

    fn associative_array(&mut self) -> ParseResult<Atom> {
        let open = self.eat();
        let mut pairs = Vec::new();

        if self.kind() != TokenKind::CloseBrace && self.kind() != TokenKind::Eof {
            loop {
                pairs.push(self.pair()?);
                if self.eat_discard_cr(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let close = self.eat_expect(
            TokenKind::CloseBrace,
            "Expect a \"}\" at the end of associative array",
        )?;
        Ok(Atom::AssociativeArray(AssociativeArray { open, pairs, close }))
    }

    fn pair(&mut self) -> ParseResult<Pair> {
        let key = self.expression_prec(0)?;

        if let Some(colon) = self.eat_discard_cr(TokenKind::Colon) {
            let value = self.expression_prec(0)?;
            return Ok(Pair { key, colon, value });
        }

        // no colon: diagnose, leave an invalid value, keep the siblings
        let current = self.buffer.current().clone();
        self.syntax_errors.push(ParseError::new(
            current.clone(),
            "Expect a \":\" between key and value in associative array",
        ));
        Ok(Pair {
            key,
            colon: current.clone(),
            value: Expr::Invalid(InvalidExpr {
                position: current.start,
                tokens: vec![current],
            }),
        })
    }

    fn bracket_index(&mut self) -> ParseResult<BracketIndex> {
        let open = self.eat();
        let index = self.expression_prec(0)?;
        let close = self.eat_expect(TokenKind::CloseBracket, "Expect a \"]\" at end of index")?;
        Ok(BracketIndex {
            open,
            index: Box::new(index),
            close,
        })
    }

    fn call_trailer(&mut self) -> ParseResult<Call> {
        let open = self.eat();
        let mut args = Vec::new();

        if self.kind() != TokenKind::CloseParen && self.kind() != TokenKind::Eof {
            if self.kind() == TokenKind::Comma {
                args.push(self.empty_arg());
            } else {
                args.push(self.expression_prec(0)?);
            }
            while self.eat_discard_cr(TokenKind::Comma).is_some() {
                if self.kind() == TokenKind::Comma || self.kind() == TokenKind::CloseParen {
                    args.push(self.empty_arg());
                } else {
                    args.push(self.expression_prec(0)?);
                }
            }
        }

        let close = self.eat_expect(TokenKind::CloseParen, "Expect a \")\" at end of call")?;
        Ok(Call { open, args, close })
    }

    /// An elided argument: a zero-width empty string literal anchored where
    /// the argument would have started.
    fn empty_arg(&mut self) -> Expr {
        let position = self.buffer.current().start;
        Expr::Factor(Factor::new(SuffixTerm {
            atom: Atom::Literal(Literal {
                token: Token::new(TokenKind::String, "", position, position),
            }),
            trailers: Vec::new(),
        }))
    }
}
