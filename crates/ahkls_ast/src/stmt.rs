//! Statement and declaration nodes.

use crate::expr::{Expr, Factor};
use crate::node::{join_lines, join_list, SyntaxNode};
use crate::token::Token;
use ahkls_core::{Position, Range};

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Block),
    If(If),
    Loop(Loop),
    UntilLoop(UntilLoop),
    While(While),
    For(For),
    Switch(Switch),
    Try(Try),
    Break(Break),
    Return(Return),
    VarDecl(VarDecl),
    ClassDef(ClassDef),
    FuncDef(FuncDef),
    Label(Label),
    Hotkey(Hotkey),
    HotString(HotString),
    Directive(Directive),
    Assign(Assign),
    ExprStmt(ExprStmt),
    Invalid(InvalidStmt),
}

impl Stmt {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Stmt::Invalid(_))
    }
}

impl SyntaxNode for Stmt {
    fn start(&self) -> Position {
        match self {
            Stmt::Block(n) => n.start(),
            Stmt::If(n) => n.start(),
            Stmt::Loop(n) => n.start(),
            Stmt::UntilLoop(n) => n.start(),
            Stmt::While(n) => n.start(),
            Stmt::For(n) => n.start(),
            Stmt::Switch(n) => n.start(),
            Stmt::Try(n) => n.start(),
            Stmt::Break(n) => n.start(),
            Stmt::Return(n) => n.start(),
            Stmt::VarDecl(n) => n.start(),
            Stmt::ClassDef(n) => n.start(),
            Stmt::FuncDef(n) => n.start(),
            Stmt::Label(n) => n.start(),
            Stmt::Hotkey(n) => n.start(),
            Stmt::HotString(n) => n.start(),
            Stmt::Directive(n) => n.start(),
            Stmt::Assign(n) => n.start(),
            Stmt::ExprStmt(n) => n.start(),
            Stmt::Invalid(n) => n.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Stmt::Block(n) => n.end(),
            Stmt::If(n) => n.end(),
            Stmt::Loop(n) => n.end(),
            Stmt::UntilLoop(n) => n.end(),
            Stmt::While(n) => n.end(),
            Stmt::For(n) => n.end(),
            Stmt::Switch(n) => n.end(),
            Stmt::Try(n) => n.end(),
            Stmt::Break(n) => n.end(),
            Stmt::Return(n) => n.end(),
            Stmt::VarDecl(n) => n.end(),
            Stmt::ClassDef(n) => n.end(),
            Stmt::FuncDef(n) => n.end(),
            Stmt::Label(n) => n.end(),
            Stmt::Hotkey(n) => n.end(),
            Stmt::HotString(n) => n.end(),
            Stmt::Directive(n) => n.end(),
            Stmt::Assign(n) => n.end(),
            Stmt::ExprStmt(n) => n.end(),
            Stmt::Invalid(n) => n.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        match self {
            Stmt::Block(n) => n.ranges(),
            Stmt::If(n) => n.ranges(),
            Stmt::Loop(n) => n.ranges(),
            Stmt::UntilLoop(n) => n.ranges(),
            Stmt::While(n) => n.ranges(),
            Stmt::For(n) => n.ranges(),
            Stmt::Switch(n) => n.ranges(),
            Stmt::Try(n) => n.ranges(),
            Stmt::Break(n) => n.ranges(),
            Stmt::Return(n) => n.ranges(),
            Stmt::VarDecl(n) => n.ranges(),
            Stmt::ClassDef(n) => n.ranges(),
            Stmt::FuncDef(n) => n.ranges(),
            Stmt::Label(n) => n.ranges(),
            Stmt::Hotkey(n) => n.ranges(),
            Stmt::HotString(n) => n.ranges(),
            Stmt::Directive(n) => n.ranges(),
            Stmt::Assign(n) => n.ranges(),
            Stmt::ExprStmt(n) => n.ranges(),
            Stmt::Invalid(n) => n.ranges(),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        match self {
            Stmt::Block(n) => n.to_lines(),
            Stmt::If(n) => n.to_lines(),
            Stmt::Loop(n) => n.to_lines(),
            Stmt::UntilLoop(n) => n.to_lines(),
            Stmt::While(n) => n.to_lines(),
            Stmt::For(n) => n.to_lines(),
            Stmt::Switch(n) => n.to_lines(),
            Stmt::Try(n) => n.to_lines(),
            Stmt::Break(n) => n.to_lines(),
            Stmt::Return(n) => n.to_lines(),
            Stmt::VarDecl(n) => n.to_lines(),
            Stmt::ClassDef(n) => n.to_lines(),
            Stmt::FuncDef(n) => n.to_lines(),
            Stmt::Label(n) => n.to_lines(),
            Stmt::Hotkey(n) => n.to_lines(),
            Stmt::HotString(n) => n.to_lines(),
            Stmt::Directive(n) => n.to_lines(),
            Stmt::Assign(n) => n.to_lines(),
            Stmt::ExprStmt(n) => n.to_lines(),
            Stmt::Invalid(n) => n.to_lines(),
        }
    }
}

fn stmt_list_lines(statements: &[Stmt]) -> Vec<String> {
    statements.iter().flat_map(|s| s.to_lines()).collect()
}

/// `{ ... }`
#[derive(Debug, Clone)]
pub struct Block {
    pub open: Token,
    pub statements: Vec<Stmt>,
    pub close: Token,
}

impl SyntaxNode for Block {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.open.range()];
        ranges.extend(self.statements.iter().map(|s| s.range()));
        ranges.push(self.close.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.open.content.clone()];
        lines.extend(stmt_list_lines(&self.statements));
        lines.push(self.close.content.clone());
        lines
    }
}

/// `if cond body [else body]`
#[derive(Debug, Clone)]
pub struct If {
    pub if_token: Token,
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub else_stmt: Option<Else>,
}

#[derive(Debug, Clone)]
pub struct Else {
    pub else_token: Token,
    pub body: Box<Stmt>,
}

impl SyntaxNode for If {
    fn start(&self) -> Position {
        self.if_token.start
    }

    fn end(&self) -> Position {
        match &self.else_stmt {
            Some(e) => e.body.end(),
            None => self.body.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![
            self.if_token.range(),
            self.condition.range(),
            self.body.range(),
        ];
        if let Some(e) = &self.else_stmt {
            ranges.push(e.else_token.range());
            ranges.push(e.body.range());
        }
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = join_lines(
            vec![self.if_token.content.clone()],
            " ",
            self.condition.to_lines(),
        );
        lines.extend(self.body.to_lines());
        if let Some(e) = &self.else_stmt {
            lines.extend(join_lines(
                vec![e.else_token.content.clone()],
                " ",
                e.body.to_lines(),
            ));
        }
        lines
    }
}

/// `loop [count-or-expr] body`
#[derive(Debug, Clone)]
pub struct Loop {
    pub loop_token: Token,
    pub condition: Option<Expr>,
    pub body: Box<Stmt>,
}

impl SyntaxNode for Loop {
    fn start(&self) -> Position {
        self.loop_token.start
    }

    fn end(&self) -> Position {
        self.body.end()
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.loop_token.range()];
        if let Some(c) = &self.condition {
            ranges.push(c.range());
        }
        ranges.push(self.body.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.loop_token.content.clone()];
        if let Some(c) = &self.condition {
            lines = join_lines(lines, " ", c.to_lines());
        }
        lines.extend(self.body.to_lines());
        lines
    }
}

/// `loop body ... until cond`
#[derive(Debug, Clone)]
pub struct UntilLoop {
    pub loop_token: Token,
    pub body: Box<Stmt>,
    pub until_token: Token,
    pub condition: Expr,
}

impl SyntaxNode for UntilLoop {
    fn start(&self) -> Position {
        self.loop_token.start
    }

    fn end(&self) -> Position {
        self.condition.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![
            self.loop_token.range(),
            self.body.range(),
            self.until_token.range(),
            self.condition.range(),
        ]
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.loop_token.content.clone()];
        lines.extend(self.body.to_lines());
        lines.extend(join_lines(
            vec![self.until_token.content.clone()],
            " ",
            self.condition.to_lines(),
        ));
        lines
    }
}

/// `while cond body`
#[derive(Debug, Clone)]
pub struct While {
    pub while_token: Token,
    pub condition: Expr,
    pub body: Box<Stmt>,
}

impl SyntaxNode for While {
    fn start(&self) -> Position {
        self.while_token.start
    }

    fn end(&self) -> Position {
        self.body.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![
            self.while_token.range(),
            self.condition.range(),
            self.body.range(),
        ]
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = join_lines(
            vec![self.while_token.content.clone()],
            " ",
            self.condition.to_lines(),
        );
        lines.extend(self.body.to_lines());
        lines
    }
}

/// `for k [, v] in iterable body`
#[derive(Debug, Clone)]
pub struct For {
    pub for_token: Token,
    pub id1: Token,
    pub comma: Option<Token>,
    pub id2: Option<Token>,
    pub in_token: Token,
    pub iterable: Expr,
    pub body: Box<Stmt>,
}

impl SyntaxNode for For {
    fn start(&self) -> Position {
        self.for_token.start
    }

    fn end(&self) -> Position {
        self.body.end()
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.for_token.range(), self.id1.range()];
        if let (Some(comma), Some(id2)) = (&self.comma, &self.id2) {
            ranges.push(comma.range());
            ranges.push(id2.range());
        }
        ranges.push(self.in_token.range());
        ranges.push(self.iterable.range());
        ranges.push(self.body.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut head = format!("{} {}", self.for_token.content, self.id1.content);
        if let Some(id2) = &self.id2 {
            head.push_str(", ");
            head.push_str(&id2.content);
        }
        head.push(' ');
        head.push_str(&self.in_token.content);
        let mut lines = join_lines(vec![head], " ", self.iterable.to_lines());
        lines.extend(self.body.to_lines());
        lines
    }
}

/// `switch cond { case ...: ... default: ... }`
#[derive(Debug, Clone)]
pub struct Switch {
    pub switch_token: Token,
    pub condition: Expr,
    pub open: Token,
    pub cases: Vec<CaseStmt>,
    pub close: Token,
}

impl SyntaxNode for Switch {
    fn start(&self) -> Position {
        self.switch_token.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![
            self.switch_token.range(),
            self.condition.range(),
            self.open.range(),
        ];
        ranges.extend(self.cases.iter().map(|c| c.range()));
        ranges.push(self.close.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = join_lines(
            vec![self.switch_token.content.clone()],
            " ",
            self.condition.to_lines(),
        );
        lines = join_lines(lines, " ", vec![self.open.content.clone()]);
        for case in &self.cases {
            lines.extend(case.to_lines());
        }
        lines.push(self.close.content.clone());
        lines
    }
}

/// One arm of a switch: its head plus the statements that run until the next
/// arm.
#[derive(Debug, Clone)]
pub struct CaseStmt {
    pub case: CaseNode,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum CaseNode {
    Case(CaseExpr),
    Default(DefaultCase),
}

/// `case e1, e2:`
#[derive(Debug, Clone)]
pub struct CaseExpr {
    pub case_token: Token,
    pub conditions: Vec<Expr>,
    pub colon: Token,
}

/// The `default:` label.
#[derive(Debug, Clone)]
pub struct DefaultCase {
    pub token: Token,
}

impl SyntaxNode for CaseStmt {
    fn start(&self) -> Position {
        match &self.case {
            CaseNode::Case(c) => c.case_token.start,
            CaseNode::Default(d) => d.token.start,
        }
    }

    fn end(&self) -> Position {
        if let Some(last) = self.statements.last() {
            return last.end();
        }
        match &self.case {
            CaseNode::Case(c) => c.colon.end,
            CaseNode::Default(d) => d.token.end,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = match &self.case {
            CaseNode::Case(c) => {
                let mut r = vec![c.case_token.range()];
                r.extend(c.conditions.iter().map(|e| e.range()));
                r.push(c.colon.range());
                r
            }
            CaseNode::Default(d) => vec![d.token.range()],
        };
        ranges.extend(self.statements.iter().map(|s| s.range()));
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = match &self.case {
            CaseNode::Case(c) => {
                let conds = c.conditions.iter().map(|e| e.to_lines()).collect();
                let mut head = join_lines(
                    vec![format!("{} ", c.case_token.content)],
                    "",
                    join_list(conds, ", "),
                );
                if let Some(last) = head.last_mut() {
                    last.push_str(&c.colon.content);
                }
                head
            }
            CaseNode::Default(d) => vec![d.token.content.clone()],
        };
        lines.extend(stmt_list_lines(&self.statements));
        lines
    }
}

/// `try body [catch [var] body] [finally body]`
#[derive(Debug, Clone)]
pub struct Try {
    pub try_token: Token,
    pub body: Box<Stmt>,
    pub catch_stmt: Option<CatchStmt>,
    pub finally_stmt: Option<FinallyStmt>,
}

#[derive(Debug, Clone)]
pub struct CatchStmt {
    pub catch_token: Token,
    pub variable: Option<Token>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone)]
pub struct FinallyStmt {
    pub finally_token: Token,
    pub body: Box<Stmt>,
}

impl SyntaxNode for Try {
    fn start(&self) -> Position {
        self.try_token.start
    }

    fn end(&self) -> Position {
        if let Some(f) = &self.finally_stmt {
            return f.body.end();
        }
        if let Some(c) = &self.catch_stmt {
            return c.body.end();
        }
        self.body.end()
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.try_token.range(), self.body.range()];
        if let Some(c) = &self.catch_stmt {
            ranges.push(c.catch_token.range());
            if let Some(v) = &c.variable {
                ranges.push(v.range());
            }
            ranges.push(c.body.range());
        }
        if let Some(f) = &self.finally_stmt {
            ranges.push(f.finally_token.range());
            ranges.push(f.body.range());
        }
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.try_token.content.clone()];
        lines.extend(self.body.to_lines());
        if let Some(c) = &self.catch_stmt {
            let mut head = c.catch_token.content.clone();
            if let Some(v) = &c.variable {
                head.push(' ');
                head.push_str(&v.content);
            }
            lines.push(head);
            lines.extend(c.body.to_lines());
        }
        if let Some(f) = &self.finally_stmt {
            lines.push(f.finally_token.content.clone());
            lines.extend(f.body.to_lines());
        }
        lines
    }
}

/// `break [label]`
#[derive(Debug, Clone)]
pub struct Break {
    pub break_token: Token,
    pub label: Option<Token>,
}

impl SyntaxNode for Break {
    fn start(&self) -> Position {
        self.break_token.start
    }

    fn end(&self) -> Position {
        match &self.label {
            Some(l) => l.end,
            None => self.break_token.end,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.break_token.range()];
        if let Some(l) = &self.label {
            ranges.push(l.range());
        }
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        match &self.label {
            Some(l) => vec![format!("{} {}", self.break_token.content, l.content)],
            None => vec![self.break_token.content.clone()],
        }
    }
}

/// `return [expr]`
#[derive(Debug, Clone)]
pub struct Return {
    pub return_token: Token,
    pub value: Option<Expr>,
}

impl SyntaxNode for Return {
    fn start(&self) -> Position {
        self.return_token.start
    }

    fn end(&self) -> Position {
        match &self.value {
            Some(v) => v.end(),
            None => self.return_token.end,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.return_token.range()];
        if let Some(v) = &self.value {
            ranges.push(v.range());
        }
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        match &self.value {
            Some(v) => join_lines(vec![self.return_token.content.clone()], " ", v.to_lines()),
            None => vec![self.return_token.content.clone()],
        }
    }
}

/// `global|local|static name [:= expr], name [:= expr], ...`
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub scope: Token,
    pub bindings: Vec<Binding>,
}

/// One declared binding. A malformed binding position keeps the offending
/// token as `name` and an `Invalid` value so later siblings still parse.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Token,
    pub assign: Option<Token>,
    pub value: Option<Expr>,
}

impl Binding {
    fn lines(&self) -> Vec<String> {
        match (&self.assign, &self.value) {
            (Some(assign), Some(value)) => join_lines(
                vec![format!("{} {} ", self.name.content, assign.content)],
                "",
                value.to_lines(),
            ),
            _ => vec![self.name.content.clone()],
        }
    }

    fn end(&self) -> Position {
        match &self.value {
            Some(v) => v.end().max(self.name.end),
            None => self.name.end,
        }
    }
}

impl SyntaxNode for VarDecl {
    fn start(&self) -> Position {
        self.scope.start
    }

    fn end(&self) -> Position {
        match self.bindings.last() {
            Some(b) => b.end(),
            None => self.scope.end,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.scope.range()];
        for b in &self.bindings {
            ranges.push(Range::new(b.name.start, b.end()));
        }
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let bindings = self.bindings.iter().map(Binding::lines).collect();
        join_lines(
            vec![format!("{} ", self.scope.content)],
            "",
            join_list(bindings, ", "),
        )
    }
}

/// `class Name [extends Parent] { ... }`
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub class_token: Token,
    pub name: Token,
    pub extends_token: Option<Token>,
    pub parent: Option<Token>,
    pub body: Block,
}

impl SyntaxNode for ClassDef {
    fn start(&self) -> Position {
        self.class_token.start
    }

    fn end(&self) -> Position {
        self.body.end()
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.class_token.range(), self.name.range()];
        if let (Some(ext), Some(parent)) = (&self.extends_token, &self.parent) {
            ranges.push(ext.range());
            ranges.push(parent.range());
        }
        ranges.push(self.body.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut head = format!("{} {}", self.class_token.content, self.name.content);
        if let (Some(ext), Some(parent)) = (&self.extends_token, &self.parent) {
            head.push(' ');
            head.push_str(&ext.content);
            head.push(' ');
            head.push_str(&parent.content);
        }
        let mut lines = vec![head];
        lines.extend(self.body.to_lines());
        lines
    }
}

/// `name(params) { ... }`
#[derive(Debug, Clone)]
pub struct FuncDef {
    pub name: Token,
    pub params: ParamList,
    pub body: Block,
}

/// The parenthesized parameter list of a function definition.
#[derive(Debug, Clone)]
pub struct ParamList {
    pub open: Token,
    pub params: Vec<Param>,
    pub close: Token,
}

/// One parameter: optional `ByRef`, a name, an optional default value.
#[derive(Debug, Clone)]
pub struct Param {
    pub byref: Option<Token>,
    pub name: Token,
    pub default: Option<(Token, Expr)>,
}

impl Param {
    fn lines(&self) -> Vec<String> {
        let mut head = String::new();
        if let Some(byref) = &self.byref {
            head.push_str(&byref.content);
            head.push(' ');
        }
        head.push_str(&self.name.content);
        match &self.default {
            Some((assign, value)) => {
                head.push(' ');
                head.push_str(&assign.content);
                head.push(' ');
                join_lines(vec![head], "", value.to_lines())
            }
            None => vec![head],
        }
    }

    fn start(&self) -> Position {
        match &self.byref {
            Some(b) => b.start,
            None => self.name.start,
        }
    }

    fn end(&self) -> Position {
        match &self.default {
            Some((_, v)) => v.end().max(self.name.end),
            None => self.name.end,
        }
    }
}

impl SyntaxNode for ParamList {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.open.range()];
        for p in &self.params {
            ranges.push(Range::new(p.start(), p.end()));
        }
        ranges.push(self.close.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        if self.params.is_empty() {
            return vec![format!("{}{}", self.open.content, self.close.content)];
        }
        let params = self.params.iter().map(Param::lines).collect();
        let mut lines = join_lines(
            vec![self.open.content.clone()],
            "",
            join_list(params, ", "),
        );
        if let Some(last) = lines.last_mut() {
            last.push_str(&self.close.content);
        }
        lines
    }
}

impl SyntaxNode for FuncDef {
    fn start(&self) -> Position {
        self.name.start
    }

    fn end(&self) -> Position {
        self.body.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.name.range(), self.params.range(), self.body.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = join_lines(
            vec![self.name.content.clone()],
            "",
            self.params.to_lines(),
        );
        lines.extend(self.body.to_lines());
        lines
    }
}

/// A `name:` jump label; the token content keeps its colon.
#[derive(Debug, Clone)]
pub struct Label {
    pub name: Token,
}

impl Label {
    /// The label name without its trailing colon.
    pub fn label_name(&self) -> &str {
        self.name.content.trim_end_matches(':')
    }
}

impl SyntaxNode for Label {
    fn start(&self) -> Position {
        self.name.start
    }

    fn end(&self) -> Position {
        self.name.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.name.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        vec![self.name.content.clone()]
    }
}

/// A hotkey declaration: `key::` or `key & key::`.
#[derive(Debug, Clone)]
pub struct Hotkey {
    pub key1: Key,
    pub and: Option<Token>,
    pub key2: Option<Key>,
    pub hotkey: Token,
}

/// One key (modifiers included) of a hotkey declaration.
#[derive(Debug, Clone)]
pub struct Key {
    pub token: Token,
}

impl SyntaxNode for Hotkey {
    fn start(&self) -> Position {
        self.key1.token.start
    }

    fn end(&self) -> Position {
        self.hotkey.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.key1.token.range()];
        if let (Some(and), Some(key2)) = (&self.and, &self.key2) {
            ranges.push(and.range());
            ranges.push(key2.token.range());
        }
        ranges.push(self.hotkey.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut line = self.key1.token.content.clone();
        if let (Some(and), Some(key2)) = (&self.and, &self.key2) {
            line.push(' ');
            line.push_str(&and.content);
            line.push(' ');
            line.push_str(&key2.token.content);
        }
        line.push_str(&self.hotkey.content);
        vec![line]
    }
}

/// A hotstring declaration: `:options:trigger::expansion`.
#[derive(Debug, Clone)]
pub struct HotString {
    pub option: Token,
    pub trigger: Token,
    pub expansion: Token,
}

impl SyntaxNode for HotString {
    fn start(&self) -> Position {
        self.option.start
    }

    fn end(&self) -> Position {
        self.expansion.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![
            self.option.range(),
            self.trigger.range(),
            self.expansion.range(),
        ]
    }

    fn to_lines(&self) -> Vec<String> {
        use crate::token_kind::TokenKind;
        let mut line = format!("{}{}", self.option.content, self.trigger.content);
        // deferred expansions terminate the line instead of providing text
        if self.expansion.kind != TokenKind::Eol {
            line.push_str(&self.expansion.content);
        }
        vec![line]
    }
}

/// A `#directive arg ...` line; the token content keeps its `#`.
#[derive(Debug, Clone)]
pub struct Directive {
    pub token: Token,
    pub args: Vec<Expr>,
}

impl SyntaxNode for Directive {
    fn start(&self) -> Position {
        self.token.start
    }

    fn end(&self) -> Position {
        match self.args.last() {
            Some(a) => a.end(),
            None => self.token.end,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.token.range()];
        ranges.extend(self.args.iter().map(|a| a.range()));
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.token.content.clone()];
        for arg in &self.args {
            lines = join_lines(lines, " ", arg.to_lines());
        }
        lines
    }
}

/// `target op expr` where target is a factor (variable, property, index).
#[derive(Debug, Clone)]
pub struct Assign {
    pub left: Factor,
    pub operator: Token,
    pub expr: Expr,
}

impl SyntaxNode for Assign {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.expr.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.left.range(), self.operator.range(), self.expr.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        join_lines(
            self.left.to_lines(),
            &format!(" {} ", self.operator.content),
            self.expr.to_lines(),
        )
    }
}

/// A bare expression in statement position (typically a call).
#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
}

impl SyntaxNode for ExprStmt {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.expr.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.expr.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        self.expr.to_lines()
    }
}

/// A statement that failed to parse: the exact tokens consumed during the
/// failed attempt, plus the token recovery stopped on.
#[derive(Debug, Clone)]
pub struct InvalidStmt {
    pub position: Position,
    pub tokens: Vec<Token>,
}

impl SyntaxNode for InvalidStmt {
    fn start(&self) -> Position {
        self.position
    }

    fn end(&self) -> Position {
        match self.tokens.last() {
            Some(t) => t.end,
            None => self.position,
        }
    }

    fn ranges(&self) -> Vec<Range> {
        self.tokens.iter().map(Token::range).collect()
    }

    fn to_lines(&self) -> Vec<String> {
        vec![String::new()]
    }
}
