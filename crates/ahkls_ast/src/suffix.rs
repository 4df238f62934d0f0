//! Suffix-term nodes: the operand grammar.
//!
//! A suffix term is an atom plus zero or more trailers (calls, bracket
//! indexes). Dotted property access chains are linked `SuffixTrailer` nodes:
//! each `.` introduces a new base/trailer pairing which may itself carry a
//! further trailer, so the chain grows rightward as a singly linked structure
//! rather than a flat path list.

use crate::expr::Expr;
use crate::node::{enclose_lines, join_lines, join_list, SyntaxNode};
use crate::token::Token;
use ahkls_core::{Position, Range};

/// The base item of a suffix term.
#[derive(Debug, Clone)]
pub enum Atom {
    Identifier(Identifier),
    Literal(Literal),
    Grouping(Grouping),
    ArrayTerm(ArrayTerm),
    AssociativeArray(AssociativeArray),
    PercentDeref(PercentDeref),
    Invalid(InvalidAtom),
}

impl Atom {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Atom::Invalid(_))
    }
}

impl SyntaxNode for Atom {
    fn start(&self) -> Position {
        match self {
            Atom::Identifier(n) => n.start(),
            Atom::Literal(n) => n.start(),
            Atom::Grouping(n) => n.start(),
            Atom::ArrayTerm(n) => n.start(),
            Atom::AssociativeArray(n) => n.start(),
            Atom::PercentDeref(n) => n.start(),
            Atom::Invalid(n) => n.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Atom::Identifier(n) => n.end(),
            Atom::Literal(n) => n.end(),
            Atom::Grouping(n) => n.end(),
            Atom::ArrayTerm(n) => n.end(),
            Atom::AssociativeArray(n) => n.end(),
            Atom::PercentDeref(n) => n.end(),
            Atom::Invalid(n) => n.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        match self {
            Atom::Identifier(n) => n.ranges(),
            Atom::Literal(n) => n.ranges(),
            Atom::Grouping(n) => n.ranges(),
            Atom::ArrayTerm(n) => n.ranges(),
            Atom::AssociativeArray(n) => n.ranges(),
            Atom::PercentDeref(n) => n.ranges(),
            Atom::Invalid(n) => n.ranges(),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        match self {
            Atom::Identifier(n) => n.to_lines(),
            Atom::Literal(n) => n.to_lines(),
            Atom::Grouping(n) => n.to_lines(),
            Atom::ArrayTerm(n) => n.to_lines(),
            Atom::AssociativeArray(n) => n.to_lines(),
            Atom::PercentDeref(n) => n.to_lines(),
            Atom::Invalid(n) => n.to_lines(),
        }
    }
}

/// An identifier atom.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
}

impl Identifier {
    /// Keywords are permitted in trailer position (`obj.class`); this flags
    /// them for the symbol pass.
    pub fn is_keyword(&self) -> bool {
        self.token.kind.is_keyword()
    }
}

impl SyntaxNode for Identifier {
    fn start(&self) -> Position {
        self.token.start
    }

    fn end(&self) -> Position {
        self.token.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.token.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        vec![self.token.content.clone()]
    }
}

/// A number or string literal atom.
#[derive(Debug, Clone)]
pub struct Literal {
    pub token: Token,
}

impl SyntaxNode for Literal {
    fn start(&self) -> Position {
        self.token.start
    }

    fn end(&self) -> Position {
        self.token.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.token.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        vec![self.token.content.clone()]
    }
}

/// A parenthesized sub-expression.
#[derive(Debug, Clone)]
pub struct Grouping {
    pub open: Token,
    pub expr: Box<Expr>,
    pub close: Token,
}

impl SyntaxNode for Grouping {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.open.range(), self.expr.range(), self.close.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        enclose_lines(self.expr.to_lines(), &self.open.content, &self.close.content)
    }
}

/// An array literal: `[a, b, c]`.
#[derive(Debug, Clone)]
pub struct ArrayTerm {
    pub open: Token,
    pub items: Vec<Expr>,
    pub close: Token,
}

impl SyntaxNode for ArrayTerm {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.open.range()];
        ranges.extend(self.items.iter().map(|i| i.range()));
        ranges.push(self.close.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let items = self.items.iter().map(|i| i.to_lines()).collect();
        let body = if self.items.is_empty() {
            vec![String::new()]
        } else {
            join_list(items, ", ")
        };
        enclose_lines(body, &self.open.content, &self.close.content)
    }
}

/// An associative-array literal: `{k1: v1, k2: v2}`.
#[derive(Debug, Clone)]
pub struct AssociativeArray {
    pub open: Token,
    pub pairs: Vec<Pair>,
    pub close: Token,
}

impl SyntaxNode for AssociativeArray {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.open.range()];
        ranges.extend(self.pairs.iter().map(|p| p.range()));
        ranges.push(self.close.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let pairs = self.pairs.iter().map(|p| p.to_lines()).collect();
        let body = if self.pairs.is_empty() {
            vec![String::new()]
        } else {
            join_list(pairs, ", ")
        };
        enclose_lines(body, &self.open.content, &self.close.content)
    }
}

/// One `key : value` entry of an associative array. A pair whose colon was
/// missing still exists, with an `Invalid` value, so sibling pairs parse.
#[derive(Debug, Clone)]
pub struct Pair {
    pub key: Expr,
    pub colon: Token,
    pub value: Expr,
}

impl SyntaxNode for Pair {
    fn start(&self) -> Position {
        self.key.start()
    }

    fn end(&self) -> Position {
        self.value.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.key.range(), self.colon.range(), self.value.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        join_lines(
            self.key.to_lines(),
            &format!("{} ", self.colon.content),
            self.value.to_lines(),
        )
    }
}

/// A `%name%` dereference around a single-token value. The `%` pair is kept
/// so the source span reconstructs.
#[derive(Debug, Clone)]
pub struct PercentDeref {
    pub open: Token,
    pub value: Token,
    pub close: Token,
}

impl SyntaxNode for PercentDeref {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.open.range(), self.value.range(), self.close.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        vec![format!(
            "{}{}{}",
            self.open.content, self.value.content, self.close.content
        )]
    }
}

/// Placeholder for a suffix term that failed to parse, anchored at the point
/// the trailer chain broke. It spans nothing and reconstructs to nothing.
#[derive(Debug, Clone)]
pub struct InvalidAtom {
    pub position: Position,
}

impl SyntaxNode for InvalidAtom {
    fn start(&self) -> Position {
        self.position
    }

    fn end(&self) -> Position {
        self.position
    }

    fn ranges(&self) -> Vec<Range> {
        Vec::new()
    }

    fn to_lines(&self) -> Vec<String> {
        vec![String::new()]
    }
}

/// A postfix continuation of a suffix term.
#[derive(Debug, Clone)]
pub enum Trailer {
    Call(Call),
    BracketIndex(BracketIndex),
}

impl SyntaxNode for Trailer {
    fn start(&self) -> Position {
        match self {
            Trailer::Call(n) => n.start(),
            Trailer::BracketIndex(n) => n.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Trailer::Call(n) => n.end(),
            Trailer::BracketIndex(n) => n.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        match self {
            Trailer::Call(n) => n.ranges(),
            Trailer::BracketIndex(n) => n.ranges(),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        match self {
            Trailer::Call(n) => n.to_lines(),
            Trailer::BracketIndex(n) => n.to_lines(),
        }
    }
}

/// A call trailer: `(arg, arg, ...)`. Elided arguments are zero-width empty
/// string literals, not holes.
#[derive(Debug, Clone)]
pub struct Call {
    pub open: Token,
    pub args: Vec<Expr>,
    pub close: Token,
}

impl SyntaxNode for Call {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.open.range()];
        ranges.extend(self.args.iter().map(|a| a.range()));
        ranges.push(self.close.range());
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        if self.args.is_empty() {
            return vec![format!("{}{}", self.open.content, self.close.content)];
        }
        let args = self.args.iter().map(|a| a.to_lines()).collect();
        enclose_lines(join_list(args, ", "), &self.open.content, &self.close.content)
    }
}

/// An index trailer: `[expr]`.
#[derive(Debug, Clone)]
pub struct BracketIndex {
    pub open: Token,
    pub index: Box<Expr>,
    pub close: Token,
}

impl SyntaxNode for BracketIndex {
    fn start(&self) -> Position {
        self.open.start
    }

    fn end(&self) -> Position {
        self.close.end
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.open.range(), self.index.range(), self.close.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        enclose_lines(self.index.to_lines(), &self.open.content, &self.close.content)
    }
}

/// An atom plus the trailers attached directly to it.
#[derive(Debug, Clone)]
pub struct SuffixTerm {
    pub atom: Atom,
    pub trailers: Vec<Trailer>,
}

impl SyntaxNode for SuffixTerm {
    fn start(&self) -> Position {
        self.atom.start()
    }

    fn end(&self) -> Position {
        match self.trailers.last() {
            Some(t) => t.end(),
            None => self.atom.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        let mut ranges = vec![self.atom.range()];
        ranges.extend(self.trailers.iter().map(|t| t.range()));
        ranges
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = self.atom.to_lines();
        for trailer in &self.trailers {
            lines = join_lines(lines, "", trailer.to_lines());
        }
        lines
    }
}

/// One link of a dotted access chain. `dot` and `trailer` point at the next
/// link, if any; once linked, they are never reassigned.
#[derive(Debug, Clone)]
pub struct SuffixTrailer {
    pub suffix_term: SuffixTerm,
    pub dot: Option<Token>,
    pub trailer: Option<Box<SuffixTrailer>>,
}

impl SuffixTrailer {
    /// Number of links in the chain starting at this one.
    pub fn chain_len(&self) -> usize {
        1 + self.trailer.as_ref().map_or(0, |t| t.chain_len())
    }
}

impl SyntaxNode for SuffixTrailer {
    fn start(&self) -> Position {
        self.suffix_term.start()
    }

    fn end(&self) -> Position {
        match &self.trailer {
            Some(t) => t.end(),
            None => self.suffix_term.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        match (&self.dot, &self.trailer) {
            (Some(dot), Some(trailer)) => {
                vec![self.suffix_term.range(), dot.range(), trailer.range()]
            }
            _ => vec![self.suffix_term.range()],
        }
    }

    fn to_lines(&self) -> Vec<String> {
        let lines = self.suffix_term.to_lines();
        match (&self.dot, &self.trailer) {
            (Some(dot), Some(trailer)) => join_lines(lines, &dot.content, trailer.to_lines()),
            _ => lines,
        }
    }
}
