//! Expression nodes.

use crate::node::{join_lines, SyntaxNode};
use crate::suffix::{SuffixTerm, SuffixTrailer};
use crate::token::Token;
use ahkls_core::{Position, Range};

#[derive(Debug, Clone)]
pub enum Expr {
    Factor(Factor),
    Unary(Unary),
    Binary(Binary),
    Ternary(Ternary),
    Invalid(InvalidExpr),
}

impl Expr {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Expr::Invalid(_))
    }
}

impl SyntaxNode for Expr {
    fn start(&self) -> Position {
        match self {
            Expr::Factor(n) => n.start(),
            Expr::Unary(n) => n.start(),
            Expr::Binary(n) => n.start(),
            Expr::Ternary(n) => n.start(),
            Expr::Invalid(n) => n.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Expr::Factor(n) => n.end(),
            Expr::Unary(n) => n.end(),
            Expr::Binary(n) => n.end(),
            Expr::Ternary(n) => n.end(),
            Expr::Invalid(n) => n.end(),
        }
    }

    fn ranges(&self) -> Vec<Range> {
        match self {
            Expr::Factor(n) => n.ranges(),
            Expr::Unary(n) => n.ranges(),
            Expr::Binary(n) => n.ranges(),
            Expr::Ternary(n) => n.ranges(),
            Expr::Invalid(n) => n.ranges(),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        match self {
            Expr::Factor(n) => n.to_lines(),
            Expr::Unary(n) => n.to_lines(),
            Expr::Binary(n) => n.to_lines(),
            Expr::Ternary(n) => n.to_lines(),
            Expr::Invalid(n) => n.to_lines(),
        }
    }
}

/// A suffix term with an optional dotted access chain hanging off it.
#[derive(Debug, Clone)]
pub struct Factor {
    pub suffix_term: SuffixTerm,
    pub dot: Option<Token>,
    pub trailer: Option<Box<SuffixTrailer>>,
}

impl Factor {
    pub fn new(suffix_term: SuffixTerm) -> Self {
        Self {
            suffix_term,
            dot: None,
            trailer: None,
        }
    }
}

impl SyntaxNode for Factor {
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

/// A unary operation. Prefix and postfix share the node; which one this is
/// falls out of the operator's position relative to the operand.
#[derive(Debug, Clone)]
pub struct Unary {
    pub operator: Token,
    pub operand: Box<Expr>,
}

impl Unary {
    pub fn is_postfix(&self) -> bool {
        self.operator.start >= self.operand.end()
    }
}

impl SyntaxNode for Unary {
    fn start(&self) -> Position {
        self.operator.start.min(self.operand.start())
    }

    fn end(&self) -> Position {
        self.operator.end.max(self.operand.end())
    }

    fn ranges(&self) -> Vec<Range> {
        if self.is_postfix() {
            vec![self.operand.range(), self.operator.range()]
        } else {
            vec![self.operator.range(), self.operand.range()]
        }
    }

    fn to_lines(&self) -> Vec<String> {
        if self.is_postfix() {
            join_lines(self.operand.to_lines(), "", vec![self.operator.content.clone()])
        } else {
            // keyword operators (`new`, `not`) need the separating space
            join_lines(
                vec![self.operator.content.clone()],
                " ",
                self.operand.to_lines(),
            )
        }
    }
}

/// A binary operation, including synthesized implicit-concatenation nodes.
#[derive(Debug, Clone)]
pub struct Binary {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

impl SyntaxNode for Binary {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.right.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![self.left.range(), self.operator.range(), self.right.range()]
    }

    fn to_lines(&self) -> Vec<String> {
        join_lines(
            self.left.to_lines(),
            &format!(" {} ", self.operator.content),
            self.right.to_lines(),
        )
    }
}

/// `condition ? true_expr : false_expr`, right-associative on the false
/// branch.
#[derive(Debug, Clone)]
pub struct Ternary {
    pub condition: Box<Expr>,
    pub question: Token,
    pub true_expr: Box<Expr>,
    pub colon: Token,
    pub false_expr: Box<Expr>,
}

impl SyntaxNode for Ternary {
    fn start(&self) -> Position {
        self.condition.start()
    }

    fn end(&self) -> Position {
        self.false_expr.end()
    }

    fn ranges(&self) -> Vec<Range> {
        vec![
            self.condition.range(),
            self.question.range(),
            self.true_expr.range(),
            self.colon.range(),
            self.false_expr.range(),
        ]
    }

    fn to_lines(&self) -> Vec<String> {
        let lines = join_lines(self.condition.to_lines(), " ? ", self.true_expr.to_lines());
        join_lines(lines, " : ", self.false_expr.to_lines())
    }
}

/// An expression that failed to parse: the exact tokens consumed during the
/// failed attempt, plus the token recovery stopped on.
#[derive(Debug, Clone)]
pub struct InvalidExpr {
    pub position: Position,
    pub tokens: Vec<Token>,
}

impl SyntaxNode for InvalidExpr {
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
