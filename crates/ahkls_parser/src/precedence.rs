//! Operator precedence for the expression parser.
//!
//! Tiers follow the AutoHotkey v1 operator table, lowest binding power
//! first. Left-associative operators recurse with `tier + 1` on their right
//! operand; right-associative ones (assignment family, ternary) recurse with
//! the same tier.

use ahkls_ast::TokenKind;

/// Binding power of the concatenation tier, shared by the explicit ` . `
/// operator and synthesized implicit concatenation.
pub const CONCAT: u8 = 7;

/// Binding power of ordinary prefix unary operators.
pub const UNARY: u8 = 15;

/// Binding power of `++`/`--`, prefix and postfix alike.
pub const UPDATE: u8 = 16;

/// The binding power of an infix or postfix operator, 0 for tokens that are
/// not operators.
pub fn operator_precedence(kind: TokenKind) -> u8 {
    match kind {
        k if k.is_assignment() => 1,
        TokenKind::Question => 2,
        TokenKind::LogicOr => 3,
        TokenKind::LogicAnd => 4,
        TokenKind::Equal | TokenKind::DoubleEqual | TokenKind::NotEqual => 5,
        TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Less
        | TokenKind::LessEqual => 6,
        TokenKind::Sconnect | TokenKind::ImplicitConcat => CONCAT,
        TokenKind::BitOr => 8,
        TokenKind::BitXor => 9,
        TokenKind::BitAnd => 10,
        TokenKind::LeftShift | TokenKind::RightShift => 11,
        TokenKind::Plus | TokenKind::Minus => 12,
        TokenKind::Multiply | TokenKind::Divide | TokenKind::FloorDivide => 13,
        TokenKind::Power => 14,
        TokenKind::PlusPlus | TokenKind::MinusMinus => UPDATE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(operator_precedence(TokenKind::Multiply) > operator_precedence(TokenKind::Plus));
        assert!(operator_precedence(TokenKind::Plus) > CONCAT);
        assert!(CONCAT > operator_precedence(TokenKind::LogicAnd));
        assert!(operator_precedence(TokenKind::Aassign) < operator_precedence(TokenKind::Question));
        assert!(operator_precedence(TokenKind::Power) > operator_precedence(TokenKind::Multiply));
    }

    #[test]
    fn test_update_operators_share_one_tier() {
        assert_eq!(
            operator_precedence(TokenKind::PlusPlus),
            operator_precedence(TokenKind::MinusMinus)
        );
        assert_eq!(operator_precedence(TokenKind::PlusPlus), UPDATE);
    }
}
