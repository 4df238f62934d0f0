//! ahkls_ast: the AutoHotkey syntax tree.
//!
//! Token categories, the `SyntaxNode` capability (ranges + line-oriented
//! reconstruction), and every node family the parser produces. Nodes are
//! built bottom-up, owned exclusively by their parent, and immutable after
//! construction.

pub mod expr;
pub mod node;
pub mod script;
pub mod stmt;
pub mod suffix;
pub mod token;
pub mod token_kind;

pub use node::SyntaxNode;
pub use script::Script;
pub use token::Token;
pub use token_kind::{keyword_kind, TokenKind};
