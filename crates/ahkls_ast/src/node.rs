//! The node capability shared by every piece of syntax.
//!
//! Positions are always derived from a node's first and last constituent, so
//! they cannot drift from the tokens that produced them. `to_lines` is the
//! deterministic line-oriented reconstruction used by hover and signature
//! display: concatenating a node's children's lines with its own connecting
//! tokens reproduces a text equivalent (modulo whitespace) of the original
//! span.

use ahkls_core::{Position, Range};

/// Capability trait implemented by tokens and every AST node family.
pub trait SyntaxNode {
    /// Start position, derived from the first constituent.
    fn start(&self) -> Position;

    /// End position, derived from the last constituent. Never precedes
    /// `start`.
    fn end(&self) -> Position;

    /// Ordered ranges of the node's immediate syntactic constituents, for
    /// range-based queries.
    fn ranges(&self) -> Vec<Range>;

    /// Lossless line-oriented reconstruction of the node's span. Always
    /// non-empty; an `Invalid` node yields a single empty line.
    fn to_lines(&self) -> Vec<String>;

    /// The full range covered by this node.
    fn range(&self) -> Range {
        Range::new(self.start(), self.end())
    }
}

/// Join two line blocks by fusing the seam: the last line of `left`, the
/// separator, and the first line of `right` become one line.
pub(crate) fn join_lines(mut left: Vec<String>, sep: &str, right: Vec<String>) -> Vec<String> {
    let mut right = right.into_iter();
    let first = right.next().unwrap_or_default();
    match left.last_mut() {
        Some(last) => {
            last.push_str(sep);
            last.push_str(&first);
        }
        None => left.push(format!("{sep}{first}")),
    }
    left.extend(right);
    left
}

/// Join each item's lines with the separator fused at every seam. Items that
/// produce a single empty line (empty-argument placeholders, `Invalid`
/// values) still occupy a slot between separators.
pub(crate) fn join_list(items: Vec<Vec<String>>, sep: &str) -> Vec<String> {
    let mut iter = items.into_iter();
    let mut acc = match iter.next() {
        Some(first) => first,
        None => return vec![String::new()],
    };
    for item in iter {
        acc = join_lines(acc, sep, item);
    }
    acc
}

/// Prefix the first line and suffix the last line, e.g. to wrap a block in
/// its delimiters.
pub(crate) fn enclose_lines(mut lines: Vec<String>, open: &str, close: &str) -> Vec<String> {
    if lines.is_empty() {
        lines.push(String::new());
    }
    if let Some(first) = lines.first_mut() {
        first.insert_str(0, open);
    }
    if let Some(last) = lines.last_mut() {
        last.push_str(close);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines_fuses_seam() {
        let left = vec!["a".to_string(), "b".to_string()];
        let right = vec!["c".to_string(), "d".to_string()];
        assert_eq!(join_lines(left, " + ", right), vec!["a", "b + c", "d"]);
    }

    #[test]
    fn test_join_list_keeps_empty_slots() {
        let items = vec![
            vec!["a".to_string()],
            vec![String::new()],
            vec!["b".to_string()],
        ];
        assert_eq!(join_list(items, ","), vec!["a,,b"]);
    }

    #[test]
    fn test_enclose_lines() {
        let lines = vec!["1, 2".to_string()];
        assert_eq!(enclose_lines(lines, "[", "]"), vec!["[1, 2]"]);
    }
}
