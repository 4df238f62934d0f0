//! ahkls_diagnostics: diagnostic reporting infrastructure.
//!
//! Diagnostics carry a document range, a message, and a severity. The scanner
//! reports lexical problems through this type; the parser wraps its recovered
//! syntax errors into it for downstream consumers (CLI printing, LSP
//! publishing).

use ahkls_core::Range;
use std::fmt;

/// Diagnostic severity, a subset of the editor protocol's levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Information => write!(f, "info"),
        }
    }
}

/// A realized diagnostic with location information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The document range this diagnostic applies to.
    pub range: Range,
    /// Human-readable message text.
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.range.start, self.severity, self.message)
    }
}

/// An ordered collection of diagnostics accumulated during a pass.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahkls_core::Position;

    fn at(line: u32, from: u32, to: u32) -> Range {
        Range::new(Position::new(line, from), Position::new(line, to))
    }

    #[test]
    fn test_collection_counts() {
        let mut coll = DiagnosticCollection::new();
        coll.add(Diagnostic::error(at(0, 0, 3), "bad token"));
        coll.add(Diagnostic::warning(at(1, 0, 1), "suspicious"));
        assert!(coll.has_errors());
        assert_eq!(coll.error_count(), 1);
        assert_eq!(coll.len(), 2);
    }
}
