//! Error types for the gatesim logic circuit compiler.
//!
//! [`LogicError`] covers the fatal conditions: syntax errors while building a
//! circuit, a circuit that fails structural validation, and CLI I/O. Problems
//! that do not stop processing (invalid characters, dropped gate declarations,
//! evaluation warnings) are reported as values instead, see
//! [`Diagnostic`](crate::circuit::Diagnostic) and
//! [`SimWarning`](crate::solver::SimWarning).

use thiserror::Error;

use crate::circuit::Diagnostic;

/// Result type alias using [`LogicError`].
pub type Result<T> = std::result::Result<T, LogicError>;

/// Unified error type for all gatesim operations.
#[derive(Error, Debug)]
pub enum LogicError {
    // ============ DSL Parsing Errors ============
    /// Token sequence does not match the grammar
    #[error("Syntax error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Integer literal too large for where it is used
    #[error("Invalid integer literal '{literal}' at line {line}")]
    InvalidLiteral { line: usize, literal: String },

    // ============ Circuit Errors ============
    /// Structural validation failed; simulation was not run
    #[error("Circuit is not ready to simulate: {}", join_diagnostics(.diagnostics))]
    ValidationFailed { diagnostics: Vec<Diagnostic> },

    /// Input override for a name that was never declared
    #[error("Input '{name}' is not declared in the circuit")]
    UnknownInput { name: String },

    /// Exhaustive enumeration refused
    #[error("Circuit has {count} inputs, truth table enumeration is limited to {max}")]
    TooManyInputs { count: usize, max: usize },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report file
    #[error("Failed to write report file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl LogicError {
    /// Create a syntax error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid literal error
    pub fn invalid_literal(line: usize, literal: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            line,
            literal: literal.into(),
        }
    }

    /// Diagnostics carried by a validation failure, empty for any other error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::ValidationFailed { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::DiagnosticKind;

    #[test]
    fn test_validation_failed_lists_every_diagnostic() {
        let err = LogicError::ValidationFailed {
            diagnostics: vec![
                Diagnostic::new(DiagnosticKind::Structural, None, "first"),
                Diagnostic::new(DiagnosticKind::Structural, None, "second"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Circuit is not ready to simulate: first; second"
        );
        assert_eq!(err.diagnostics().len(), 2);
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = LogicError::parse(7, "unexpected token '}'");
        assert_eq!(err.to_string(), "Syntax error at line 7: unexpected token '}'");
        assert!(err.diagnostics().is_empty());
    }
}
