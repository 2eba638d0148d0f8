//! Core types for circuit representation.

use std::fmt;

/// A signal value. Only 0 and 1 are meaningful; values are taken verbatim
/// from the source and never range-checked.
pub type Bit = u8;

/// Pin label every component uses for its source side.
pub const OUTPUT_PIN: &str = "output";

/// Prefix of the indexed input slots of a gate (`input0`, `input1`, ...).
pub const INPUT_PIN_PREFIX: &str = "input";

/// A pin address: component name plus pin label, written `name.pin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinRef {
    /// Name of the component the pin belongs to
    pub component: String,
    /// Pin label (`output`, `input`, `input0`, ...)
    pub pin: String,
}

impl PinRef {
    /// Create a pin address.
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }

    /// Whether this addresses the source pin of `component`.
    pub fn is_output_of(&self, component: &str) -> bool {
        self.component == component && self.pin == OUTPUT_PIN
    }

    /// Whether the pin label looks like a gate input slot.
    pub fn is_input_slot(&self) -> bool {
        self.pin.starts_with(INPUT_PIN_PREFIX)
    }

    /// Index of the gate input slot this pin addresses, if the label is
    /// `input<k>` with a decimal `k`.
    pub fn slot_index(&self) -> Option<usize> {
        let digits = self.pin.strip_prefix(INPUT_PIN_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

/// A directed pin-to-pin connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Where the signal comes from
    pub source: PinRef,
    /// Where the signal is delivered
    pub destination: PinRef,
}

impl Connection {
    /// Create a connection.
    pub fn new(source: PinRef, destination: PinRef) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Category of a non-fatal diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Unrecognized character, skipped by the lexer
    Lexical,
    /// Declaration dropped by the parser (e.g. gate missing properties)
    Declaration,
    /// Structural problem found by the validator
    Structural,
}

/// A human-readable problem report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What stage produced it
    pub kind: DiagnosticKind,
    /// Source line (1-indexed), when the problem has one
    pub line: Option<usize>,
    /// Description
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(kind: DiagnosticKind, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Create a structural diagnostic (no line number).
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Structural, None, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Render a bit pattern as `[1, 0, 1]`.
pub fn format_bits(bits: &[Bit]) -> String {
    let parts: Vec<String> = bits.iter().map(|b| b.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Render an optional value, `-` when unset.
pub fn format_optional(value: Option<Bit>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index() {
        assert_eq!(PinRef::new("g1", "input0").slot_index(), Some(0));
        assert_eq!(PinRef::new("g1", "input12").slot_index(), Some(12));
        assert_eq!(PinRef::new("g1", "input").slot_index(), None);
        assert_eq!(PinRef::new("g1", "inputx").slot_index(), None);
        assert_eq!(PinRef::new("g1", "output").slot_index(), None);
        assert!(PinRef::new("g1", "input").is_input_slot());
    }

    #[test]
    fn test_display() {
        let conn = Connection::new(PinRef::new("A", "output"), PinRef::new("g1", "input1"));
        assert_eq!(conn.to_string(), "A.output -> g1.input1");

        let diag = Diagnostic::new(DiagnosticKind::Lexical, Some(3), "invalid character '$'");
        assert_eq!(diag.to_string(), "line 3: invalid character '$'");
        assert_eq!(Diagnostic::structural("oops").to_string(), "oops");
    }
}
