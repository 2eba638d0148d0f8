//! DSL (Domain Specific Language) front-end for circuit descriptions.
//!
//! A circuit is a single brace-delimited block of declarations in any order.
//! Every gate carries an explicit truth table; gate type names are labels only.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit      = "circuit" IDENT "{" { decl } "}"
//! decl         = gate_decl | input_decl | output_decl | conn_decl
//! gate_decl    = "logic_gate" IDENT IDENT "{" gate_prop { gate_prop } "}"
//! gate_prop    = "input_count" INT | "output_count" INT | truth_table
//! truth_table  = "truth_table" "{" trow { trow } "}"
//! trow         = bits "->" INT
//! bits         = INT { INT }
//! input_decl   = "input" IDENT "{" "initial_value" INT "}"
//! output_decl  = "output" IDENT "{" "}"
//! conn_decl    = "connection" "connect" pin "->" pin
//! pin          = IDENT "." ( IDENT | "input" | "output" )
//!
//! comment      = "//" { any_char }
//! ```
//!
//! # Pins
//!
//! | Pin | Meaning |
//! |-----|---------|
//! | `<input>.output` | Signal source of an input |
//! | `<gate>.output` | Signal source of a gate |
//! | `<gate>.input<k>` | Input slot `k` of a gate, `0 <= k < input_count` |
//! | `<output>.input` | Sink of a circuit output |
//!
//! # Example
//!
//! ```text
//! // Two-input AND
//! circuit MyCircuit {
//!     input A { initial_value 1 }
//!     input B { initial_value 0 }
//!
//!     logic_gate AND gate1 {
//!         input_count 2
//!         output_count 1
//!         truth_table {
//!             0 0 -> 0
//!             0 1 -> 0
//!             1 0 -> 0
//!             1 1 -> 1
//!         }
//!     }
//!
//!     output result { }
//!
//!     connection connect A.output -> gate1.input0
//!     connection connect B.output -> gate1.input1
//!     connection connect gate1.output -> result.input
//! }
//! ```

mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::circuit::{Circuit, Diagnostic};
use crate::error::Result;

/// Non-fatal findings of a successful parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Lexical diagnostics, then dropped declarations
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan the whole input, returning every token and the lexical diagnostics.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(input);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.into_diagnostics())
}

/// Parse a circuit description into an existing circuit.
///
/// On a syntax error the declarations registered before it remain in
/// `circuit`.
pub fn parse_into(input: &str, circuit: &mut Circuit) -> Result<ParseOutcome> {
    let mut parser = Parser::new(Lexer::new(input));
    parser.parse_into(circuit)?;
    Ok(ParseOutcome {
        diagnostics: parser.into_diagnostics(),
    })
}

/// Parse a circuit description into a fresh circuit.
pub fn parse(input: &str) -> Result<(Circuit, ParseOutcome)> {
    let mut circuit = Circuit::new();
    let outcome = parse_into(input, &mut circuit)?;
    Ok((circuit, outcome))
}

/// Read a circuit file.
#[cfg(feature = "cli")]
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| crate::error::LogicError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_is_restartable() {
        let input = "circuit X { } ?";
        let (first, first_diags) = tokenize(input);
        let (second, second_diags) = tokenize(input);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(first_diags, second_diags);
        assert_eq!(first_diags.len(), 1);
    }
}
