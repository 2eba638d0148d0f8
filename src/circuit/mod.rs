//! Circuit model and validation.
//!
//! The [`Circuit`] struct is the context object the parser fills in and the
//! simulator evaluates. It owns the declared inputs, gates, outputs and
//! connections along with their simulation-time values.

mod graph;
mod types;
mod validate;

pub use graph::{Circuit, Gate, Input, Output, TableRow, TruthTable};
pub use types::*;
pub use validate::validate_circuit;
