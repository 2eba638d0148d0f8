//! # Gatesim Core
//!
//! A compiler and simulator for combinational logic circuits whose gates are
//! defined by explicit truth tables.
//!
//! This library provides:
//! - A small declarative DSL for inputs, gates, outputs and connections
//! - Structural validation of the resulting component graph
//! - Fixed-point signal propagation from inputs to outputs
//! - Exhaustive truth-table enumeration and plain-text reports
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Lexer and parser for the circuit description language
//! - [`circuit`] - Circuit model and structural validation
//! - [`solver`] - Signal propagation and truth-table enumeration
//! - [`report`] - Text rendering of circuit state
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! gatesim circuit.lgc --truth-table --summary summary.txt
//! ```
//!
//! ### Library
//!
//! ```
//! use gatesim_core::{dsl, Simulator};
//!
//! let source = r#"
//! circuit Buffer {
//!     input A { initial_value 1 }
//!     logic_gate BUF b {
//!         input_count 1
//!         output_count 1
//!         truth_table {
//!             0 -> 0
//!             1 -> 1
//!         }
//!     }
//!     output q { }
//!     connection connect A.output -> b.input0
//!     connection connect b.output -> q.input
//! }
//! "#;
//!
//! let (mut circuit, _) = dsl::parse(source)?;
//! let report = Simulator::new().simulate(&mut circuit)?;
//! assert!(report.is_clean());
//! assert_eq!(circuit.output_value("q"), Some(1));
//! # Ok::<(), gatesim_core::LogicError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmLogicSim } from 'gatesim_core';
//!
//! const sim = new WasmLogicSim(circuitDsl);
//! sim.evaluate();
//! ```

pub mod circuit;
pub mod dsl;
pub mod error;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{LogicError, Result};
pub use solver::{SimulationReport, Simulator, SimulatorConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLogicSim;
