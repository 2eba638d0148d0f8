//! WASM bindings for Gatesim Core.
//!
//! This module provides JavaScript-friendly bindings for compiling and
//! evaluating circuits in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLogicSim } from 'gatesim_core';
//!
//! await init();
//!
//! const sim = new WasmLogicSim(circuitDsl);
//! sim.set_input("A", 1);
//! const warnings = sim.evaluate();
//! console.log(sim.output("result"));
//! console.log(sim.truth_table());
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::Circuit;
use crate::dsl;
use crate::error::LogicError;
use crate::report;
use crate::solver::Simulator;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: LogicError) -> JsValue {
    let wrapped = LogicError::WasmError {
        message: e.to_string(),
    };
    JsValue::from_str(&wrapped.to_string())
}

/// WASM-compatible logic circuit simulator.
///
/// Wraps a parsed [`Circuit`] and a [`Simulator`] behind a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmLogicSim {
    circuit: Circuit,
    simulator: Simulator,
    diagnostics: Vec<String>,
}

#[wasm_bindgen]
impl WasmLogicSim {
    /// Compile a circuit from its DSL source.
    ///
    /// Fails on syntax errors. Lexical problems and dropped gates are not
    /// fatal; `diagnostics()` lists them.
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str) -> Result<WasmLogicSim, JsValue> {
        let (circuit, outcome) = dsl::parse(source).map_err(to_js)?;
        Ok(WasmLogicSim {
            circuit,
            simulator: Simulator::new(),
            diagnostics: outcome.diagnostics.iter().map(|d| d.to_string()).collect(),
        })
    }

    /// Non-fatal diagnostics from compiling the source.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.clone()
    }

    /// Override the current value of an input.
    #[wasm_bindgen]
    pub fn set_input(&mut self, name: &str, value: u8) -> Result<(), JsValue> {
        self.circuit.set_input(name, value).map_err(to_js)
    }

    /// Run the simulation, returning its warnings.
    #[wasm_bindgen]
    pub fn evaluate(&mut self) -> Result<Vec<String>, JsValue> {
        let report = self.simulator.simulate(&mut self.circuit).map_err(to_js)?;
        Ok(report.warnings.iter().map(|w| w.to_string()).collect())
    }

    /// Clear runtime state and restore inputs to their initial values.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.circuit.reset_runtime();
    }

    /// Current value of an output, or `undefined` if unset or unknown.
    #[wasm_bindgen]
    pub fn output(&self, name: &str) -> Option<u8> {
        self.circuit.output_value(name)
    }

    /// Plain-text summary of the circuit.
    #[wasm_bindgen]
    pub fn summary(&self) -> String {
        report::summary(&self.circuit)
    }

    /// Plain-text truth table over every input combination.
    #[wasm_bindgen]
    pub fn truth_table(&self) -> Result<String, JsValue> {
        let table = self.simulator.enumerate(&self.circuit).map_err(to_js)?;
        Ok(report::truth_table(&table))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
