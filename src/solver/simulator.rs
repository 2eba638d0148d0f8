//! Main simulator interface.

use std::fmt;

use tracing::{debug, info, trace};

use crate::circuit::{format_bits, validate_circuit, Bit, Circuit, Connection};
use crate::error::{LogicError, Result};

use super::DEFAULT_MAX_ENUMERATION_INPUTS;

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Maximum number of passes over the gates. `None` means one more than
    /// the number of gates.
    pub pass_limit: Option<usize>,
    /// Largest input count accepted by [`Simulator::enumerate`].
    pub max_enumeration_inputs: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            pass_limit: None,
            max_enumeration_inputs: DEFAULT_MAX_ENUMERATION_INPUTS,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed pass limit instead of gate count + 1.
    pub fn with_pass_limit(mut self, pass_limit: usize) -> Self {
        self.pass_limit = Some(pass_limit);
        self
    }

    /// Set the largest input count exhaustive enumeration will accept.
    pub fn with_max_enumeration_inputs(mut self, max_inputs: usize) -> Self {
        self.max_enumeration_inputs = max_inputs;
        self
    }
}

/// A non-fatal problem found while propagating signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimWarning {
    /// No truth table row matched; the gate output defaulted to 0
    UnmatchedPattern { gate: String, pattern: Vec<Bit> },
    /// Gates that had not settled when propagation stopped
    Unsettled { gates: Vec<String> },
    /// Connection into a gate pin that is not one of its input slots
    InvalidPin { connection: String },
}

impl fmt::Display for SimWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedPattern { gate, pattern } => write!(
                f,
                "input combination {} not found in truth table of '{}', using 0",
                format_bits(pattern),
                gate
            ),
            Self::Unsettled { gates } => {
                write!(f, "gates never settled: {}", gates.join(", "))
            }
            Self::InvalidPin { connection } => {
                write!(f, "connection {} targets a pin that does not exist", connection)
            }
        }
    }
}

/// Outcome of one simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    /// Passes run over the gates
    pub passes: usize,
    /// Warnings in the order they occurred
    pub warnings: Vec<SimWarning>,
}

impl SimulationReport {
    /// Whether every gate produced an output.
    pub fn is_settled(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, SimWarning::Unsettled { .. }))
    }

    /// Whether the run produced no warnings at all.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Signal propagation engine.
///
/// Inputs are injected first, then gates are evaluated in declaration order
/// over repeated passes until a pass settles no new gate or the pass limit
/// is reached. Gates that never receive all their inputs (cycles, missing
/// drivers) are reported, not treated as errors.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a new simulator with custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Evaluate the circuit, leaving gate and output values in place.
    ///
    /// Returns [`LogicError::ValidationFailed`] without touching any state if
    /// the circuit has structural problems. Input values are only read.
    pub fn simulate(&self, circuit: &mut Circuit) -> Result<SimulationReport> {
        let diagnostics = validate_circuit(circuit);
        if !diagnostics.is_empty() {
            debug!("validation failed with {} diagnostics", diagnostics.len());
            return Err(LogicError::ValidationFailed { diagnostics });
        }

        let mut report = SimulationReport::default();

        // Received input slots are kept; they are overwritten by delivery.
        for gate in circuit.gates.values_mut() {
            gate.settled = false;
            gate.output = None;
        }

        let injections: Vec<(String, Bit)> = circuit
            .inputs
            .values()
            .map(|input| (input.name.clone(), input.value))
            .collect();
        for (name, value) in injections {
            trace!("injecting {} = {}", name, value);
            deliver(circuit, &name, value, &mut report.warnings);
        }

        let pass_limit = self
            .config
            .pass_limit
            .unwrap_or(circuit.gates.len() + 1);

        while report.passes < pass_limit {
            report.passes += 1;
            if !self.run_pass(circuit, &mut report.warnings) {
                break;
            }
        }

        let unsettled: Vec<String> = circuit
            .gates
            .values()
            .filter(|gate| !gate.settled)
            .map(|gate| gate.name.clone())
            .collect();
        if !unsettled.is_empty() {
            let warning = SimWarning::Unsettled { gates: unsettled };
            debug!("{}", warning);
            report.warnings.push(warning);
        }

        info!(
            "simulation finished after {} passes with {} warnings",
            report.passes,
            report.warnings.len()
        );
        Ok(report)
    }

    /// One scan over the gates. Returns whether any gate newly settled.
    fn run_pass(&self, circuit: &mut Circuit, warnings: &mut Vec<SimWarning>) -> bool {
        let mut progress = false;

        for idx in 0..circuit.gates.len() {
            let (name, value) = {
                let Some((_, gate)) = circuit.gates.get_index_mut(idx) else {
                    continue;
                };
                if gate.settled {
                    continue;
                }
                let Some(pattern) = gate.input_pattern() else {
                    continue;
                };

                let value = match gate.table.lookup(&pattern) {
                    Some(value) => value,
                    None => {
                        let warning = SimWarning::UnmatchedPattern {
                            gate: gate.name.clone(),
                            pattern,
                        };
                        debug!("{}", warning);
                        warnings.push(warning);
                        0
                    }
                };

                gate.output = Some(value);
                gate.settled = true;
                debug!("{}", gate);
                (gate.name.clone(), value)
            };

            progress = true;
            deliver(circuit, &name, value, warnings);
        }

        progress
    }
}

/// Deliver `value` along every connection whose source is `component.output`.
fn deliver(circuit: &mut Circuit, component: &str, value: Bit, warnings: &mut Vec<SimWarning>) {
    let Circuit {
        connections,
        gates,
        outputs,
        ..
    } = circuit;

    for connection in connections.iter().filter(|c| c.source.is_output_of(component)) {
        let destination = &connection.destination;

        if let Some(gate) = gates.get_mut(&destination.component) {
            match destination.slot_index() {
                Some(slot) if slot < gate.inputs.len() => gate.inputs[slot] = Some(value),
                _ => invalid_pin(connection, warnings),
            }
        } else if let Some(output) = outputs.get_mut(&destination.component) {
            output.value = Some(value);
        }
    }
}

fn invalid_pin(connection: &Connection, warnings: &mut Vec<SimWarning>) {
    let warning = SimWarning::InvalidPin {
        connection: connection.to_string(),
    };
    debug!("{}", warning);
    warnings.push(warning);
}
