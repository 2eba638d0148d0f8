//! Circuit validation.

use super::{Circuit, Diagnostic};

/// Check a circuit for structural problems before simulation.
///
/// Checks (all of them run, nothing short-circuits):
/// - every connection starts at a declared input or gate
/// - every connection ends at a declared gate or output
/// - every gate has at least as many connections into its input slots as it
///   declares inputs
///
/// An empty result means the circuit may be simulated.
pub fn validate_circuit(circuit: &Circuit) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for connection in &circuit.connections {
        let source = &connection.source.component;
        if !circuit.inputs.contains_key(source) && !circuit.gates.contains_key(source) {
            diagnostics.push(Diagnostic::structural(format!(
                "source component '{}' does not exist",
                source
            )));
        }

        let destination = &connection.destination.component;
        if !circuit.gates.contains_key(destination) && !circuit.outputs.contains_key(destination) {
            diagnostics.push(Diagnostic::structural(format!(
                "destination component '{}' does not exist",
                destination
            )));
        }
    }

    for (name, gate) in &circuit.gates {
        // Counts connections, not distinct slots: two wires into input0 pass
        // for a two-input gate.
        let connected = circuit
            .connections
            .iter()
            .filter(|c| &c.destination.component == name && c.destination.is_input_slot())
            .count();

        if connected < gate.input_count {
            diagnostics.push(Diagnostic::structural(format!(
                "gate '{}' has {} inputs but only {} connected (not enough connections)",
                name, gate.input_count, connected
            )));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Connection, Gate, Input, Output, PinRef, TruthTable};

    fn wire(from: &str, to: &str) -> Connection {
        let (fc, fp) = from.split_once('.').unwrap();
        let (tc, tp) = to.split_once('.').unwrap();
        Connection::new(PinRef::new(fc, fp), PinRef::new(tc, tp))
    }

    fn not_gate_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_input(Input::new("A", 0));
        circuit.add_gate(Gate::new("inv", "NOT", 1, 1, TruthTable::default()));
        circuit.add_output(Output::new("q"));
        circuit
    }

    #[test]
    fn test_valid_circuit() {
        let mut circuit = not_gate_circuit();
        circuit.connect(wire("A.output", "inv.input0"));
        circuit.connect(wire("inv.output", "q.input"));
        assert!(validate_circuit(&circuit).is_empty());
    }

    #[test]
    fn test_unconnected_gate_input() {
        let mut circuit = not_gate_circuit();
        circuit.connect(wire("inv.output", "q.input"));

        let diagnostics = validate_circuit(&circuit);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("not enough connections"));
        assert!(diagnostics[0].message.contains("'inv'"));
        assert_eq!(diagnostics[0].line, None);
    }

    #[test]
    fn test_all_checks_run() {
        let mut circuit = not_gate_circuit();
        circuit.connect(wire("ghost.output", "inv.input0"));
        circuit.connect(wire("inv.output", "nowhere.input"));
        circuit.connect(wire("A.output", "phantom.input0"));

        let messages: Vec<String> = validate_circuit(&circuit)
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("'ghost'"));
        assert!(messages[1].contains("'nowhere'"));
        assert!(messages[2].contains("'phantom'"));
    }

    #[test]
    fn test_outputs_cannot_be_sources() {
        let mut circuit = not_gate_circuit();
        circuit.connect(wire("A.output", "inv.input0"));
        circuit.connect(wire("q.output", "inv.input0"));

        let diagnostics = validate_circuit(&circuit);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("source component 'q'"));
    }

    #[test]
    fn test_over_connection_is_not_detected() {
        let mut circuit = Circuit::new();
        circuit.add_input(Input::new("A", 0));
        circuit.add_gate(Gate::new("g", "AND", 2, 1, TruthTable::default()));
        circuit.connect(wire("A.output", "g.input0"));
        circuit.connect(wire("A.output", "g.input0"));
        assert!(validate_circuit(&circuit).is_empty());
    }
}
