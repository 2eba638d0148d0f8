//! Circuit model: declared components, connections and their runtime state.

use std::fmt;

use indexmap::IndexMap;

use super::types::{format_bits, format_optional, Bit, Connection};
use crate::error::{LogicError, Result};

/// One row of a gate's truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Input pattern, one bit per gate input
    pub inputs: Vec<Bit>,
    /// Output bit
    pub output: Bit,
}

impl TableRow {
    /// Create a row mapping `inputs` to `output`.
    pub fn new(inputs: Vec<Bit>, output: Bit) -> Self {
        Self { inputs, output }
    }
}

/// An explicit truth table, rows kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruthTable {
    /// Rows as declared
    pub rows: Vec<TableRow>,
}

impl TruthTable {
    /// Create a truth table from its rows.
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// Output of the first row whose input pattern equals `pattern`.
    pub fn lookup(&self, pattern: &[Bit]) -> Option<Bit> {
        self.rows
            .iter()
            .find(|row| row.inputs == pattern)
            .map(|row| row.output)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A declared circuit input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// Input name
    pub name: String,
    /// Value given by `initial_value`
    pub initial: Bit,
    /// Value injected on the next simulation
    pub value: Bit,
}

impl Input {
    /// Create an input whose current value is its initial value.
    pub fn new(name: impl Into<String>, initial: Bit) -> Self {
        Self {
            name: name.into(),
            initial,
            value: initial,
        }
    }

    /// Restore the current value to the declared initial value.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input {} = {}", self.name, self.value)
    }
}

/// A logic gate evaluated through its truth table.
///
/// `gate_type` is a label only; every gate is evaluated the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// Gate name
    pub name: String,
    /// Free-form type label (`AND`, `XOR`, ...)
    pub gate_type: String,
    /// Declared number of inputs
    pub input_count: usize,
    /// Declared number of outputs (only the first column is used)
    pub output_count: usize,
    /// Truth table
    pub table: TruthTable,
    /// Bits received on each input slot during simulation
    pub inputs: Vec<Option<Bit>>,
    /// Evaluated output bit
    pub output: Option<Bit>,
    /// Whether the gate has produced its output in the current simulation
    pub settled: bool,
}

impl Gate {
    /// Create a gate with all runtime fields unset.
    pub fn new(
        name: impl Into<String>,
        gate_type: impl Into<String>,
        input_count: usize,
        output_count: usize,
        table: TruthTable,
    ) -> Self {
        Self {
            name: name.into(),
            gate_type: gate_type.into(),
            input_count,
            output_count,
            table,
            inputs: vec![None; input_count],
            output: None,
            settled: false,
        }
    }

    /// Whether every input slot has received a value.
    pub fn all_inputs_received(&self) -> bool {
        self.inputs.iter().all(Option::is_some)
    }

    /// The received input pattern, if complete.
    pub fn input_pattern(&self) -> Option<Vec<Bit>> {
        self.inputs.iter().copied().collect()
    }

    /// Clear all runtime fields, including received inputs.
    pub fn reset(&mut self) {
        self.inputs = vec![None; self.input_count];
        self.output = None;
        self.settled = false;
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let received: Vec<String> = self.inputs.iter().map(|v| format_optional(*v)).collect();
        write!(
            f,
            "Gate {} ({}) - inputs: [{}], output: {}",
            self.name,
            self.gate_type,
            received.join(", "),
            format_optional(self.output)
        )
    }
}

/// A declared circuit output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Output name
    pub name: String,
    /// Value delivered during simulation
    pub value: Option<Bit>,
}

impl Output {
    /// Create an output with no value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Clear the delivered value.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output {} = {}", self.name, format_optional(self.value))
    }
}

/// A complete circuit definition plus its simulation state.
///
/// Component tables keep declaration order. Redeclaring a name replaces the
/// earlier entry in place.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Circuit name, set when the declaration header is read
    pub name: Option<String>,
    /// Declared inputs
    pub inputs: IndexMap<String, Input>,
    /// Declared gates
    pub gates: IndexMap<String, Gate>,
    /// Declared outputs
    pub outputs: IndexMap<String, Output>,
    /// Connections in declaration order
    pub connections: Vec<Connection>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an input, replacing any input with the same name.
    pub fn add_input(&mut self, input: Input) {
        self.inputs.insert(input.name.clone(), input);
    }

    /// Register a gate, replacing any gate with the same name.
    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.insert(gate.name.clone(), gate);
    }

    /// Register an output, replacing any output with the same name.
    pub fn add_output(&mut self, output: Output) {
        self.outputs.insert(output.name.clone(), output);
    }

    /// Append a connection.
    pub fn connect(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Override the current value of a declared input.
    pub fn set_input(&mut self, name: &str, value: Bit) -> Result<()> {
        let input = self
            .inputs
            .get_mut(name)
            .ok_or_else(|| LogicError::UnknownInput {
                name: name.to_string(),
            })?;
        input.value = value;
        Ok(())
    }

    /// Value currently held by an output.
    pub fn output_value(&self, name: &str) -> Option<Bit> {
        self.outputs.get(name).and_then(|o| o.value)
    }

    /// Discard every declared component and connection.
    pub fn clear(&mut self) {
        self.name = None;
        self.inputs.clear();
        self.gates.clear();
        self.outputs.clear();
        self.connections.clear();
    }

    /// Clear simulation state while keeping the structure: gate slots,
    /// gate outputs and output values are unset, inputs go back to their
    /// initial values.
    pub fn reset_runtime(&mut self) {
        for gate in self.gates.values_mut() {
            gate.reset();
        }
        for input in self.inputs.values_mut() {
            input.reset();
        }
        for output in self.outputs.values_mut() {
            output.reset();
        }
    }

    /// Clear gate and output state only; input values are left as they are.
    pub fn reset_signals(&mut self) {
        for gate in self.gates.values_mut() {
            gate.reset();
        }
        for output in self.outputs.values_mut() {
            output.reset();
        }
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
            && self.gates.is_empty()
            && self.outputs.is_empty()
            && self.connections.is_empty()
    }
}

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", format_bits(&self.inputs), self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::PinRef;

    fn and_table() -> TruthTable {
        TruthTable::new(vec![
            TableRow::new(vec![0, 0], 0),
            TableRow::new(vec![0, 1], 0),
            TableRow::new(vec![1, 0], 0),
            TableRow::new(vec![1, 1], 1),
        ])
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let mut table = and_table();
        table.rows.push(TableRow::new(vec![1, 1], 0));
        assert_eq!(table.lookup(&[1, 1]), Some(1));
        assert_eq!(table.lookup(&[0, 1]), Some(0));
        assert_eq!(table.lookup(&[1]), None);
    }

    #[test]
    fn test_redeclaration_replaces_in_place() {
        let mut circuit = Circuit::new();
        circuit.add_input(Input::new("A", 0));
        circuit.add_input(Input::new("B", 0));
        circuit.add_input(Input::new("A", 1));

        let names: Vec<&str> = circuit.inputs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(circuit.inputs["A"].value, 1);
    }

    #[test]
    fn test_reset_runtime_keeps_structure() {
        let mut circuit = Circuit::new();
        circuit.name = Some("demo".to_string());
        circuit.add_input(Input::new("A", 1));
        circuit.add_gate(Gate::new("g1", "AND", 2, 1, and_table()));
        circuit.add_output(Output::new("r"));
        circuit.connect(Connection::new(PinRef::new("A", "output"), PinRef::new("g1", "input0")));

        circuit.set_input("A", 0).unwrap();
        {
            let gate = circuit.gates.get_mut("g1").unwrap();
            gate.inputs = vec![Some(1), Some(1)];
            gate.output = Some(1);
            gate.settled = true;
        }
        circuit.outputs.get_mut("r").unwrap().value = Some(1);

        circuit.reset_runtime();

        assert_eq!(circuit.inputs["A"].value, 1);
        assert_eq!(circuit.gates["g1"].inputs, vec![None, None]);
        assert_eq!(circuit.gates["g1"].output, None);
        assert!(!circuit.gates["g1"].settled);
        assert_eq!(circuit.output_value("r"), None);
        assert_eq!(circuit.connections.len(), 1);
        assert_eq!(circuit.name.as_deref(), Some("demo"));
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut circuit = Circuit::new();
        circuit.name = Some("demo".to_string());
        circuit.add_output(Output::new("r"));
        circuit.clear();
        assert!(circuit.is_empty());
        assert!(circuit.name.is_none());
    }

    #[test]
    fn test_set_unknown_input() {
        let mut circuit = Circuit::new();
        let err = circuit.set_input("Z", 1).unwrap_err();
        assert!(matches!(err, LogicError::UnknownInput { name } if name == "Z"));
    }

    #[test]
    fn test_display() {
        let mut gate = Gate::new("g1", "AND", 2, 1, and_table());
        gate.inputs[0] = Some(1);
        assert_eq!(gate.to_string(), "Gate g1 (AND) - inputs: [1, -], output: -");
        assert_eq!(Input::new("A", 1).to_string(), "Input A = 1");
        assert_eq!(Output::new("r").to_string(), "Output r = -");
    }
}
