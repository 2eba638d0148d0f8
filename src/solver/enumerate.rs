//! Exhaustive truth-table enumeration over all input combinations.

use tracing::debug;

use crate::circuit::{validate_circuit, Bit, Circuit};
use crate::error::{LogicError, Result};

use super::simulator::{SimWarning, Simulator};

/// One input combination and the outputs it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationRow {
    /// Input values in declaration order, most significant first
    pub inputs: Vec<Bit>,
    /// Output values in declaration order, `None` if never driven
    pub outputs: Vec<Option<Bit>>,
    /// Warnings raised while simulating this combination
    pub warnings: Vec<SimWarning>,
}

/// The full truth table of a circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Input names, in column order
    pub input_names: Vec<String>,
    /// Output names, in column order
    pub output_names: Vec<String>,
    /// One row per combination, row `i` holding the binary expansion of `i`
    pub rows: Vec<EnumerationRow>,
}

impl Simulator {
    /// Simulate every combination of input values.
    ///
    /// Runs on a private copy, so `circuit` (including its input values and
    /// runtime state) is left exactly as it was.
    pub fn enumerate(&self, circuit: &Circuit) -> Result<Enumeration> {
        let count = circuit.inputs.len();
        let max = self.config().max_enumeration_inputs;
        if count > max || count >= usize::BITS as usize {
            return Err(LogicError::TooManyInputs { count, max });
        }

        let diagnostics = validate_circuit(circuit);
        if !diagnostics.is_empty() {
            return Err(LogicError::ValidationFailed { diagnostics });
        }

        let mut work = circuit.clone();
        let input_names: Vec<String> = work.inputs.keys().cloned().collect();
        let output_names: Vec<String> = work.outputs.keys().cloned().collect();
        let mut rows = Vec::with_capacity(1 << count);

        for combination in 0..(1usize << count) {
            let inputs = combination_bits(combination, count);
            for (input, &value) in work.inputs.values_mut().zip(&inputs) {
                input.value = value;
            }
            work.reset_signals();

            let report = self.simulate(&mut work)?;
            let outputs: Vec<Option<Bit>> = work.outputs.values().map(|o| o.value).collect();
            debug!("combination {:?} -> {:?}", inputs, outputs);

            rows.push(EnumerationRow {
                inputs,
                outputs,
                warnings: report.warnings,
            });
        }

        Ok(Enumeration {
            input_names,
            output_names,
            rows,
        })
    }
}

/// Binary expansion of `combination` over `width` bits, most significant first.
fn combination_bits(combination: usize, width: usize) -> Vec<Bit> {
    (0..width)
        .map(|j| ((combination >> (width - 1 - j)) & 1) as Bit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;
    use crate::solver::SimulatorConfig;

    const OR_CIRCUIT: &str = "circuit Or {\n\
        input A { initial_value 1 }\n\
        input B { initial_value 0 }\n\
        logic_gate OR g { input_count 2 output_count 1 truth_table {\n\
        0 0 -> 0\n\
        0 1 -> 1\n\
        1 0 -> 1\n\
        1 1 -> 1\n\
        } }\n\
        output q { }\n\
        connection connect A.output -> g.input0\n\
        connection connect B.output -> g.input1\n\
        connection connect g.output -> q.input\n\
        }";

    #[test]
    fn test_combination_bits_msb_first() {
        assert_eq!(combination_bits(0, 2), vec![0, 0]);
        assert_eq!(combination_bits(1, 2), vec![0, 1]);
        assert_eq!(combination_bits(2, 2), vec![1, 0]);
        assert_eq!(combination_bits(6, 3), vec![1, 1, 0]);
        assert!(combination_bits(0, 0).is_empty());
    }

    #[test]
    fn test_two_input_enumeration() {
        let (circuit, _) = parse(OR_CIRCUIT).unwrap();
        let simulator = Simulator::new();
        let table = simulator.enumerate(&circuit).unwrap();

        assert_eq!(table.input_names, vec!["A", "B"]);
        assert_eq!(table.output_names, vec!["q"]);
        assert_eq!(table.rows.len(), 4);

        for (i, row) in table.rows.iter().enumerate() {
            assert_eq!(row.inputs, combination_bits(i, 2));

            let mut single = circuit.clone();
            single.set_input("A", row.inputs[0]).unwrap();
            single.set_input("B", row.inputs[1]).unwrap();
            simulator.simulate(&mut single).unwrap();
            assert_eq!(row.outputs, vec![single.output_value("q")]);
            assert!(row.warnings.is_empty());
        }
        assert_eq!(table.rows[0].outputs, vec![Some(0)]);
        assert_eq!(table.rows[3].outputs, vec![Some(1)]);
    }

    #[test]
    fn test_enumeration_leaves_circuit_untouched() {
        let (mut circuit, _) = parse(OR_CIRCUIT).unwrap();
        let simulator = Simulator::new();
        simulator.simulate(&mut circuit).unwrap();
        let before = format!("{:?}", circuit);

        simulator.enumerate(&circuit).unwrap();

        assert_eq!(format!("{:?}", circuit), before);
        assert_eq!(circuit.inputs["A"].value, 1);
        assert_eq!(circuit.output_value("q"), Some(1));
    }

    #[test]
    fn test_too_many_inputs() {
        let (circuit, _) = parse(OR_CIRCUIT).unwrap();
        let simulator =
            Simulator::with_config(SimulatorConfig::new().with_max_enumeration_inputs(1));
        let err = simulator.enumerate(&circuit).unwrap_err();
        assert!(matches!(err, LogicError::TooManyInputs { count: 2, max: 1 }));
    }

    #[test]
    fn test_invalid_circuit_is_not_enumerated() {
        let (circuit, _) =
            parse("circuit X { input A { initial_value 0 } connection connect A.output -> nope.input }")
                .unwrap();
        let err = Simulator::new().enumerate(&circuit).unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
    }

    #[test]
    fn test_no_inputs_gives_single_row() {
        let src = "circuit K {\n\
                   logic_gate CONST one { input_count 0 output_count 1 truth_table {\n0 -> 1\n} }\n\
                   output q { }\n\
                   connection connect one.output -> q.input\n\
                   }";
        let (circuit, _) = parse(src).unwrap();
        let table = Simulator::new().enumerate(&circuit).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].inputs.is_empty());
        // A zero-input gate sees the empty pattern, which no row can match.
        assert_eq!(table.rows[0].outputs, vec![Some(0)]);
        assert_eq!(table.rows[0].warnings.len(), 1);
    }
}
