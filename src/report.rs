//! Plain-text reports over a circuit's final state.

use std::fmt::Write as _;

use crate::circuit::{format_optional, Circuit};
use crate::solver::Enumeration;

/// Width of the rule under the report title.
const RULE_WIDTH: usize = 50;

/// Summary of every declared component with its current value.
pub fn summary(circuit: &Circuit) -> String {
    let mut out = String::new();
    let name = circuit.name.as_deref().unwrap_or("Unnamed");
    let _ = writeln!(out, "CIRCUIT REPORT: {}", name);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    section(&mut out, "INPUTS", circuit.inputs.values());
    section(&mut out, "LOGIC GATES", circuit.gates.values());
    section(&mut out, "OUTPUTS", circuit.outputs.values());
    section(&mut out, "CONNECTIONS", circuit.connections.iter());

    out
}

fn section<T: std::fmt::Display>(out: &mut String, title: &str, items: impl Iterator<Item = T>) {
    let _ = writeln!(out, "\n{}:", title);
    let mut empty = true;
    for item in items {
        let _ = writeln!(out, "  - {}", item);
        empty = false;
    }
    if empty {
        let _ = writeln!(out, "  (none)");
    }
}

/// Render an enumerated truth table with one column per input and output.
pub fn truth_table(table: &Enumeration) -> String {
    let headers: Vec<&str> = table
        .input_names
        .iter()
        .chain(&table.output_names)
        .map(String::as_str)
        .collect();
    let widths: Vec<usize> = headers.iter().map(|h| h.len().max(1)).collect();

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().map(|h| h.to_string()));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    for row in &table.rows {
        let cells = row
            .inputs
            .iter()
            .map(|b| b.to_string())
            .chain(row.outputs.iter().map(|v| format_optional(*v)));
        push_row(&mut out, &widths, cells);
    }
    out
}

fn push_row(out: &mut String, widths: &[usize], cells: impl Iterator<Item = String>) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = width))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | "));
}

/// Write a report to disk.
#[cfg(feature = "cli")]
pub fn write_file(path: &std::path::Path, contents: &str) -> crate::error::Result<()> {
    std::fs::write(path, contents).map_err(|e| crate::error::LogicError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
