//! Gatesim - Logic Circuit Compiler
//!
//! Compiles a circuit description, simulates it and reports the results.
//!
//! # Usage
//!
//! ```bash
//! gatesim circuit.lgc --tokens --truth-table --summary summary.txt -v
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gatesim_core::{
    circuit::{Circuit, DiagnosticKind},
    dsl,
    error::{LogicError, Result},
    report, SimulationReport, Simulator, SimulatorConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Truth-table logic circuit compiler and simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit description file
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Print the truth table over every input combination
    #[arg(long)]
    truth_table: bool,

    /// Largest input count for --truth-table
    #[arg(long, default_value_t = 8)]
    max_inputs: usize,

    /// Write a text summary of the simulated circuit to this file
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(args.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            for diagnostic in e.diagnostics() {
                eprintln!("  - {}", diagnostic);
            }
            ExitCode::FAILURE
        }
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Final output values followed by any simulation warnings.
fn outputs_text(circuit: &Circuit, sim_report: &SimulationReport) -> String {
    let mut out = format!("Circuit {}:\n", circuit.name.as_deref().unwrap_or("Unnamed"));
    for output in circuit.outputs.values() {
        out.push_str(&format!("  {}\n", output));
    }
    if !sim_report.is_clean() {
        out.push_str("Warnings (results may be incomplete):\n");
        for warning in &sim_report.warnings {
            out.push_str(&format!("  - {}\n", warning));
        }
    }
    out
}

fn run(args: &Args) -> Result<()> {
    let source = dsl::read_file(&args.circuit_file)?;

    // Scan once on its own so lexical problems are shown even if parsing fails
    let (tokens, lexical) = dsl::tokenize(&source);
    if args.tokens {
        println!("Tokens:");
        for token in &tokens {
            println!("  {:?}: {}", token.kind, token.text);
        }
    }
    for diagnostic in &lexical {
        eprintln!("warning: {}", diagnostic);
    }

    let mut circuit = Circuit::new();
    let outcome = dsl::parse_into(&source, &mut circuit)?;
    info!("parsed with {} diagnostics", outcome.diagnostics.len());
    for diagnostic in &outcome.diagnostics {
        if diagnostic.kind != DiagnosticKind::Lexical {
            eprintln!("warning: {}", diagnostic);
        }
    }

    let config = SimulatorConfig::new().with_max_enumeration_inputs(args.max_inputs);
    let simulator = Simulator::with_config(config);
    let sim_report = simulator.simulate(&mut circuit)?;
    info!("circuit simulated in {} passes", sim_report.passes);

    print!("{}", outputs_text(&circuit, &sim_report));

    if let Some(path) = &args.summary {
        report::write_file(path, &report::summary(&circuit))?;
        println!("Summary written to {}", path.display());
    }

    if args.truth_table {
        match simulator.enumerate(&circuit) {
            Ok(table) => {
                println!();
                print!("{}", report::truth_table(&table));
            }
            Err(e @ LogicError::TooManyInputs { .. }) => eprintln!("warning: {}", e),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
