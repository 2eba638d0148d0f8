//! Signal propagation engine.
//!
//! This module evaluates a validated [`Circuit`](crate::circuit::Circuit).
//!
//! ## Propagation
//!
//! Evaluation is a bounded fixed-point iteration rather than a topological
//! ordering:
//!
//! 1. Validate; refuse to run if there are structural diagnostics
//! 2. Clear every gate's output and settled flag
//! 3. Inject each input's value along its connections
//! 4. Scan the gates in declaration order, evaluating every gate whose input
//!    slots are all filled; repeat until a scan settles nothing new or
//!    `gates + 1` scans have run
//! 5. Report any gate left unsettled
//!
//! Gates on a cycle or without a driver never fill their slots, so they stay
//! unsettled and their outputs stay unset.

mod enumerate;
mod simulator;

pub use enumerate::{Enumeration, EnumerationRow};
pub use simulator::{SimWarning, SimulationReport, Simulator, SimulatorConfig};

/// Default largest input count for exhaustive enumeration.
pub const DEFAULT_MAX_ENUMERATION_INPUTS: usize = 16;
