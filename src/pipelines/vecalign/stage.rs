//! Orchestration stages.
use std::fmt;

use crate::side::Side;

/// A single external tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Overlap file generation for a side.
    Overlap(Side),
    /// Embedding of a side's overlap file (precomputed strategy only).
    Embed(Side),
    /// Final sentence alignment.
    Align,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Overlap(side) => write!(f, "OVERLAP({})", side),
            Stage::Embed(side) => write!(f, "EMBED({})", side),
            Stage::Align => f.write_str("ALIGN"),
        }
    }
}

/// Where the orchestrator stands. Transitions are linear, a failure is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Pending,
    Running(Stage),
    Done,
    Failed(Stage),
}
