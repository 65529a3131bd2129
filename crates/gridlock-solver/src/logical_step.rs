use std::fmt;

use gridlock_core::{CandidateIndex, Cell, CellGroup};

/// The driver-owned deduction log.
pub type StepLog = Vec<LogicalStep>;

/// A record of one deduction: a human-readable message, the cells that
/// justified it, and the candidate eliminations it produced.
///
/// Entries are appended to a driver-owned [`StepLog`] and never mutated.
/// Logging is always optional: constraints take `Option<&mut StepLog>` and
/// behave identically when no log is supplied, including in their returned
/// [`LogicResult`](crate::LogicResult).
#[derive(Debug, Clone)]
pub struct LogicalStep {
    description: String,
    cells: CellGroup,
    eliminations: Vec<CandidateIndex>,
}

impl LogicalStep {
    /// Creates an entry from a message and the cells that justify it.
    #[must_use]
    pub fn new(description: String, cells: CellGroup) -> Self {
        Self {
            description,
            cells,
            eliminations: Vec::new(),
        }
    }

    /// Creates an entry from a message and the eliminations it produced.
    #[must_use]
    pub fn with_eliminations(description: String, eliminations: Vec<CandidateIndex>) -> Self {
        Self {
            description,
            cells: CellGroup::new(),
            eliminations,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the cells that justified the deduction.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the eliminated candidates.
    #[must_use]
    pub fn eliminations(&self) -> &[CandidateIndex] {
        &self.eliminations
    }
}

impl fmt::Display for LogicalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
