//! Puzzle constraints and the capability contract they implement.
//!
//! Every constraint is constructed once per puzzle from parsed cell groups,
//! has its one-time static pruning run via
//! [`init_candidates`](Constraint::init_candidates), and is then stepped
//! repeatedly by the driver until the whole constraint set reaches a
//! fixpoint. Registration and name-to-constructor dispatch live outside
//! this crate.

use std::fmt::Debug;

use gridlock_core::{Board, CandidateIndex, Cell, CellGroup, Digit};

pub use self::{
    arrow_sum::{ArrowSum, possible_circle_arrangements},
    lockout_line::LockoutLine,
};
use crate::{LogicResult, LogicalStep, StepLog};

mod arrow_sum;
mod lockout_line;

/// The capability contract every concrete constraint implements.
///
/// An external driver calls [`init_candidates`](Self::init_candidates) once
/// per constraint, then repeatedly calls [`step_logic`](Self::step_logic)
/// on every constraint until a full pass yields no
/// [`Changed`](LogicResult::Changed), escalating to search on a stall and
/// aborting on [`Invalid`](LogicResult::Invalid).
pub trait Constraint: Debug {
    /// Returns the constraint kind's display name.
    fn name(&self) -> &'static str;

    /// Returns a display name derived from the constraint's distinguishing
    /// cells, e.g. `"Lockout Line r1c1-r1c3"`.
    fn specific_name(&self) -> String;

    /// One-time static pruning derivable from geometry alone, not from
    /// other cells' current values.
    ///
    /// Runs exactly once, before the iterative phase. This is also where
    /// geometry-derived bounds are computed and cached, which is why it is
    /// the only method taking `&mut self`.
    fn init_candidates(&mut self, board: &mut Board) -> LogicResult;

    /// Cheap incremental check that committing `cell` to `digit` stays
    /// consistent with this constraint, without a full re-derivation.
    ///
    /// Constraints without a cheap shortcut keep the default `true` and
    /// rely on [`step_logic`](Self::step_logic) for correctness; that is an
    /// accepted limitation, not an error.
    fn enforce(&self, _board: &Board, _cell: Cell, _digit: Digit) -> bool {
        true
    }

    /// The repeatable deduction step.
    ///
    /// Inspects current candidate masks, applies eliminations or forced
    /// values through the board primitives, and appends one log entry per
    /// distinct deduction when a log is supplied. Must be idempotent, must
    /// not loop to an internal fixpoint, and must be safe to call with
    /// `is_searching = true` (inside speculative trial placements) without
    /// mutating geometry or cached bounds.
    fn step_logic(
        &self,
        board: &mut Board,
        log: Option<&mut StepLog>,
        is_searching: bool,
    ) -> LogicResult;

    /// Returns every other cell that must not share `cell`'s solved digit
    /// through this constraint.
    ///
    /// Feeds the generic "no two mutually visible cells share a digit"
    /// elimination rule. The relation is declared per role and need not be
    /// symmetric; a cell outside the constraint yields nothing.
    fn seen_cells(&self, cell: Cell) -> CellGroup;
}

/// A boxed constraint.
pub type BoxedConstraint = Box<dyn Constraint>;

/// Applies an elimination list, logging `"{message} => {elims}"`.
///
/// Shared tail of every elimination-producing sub-rule: an empty list is
/// `None`, a clear that empties a cell is `Invalid` (logged without
/// presenting the eliminations as applied), anything else is `Changed`.
pub(crate) fn remove_candidates(
    board: &mut Board,
    elims: Vec<CandidateIndex>,
    message: &str,
    log: Option<&mut StepLog>,
) -> LogicResult {
    if elims.is_empty() {
        return LogicResult::None;
    }
    let described = board.describe_elims(&elims);
    if board.clear_candidates(&elims) {
        if let Some(log) = log {
            log.push(LogicalStep::with_eliminations(
                format!("{message} => {described}"),
                elims,
            ));
        }
        LogicResult::Changed
    } else {
        if let Some(log) = log {
            log.push(LogicalStep::new(
                format!("{message} => no candidates remain"),
                CellGroup::new(),
            ));
        }
        LogicResult::Invalid
    }
}
