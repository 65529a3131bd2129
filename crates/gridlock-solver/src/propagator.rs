use gridlock_core::{Board, Cell, DigitSet};

use crate::{
    LogicResult, StepLog,
    constraint::{BoxedConstraint, remove_candidates},
};

/// Drives a set of constraints to a fixpoint over a shared board.
///
/// The propagator implements the documented control flow: initialize every
/// constraint exactly once, then repeat passes of `step_logic` until a full
/// pass yields no [`Changed`](LogicResult::Changed), at which point the
/// caller may escalate to search. It aborts as soon as any constraint
/// returns [`Invalid`](LogicResult::Invalid).
///
/// Step order follows registration order and is stable within a pass;
/// constraints must not assume anything about the intermediate states a
/// particular ordering produces, only that all of them have converged by
/// the fixpoint.
///
/// # Examples
///
/// ```
/// use gridlock_core::{Board, Cell};
/// use gridlock_solver::{LogicResult, Propagator, constraint::LockoutLine};
///
/// let mut board = Board::new(9);
/// let cells = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]
///     .into_iter()
///     .collect();
/// let lockout = LockoutLine::new(9, vec![cells])?;
///
/// let mut propagator = Propagator::new(vec![Box::new(lockout)]);
/// propagator.init_candidates(&mut board);
/// let result = propagator.run_to_fixpoint(&mut board, None, false);
/// assert_eq!(result, LogicResult::None);
/// # Ok::<(), gridlock_solver::GeometryError>(())
/// ```
#[derive(Debug)]
pub struct Propagator {
    constraints: Vec<BoxedConstraint>,
}

impl Propagator {
    /// Creates a propagator over the given constraints.
    #[must_use]
    pub fn new(constraints: Vec<BoxedConstraint>) -> Self {
        Self { constraints }
    }

    /// Returns the registered constraints in step order.
    #[must_use]
    pub fn constraints(&self) -> &[BoxedConstraint] {
        &self.constraints
    }

    /// Runs every constraint's one-time static pruning.
    ///
    /// Must be called exactly once, before any stepping.
    pub fn init_candidates(&mut self, board: &mut Board) -> LogicResult {
        let mut changed = false;
        for constraint in &mut self.constraints {
            match constraint.init_candidates(board) {
                LogicResult::Invalid => {
                    log::debug!("{}: invalid during init", constraint.specific_name());
                    return LogicResult::Invalid;
                }
                LogicResult::Changed => changed = true,
                LogicResult::None => {}
            }
        }
        LogicResult::from_changed(changed)
    }

    /// Runs one propagation pass.
    ///
    /// The generic mutual-visibility elimination runs first, then each
    /// constraint's `step_logic` in order; the first non-`None` result ends
    /// the pass.
    pub fn step(
        &self,
        board: &mut Board,
        mut log: Option<&mut StepLog>,
        is_searching: bool,
    ) -> LogicResult {
        let result = self.eliminate_seen_cells(board, log.as_deref_mut());
        if !result.is_none() {
            return result;
        }
        for constraint in &self.constraints {
            let result = constraint.step_logic(board, log.as_deref_mut(), is_searching);
            log::trace!("{}: {result:?}", constraint.specific_name());
            if !result.is_none() {
                return result;
            }
        }
        LogicResult::None
    }

    /// Repeats [`step`](Self::step) until a fixpoint or a contradiction.
    ///
    /// Returns [`LogicResult::None`] once a full pass makes no further
    /// progress (pure logic has stalled) or [`LogicResult::Invalid`] as
    /// soon as any constraint rejects the board.
    pub fn run_to_fixpoint(
        &self,
        board: &mut Board,
        mut log: Option<&mut StepLog>,
        is_searching: bool,
    ) -> LogicResult {
        let mut passes = 0usize;
        loop {
            let result = self.step(board, log.as_deref_mut(), is_searching);
            passes += 1;
            match result {
                LogicResult::Changed => {}
                LogicResult::None => {
                    log::debug!("fixpoint after {passes} passes");
                    return LogicResult::None;
                }
                LogicResult::Invalid => {
                    log::debug!("contradiction after {passes} passes");
                    return LogicResult::Invalid;
                }
            }
        }
    }

    /// No two cells that see each other through a constraint may share a
    /// solved digit: each committed value is cleared from its partners.
    fn eliminate_seen_cells(
        &self,
        board: &mut Board,
        mut log: Option<&mut StepLog>,
    ) -> LogicResult {
        for row in 0..board.size() {
            for col in 0..board.size() {
                let cell = Cell::new(row, col);
                let Some(digit) = board.value(cell) else {
                    continue;
                };
                for constraint in &self.constraints {
                    let seen = constraint.seen_cells(cell);
                    if seen.is_empty() {
                        continue;
                    }
                    let elims = board.candidate_indexes(DigitSet::from_digit(digit), &seen);
                    if elims.is_empty() {
                        continue;
                    }
                    let message =
                        format!("Cells seen by {cell} through {} cannot be {digit}", constraint.specific_name());
                    return remove_candidates(board, elims, &message, log.as_deref_mut());
                }
            }
        }
        LogicResult::None
    }
}

#[cfg(test)]
mod tests {
    use gridlock_core::Digit;

    use super::*;
    use crate::constraint::{ArrowSum, LockoutLine};

    fn group(coords: &[(u8, u8)]) -> gridlock_core::CellGroup {
        coords.iter().map(|&(row, col)| Cell::new(row, col)).collect()
    }

    fn lockout_propagator() -> Propagator {
        let lockout = LockoutLine::new(9, vec![group(&[(0, 0), (0, 1), (0, 2)])]).unwrap();
        Propagator::new(vec![Box::new(lockout)])
    }

    #[test]
    fn test_init_runs_every_constraint() {
        let mut board = Board::new(9);
        let mut propagator = lockout_propagator();

        assert_eq!(propagator.init_candidates(&mut board), LogicResult::Changed);
        assert!(!board.candidates(Cell::new(0, 1)).contains(Digit::new(5)));
    }

    #[test]
    fn test_blank_board_reaches_fixpoint() {
        let mut board = Board::new(9);
        let mut propagator = lockout_propagator();
        propagator.init_candidates(&mut board);

        let mut log = StepLog::new();
        let result = propagator.run_to_fixpoint(&mut board, Some(&mut log), false);
        assert_eq!(result, LogicResult::None);
    }

    #[test]
    fn test_contradiction_stops_propagation() {
        let mut board = Board::new(9);
        let mut propagator = lockout_propagator();
        propagator.init_candidates(&mut board);

        board.set_candidates(Cell::new(0, 0), DigitSet::from_values([1, 2]));
        board.set_candidates(Cell::new(0, 2), DigitSet::from_values([3, 4]));

        let mut log = StepLog::new();
        let result = propagator.run_to_fixpoint(&mut board, Some(&mut log), false);
        assert_eq!(result, LogicResult::Invalid);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_seen_cells_cleared_after_commit() {
        let mut board = Board::new(9);
        let mut propagator = lockout_propagator();
        propagator.init_candidates(&mut board);

        assert!(board.set_value(Cell::new(0, 0), Digit::new(1)));

        let mut log = StepLog::new();
        let result = propagator.step(&mut board, Some(&mut log), false);
        assert_eq!(result, LogicResult::Changed);
        assert!(!board.candidates(Cell::new(0, 1)).contains(Digit::new(1)));
        assert!(!board.candidates(Cell::new(0, 2)).contains(Digit::new(1)));
        assert!(log[0].description().contains("Cells seen by r1c1"));
        assert_eq!(log[0].eliminations().len(), 2);
    }

    #[test]
    fn test_mixed_constraints_to_fixpoint() {
        let mut board = Board::new(9);
        let lockout = LockoutLine::new(9, vec![group(&[(0, 0), (0, 1), (0, 2)])]).unwrap();
        let arrow = ArrowSum::new(vec![group(&[(8, 8)]), group(&[(8, 6), (8, 7)])]).unwrap();
        let mut propagator = Propagator::new(vec![Box::new(lockout), Box::new(arrow)]);

        assert_eq!(propagator.init_candidates(&mut board), LogicResult::Changed);

        assert!(board.set_value(Cell::new(8, 6), Digit::new(2)));
        assert!(board.set_value(Cell::new(8, 7), Digit::new(3)));

        let mut log = StepLog::new();
        let result = propagator.run_to_fixpoint(&mut board, Some(&mut log), false);
        assert_eq!(result, LogicResult::None);
        assert_eq!(board.value(Cell::new(8, 8)), Some(Digit::new(5)));
    }
}
