use gridlock_core::{Board, Cell, CellGroup, ClearResult, Digit, DigitSet};

use crate::{
    GeometryError, LogicResult, LogicalStep, StepLog,
    constraint::{Constraint, remove_candidates},
};

const NAME: &str = "Lockout Line";

/// A difference-bounding line constraint.
///
/// The first and last cells of the group are "diamonds"; the remainder, in
/// order, is the "line". The diamonds must be at least half the grid size
/// apart, and at most that minimum plus whatever slack the line's
/// uniqueness pressure leaves; every line cell must fall outside the
/// interval the diamonds span.
///
/// The difference bounds are derived once in
/// [`init_candidates`](Constraint::init_candidates) from geometry alone and
/// cached for the constraint's lifetime; nothing derived from mutable board
/// content is ever cached.
#[derive(Debug, Clone)]
pub struct LockoutLine {
    cells: CellGroup,
    diamonds: [Cell; 2],
    line: CellGroup,
    minimum_difference: u8,
    maximum_difference: u8,
    minimum_unique_digits: u8,
    degrees_of_freedom: u8,
}

impl LockoutLine {
    /// Creates a Lockout Line from one ordered cell group.
    ///
    /// The first and last cells are the diamonds; everything between is the
    /// line. `size` is the grid size of the board the constraint will run
    /// on.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::WrongGroupCount`] unless exactly one group
    /// is supplied, and [`GeometryError::TooFewCells`] unless the group has
    /// at least two diamonds and one line cell.
    pub fn new(size: u8, mut groups: Vec<CellGroup>) -> Result<Self, GeometryError> {
        if groups.len() != 1 {
            return Err(GeometryError::WrongGroupCount {
                name: NAME,
                expected: 1,
                got: groups.len(),
            });
        }
        let cells = groups.swap_remove(0);
        if cells.len() < 3 {
            return Err(GeometryError::TooFewCells {
                name: NAME,
                role: "line",
                min: 3,
                got: cells.len(),
            });
        }
        let diamonds = [cells[0], cells[cells.len() - 1]];
        let line: CellGroup = cells[1..cells.len() - 1].iter().copied().collect();
        Ok(Self {
            cells,
            diamonds,
            line,
            minimum_difference: size / 2,
            maximum_difference: 0,
            minimum_unique_digits: 0,
            degrees_of_freedom: 0,
        })
    }

    fn is_diamond(&self, cell: Cell) -> bool {
        cell == self.diamonds[0] || cell == self.diamonds[1]
    }

    /// Derives the maximum difference from the line's uniqueness pressure.
    ///
    /// The largest mutually-visible subgroup of the line forces that many
    /// distinct digits outside the diamond interval, which eats into the
    /// slack above the minimum difference.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn compute_bounds(&mut self, board: &Board) {
        let groups = board.split_into_groups(&self.line);
        let unique = groups.iter().map(CellGroup::len).max().unwrap_or(1);
        self.minimum_unique_digits = unique as u8;
        let slack = i32::from(board.size())
            - (i32::from(self.minimum_difference) + 2)
            - (i32::from(self.minimum_unique_digits) - 1);
        self.degrees_of_freedom = slack.max(0) as u8;
        self.maximum_difference = self.minimum_difference + self.degrees_of_freedom;
    }

    /// Removes the digit(s) no diamond pair at the minimum gap can reach.
    ///
    /// In odd-sized grids the single central value is impossible, in even
    /// grids the two central values are:
    ///
    /// `[1 2 3 4 [5] 6 7 8 9]` / `[1 2 3 [4 5] 6 7 8]`
    fn remove_impossible_line_digits(&self, board: &mut Board) -> LogicResult {
        let central = Digit::new(self.minimum_difference + 1);
        let impossible = if board.size() % 2 == 1 {
            DigitSet::from_digit(central)
        } else {
            DigitSet::from_digit(Digit::new(self.minimum_difference)) | DigitSet::from_digit(central)
        };
        let mut changed = false;
        for &cell in &self.line {
            match board.clear_mask(cell, impossible) {
                ClearResult::Emptied => return LogicResult::Invalid,
                ClearResult::Changed => changed = true,
                ClearResult::Unchanged => {}
            }
        }
        LogicResult::from_changed(changed)
    }

    /// Diamond digit pairs whose absolute difference lies inside the
    /// derived bounds.
    fn valid_diamond_pairs(&self, board: &Board) -> Vec<(Digit, Digit)> {
        let first = board.candidates(self.diamonds[0]);
        let second = board.candidates(self.diamonds[1]);
        let mut pairs = Vec::new();
        for a in first {
            for b in second {
                let difference = a.value().abs_diff(b.value());
                if difference >= self.minimum_difference && difference <= self.maximum_difference {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    fn difference_message(&self, size: u8) -> String {
        let minimum = self.minimum_difference;
        let qualification = if self.degrees_of_freedom == 0 {
            format!("exactly {minimum}")
        } else if self.maximum_difference < size - 2 {
            format!("between {minimum} and {}", self.maximum_difference)
        } else {
            format!("at least {minimum}")
        };
        if self.minimum_unique_digits <= 1 {
            format!("Diamonds must be {qualification} apart.")
        } else if self.degrees_of_freedom == 0 {
            format!(
                "Line contains the maximum {} unique digits so diamonds must be {qualification} apart.",
                self.minimum_unique_digits
            )
        } else if self.degrees_of_freedom < self.minimum_difference {
            format!(
                "Line contains at least {} unique digits so diamonds must be {qualification} apart.",
                self.minimum_unique_digits
            )
        } else {
            format!("Diamonds must be {qualification} apart.")
        }
    }

    /// Keeps, in each diamond, only digits with a partner in the other
    /// diamond at a legal difference.
    fn enforce_diamond_difference(
        &self,
        board: &mut Board,
        log: Option<&mut StepLog>,
    ) -> LogicResult {
        let pairs = self.valid_diamond_pairs(board);
        if pairs.is_empty() {
            if let Some(log) = log {
                log.push(LogicalStep::new(
                    "No valid options are left for the diamonds".to_owned(),
                    self.diamonds.iter().copied().collect(),
                ));
            }
            return LogicResult::Invalid;
        }

        let mut keep = [DigitSet::EMPTY; 2];
        for &(a, b) in &pairs {
            keep[0].insert(a);
            keep[1].insert(b);
        }

        let mut elims = Vec::new();
        for (index, &diamond) in self.diamonds.iter().enumerate() {
            let to_remove = board.candidates(diamond).difference(keep[index]);
            elims.extend(board.candidate_indexes(to_remove, &[diamond]));
        }
        remove_candidates(board, elims, &self.difference_message(board.size()), log)
    }

    /// Removes, from every line cell, the digits that fall strictly between
    /// the diamonds no matter which achievable pair is realized.
    fn line_not_between_diamonds(&self, board: &mut Board, log: Option<&mut StepLog>) -> LogicResult {
        let pairs = self.valid_diamond_pairs(board);
        if pairs.is_empty() {
            // The difference rule reports the contradiction.
            return LogicResult::None;
        }
        let mut excluded = board.all_digits();
        for &(a, b) in &pairs {
            excluded &= between(a, b);
        }
        let elims = board.candidate_indexes(excluded, &self.line);
        remove_candidates(
            board,
            elims,
            "Removing candidates from line which fall between all possible pairs",
            log,
        )
    }

    /// Discards diamond pairs that would strip some line cell of all its
    /// candidates.
    ///
    /// A line cell whose candidate span is at most half the grid size can
    /// be fully covered by the diamond interval; the diamond minimum and
    /// maximum values that would do so are forbidden.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn diamonds_must_not_invalidate_cell(
        &self,
        board: &mut Board,
        log: Option<&mut StepLog>,
    ) -> LogicResult {
        let size = board.size();
        let half = size / 2;

        let mut forbidden_low = DigitSet::EMPTY;
        let mut forbidden_high = DigitSet::EMPTY;
        for &cell in &self.line {
            let candidates = board.candidates(cell);
            let (Some(min), Some(max)) = (candidates.min(), candidates.max()) else {
                continue;
            };
            if max.value() - min.value() > half {
                // No diamond value can invalidate a span this wide.
                continue;
            }
            let low_start = i16::from(max.value()) - i16::from(half);
            for value in low_start.max(1)..=i16::from(min.value()) {
                forbidden_low.insert(Digit::new(value as u8));
            }
            let high_end = (min.value() + half).min(size);
            for value in max.value()..=high_end {
                forbidden_high.insert(Digit::new(value));
            }
        }

        let mut keep = [DigitSet::EMPTY; 2];
        for (a, b) in self.valid_diamond_pairs(board) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            if forbidden_low.contains(low) || forbidden_high.contains(high) {
                continue;
            }
            keep[0].insert(a);
            keep[1].insert(b);
        }

        let mut elims = Vec::new();
        for (index, &diamond) in self.diamonds.iter().enumerate() {
            let to_remove = board.candidates(diamond).difference(keep[index]);
            elims.extend(board.candidate_indexes(to_remove, &[diamond]));
        }
        remove_candidates(
            board,
            elims,
            "Removing candidates from diamond which would break a cell in the line",
            log,
        )
    }
}

/// Digits strictly between two values; empty when they are equal or
/// adjacent.
fn between(a: Digit, b: Digit) -> DigitSet {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if high.value() - low.value() < 2 {
        return DigitSet::EMPTY;
    }
    DigitSet::below(high).difference(DigitSet::below(Digit::new(low.value() + 1)))
}

impl Constraint for LockoutLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn specific_name(&self) -> String {
        format!("{NAME} {}-{}", self.diamonds[0], self.diamonds[1])
    }

    fn init_candidates(&mut self, board: &mut Board) -> LogicResult {
        self.compute_bounds(board);
        self.remove_impossible_line_digits(board)
    }

    fn step_logic(
        &self,
        board: &mut Board,
        mut log: Option<&mut StepLog>,
        _is_searching: bool,
    ) -> LogicResult {
        // Sub-rules run in fixed order; the first one that observes
        // something ends the step and the rest wait for the next pass.
        let result = self.enforce_diamond_difference(board, log.as_deref_mut());
        if !result.is_none() {
            return result;
        }
        let result = self.line_not_between_diamonds(board, log.as_deref_mut());
        if !result.is_none() {
            return result;
        }
        self.diamonds_must_not_invalidate_cell(board, log)
    }

    fn seen_cells(&self, cell: Cell) -> CellGroup {
        if !self.is_diamond(cell) {
            // Diamonds constrain the line, but line cells constrain
            // nothing through this constraint.
            return CellGroup::new();
        }
        self.cells
            .iter()
            .copied()
            .filter(|&member| member != cell)
            .collect()
    }
}
