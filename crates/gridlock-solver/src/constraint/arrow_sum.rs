use std::collections::{BTreeSet, HashSet};

use gridlock_core::{Board, Cell, CellGroup, Digit, DigitSet};

use crate::{
    GeometryError, LogicResult, LogicalStep, StepLog,
    constraint::{Constraint, remove_candidates},
};

const NAME: &str = "Arrow Sum";

/// A sum/concatenation constraint: the digits on the arrow sum to the value
/// shown in the circle.
///
/// A multi-cell circle is read most-significant-first as a decimal number;
/// a two-cell circle is called a "pill" in user-facing messages. The way a
/// sum can occupy a multi-cell circle is governed entirely by
/// [`possible_circle_arrangements`].
#[derive(Debug, Clone)]
pub struct ArrowSum {
    circle_cells: CellGroup,
    arrow_cells: CellGroup,
}

impl ArrowSum {
    /// Creates an Arrow Sum from two cell groups: the circle first, then
    /// the arrow.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::WrongGroupCount`] unless exactly two groups
    /// are supplied, [`GeometryError::TooFewCells`] if either group is
    /// empty, and [`GeometryError::OverlappingGroups`] if they share a
    /// cell.
    pub fn new(groups: Vec<CellGroup>) -> Result<Self, GeometryError> {
        if groups.len() != 2 {
            return Err(GeometryError::WrongGroupCount {
                name: NAME,
                expected: 2,
                got: groups.len(),
            });
        }
        let mut groups = groups.into_iter();
        let circle_cells = groups.next().unwrap_or_default();
        let arrow_cells = groups.next().unwrap_or_default();
        if circle_cells.is_empty() {
            return Err(GeometryError::TooFewCells {
                name: NAME,
                role: "circle",
                min: 1,
                got: 0,
            });
        }
        if arrow_cells.is_empty() {
            return Err(GeometryError::TooFewCells {
                name: NAME,
                role: "arrow",
                min: 1,
                got: 0,
            });
        }
        if circle_cells.iter().any(|cell| arrow_cells.contains(cell)) {
            return Err(GeometryError::OverlappingGroups { name: NAME });
        }
        Ok(Self {
            circle_cells,
            arrow_cells,
        })
    }

    /// Returns the circle cells, most significant first.
    #[must_use]
    pub fn circle_cells(&self) -> &[Cell] {
        &self.circle_cells
    }

    /// Returns the arrow cells.
    #[must_use]
    pub fn arrow_cells(&self) -> &[Cell] {
        &self.arrow_cells
    }

    fn circle_kind(&self) -> &'static str {
        if self.circle_cells.len() == 2 { "pill" } else { "circle" }
    }

    /// The arrow's sum if every arrow cell is solved.
    fn solved_arrow_sum(&self, board: &Board) -> Option<u32> {
        self.arrow_cells.iter().try_fold(0u32, |sum, &cell| {
            board.value(cell).map(|digit| sum + u32::from(digit.value()))
        })
    }

    /// The circle's concatenated value if every circle cell is solved.
    fn solved_circle_value(&self, board: &Board) -> Option<u32> {
        self.circle_cells.iter().try_fold(0u32, |value, &cell| {
            board
                .value(cell)
                .map(|digit| value * decimal_shift(digit.value()) + u32::from(digit.value()))
        })
    }

    /// Arrangements of `total` across the circle cells compatible with the
    /// cells' current candidates.
    fn circle_arrangements(&self, board: &Board, total: u32) -> Vec<Vec<u32>> {
        possible_circle_arrangements(total, self.circle_cells.len(), u32::from(board.size()))
            .into_iter()
            .filter(|arrangement| {
                arrangement
                    .iter()
                    .zip(&self.circle_cells)
                    .all(|(&piece, &cell)| board.candidates(cell).contains(piece_digit(piece)))
            })
            .collect()
    }

    /// Every integer in the arrow's `[sum of minimums, sum of maximums]`
    /// interval.
    ///
    /// Used by the one-time init pass, which prunes from bounds alone.
    fn bounded_arrow_sums(&self, board: &Board) -> BTreeSet<u32> {
        let mut min = 0u32;
        let mut max = 0u32;
        for &cell in &self.arrow_cells {
            let candidates = board.candidates(cell);
            let (Some(low), Some(high)) = (candidates.min(), candidates.max()) else {
                return BTreeSet::new();
            };
            min += u32::from(low.value());
            max += u32::from(high.value());
        }
        (min..=max).collect()
    }

    /// The exact set of sums the arrow can reach, honoring distinctness
    /// inside each mutual-visibility group of arrow cells.
    ///
    /// Cells in different groups are independent, so their per-group sum
    /// sets combine by pairwise addition.
    fn exact_arrow_sums(&self, board: &Board) -> BTreeSet<u32> {
        let mut totals = BTreeSet::from([0u32]);
        for group in board.split_into_groups(&self.arrow_cells) {
            let sums = group_sums(board, &group);
            if sums.is_empty() {
                return BTreeSet::new();
            }
            totals = totals
                .iter()
                .flat_map(|&total| sums.iter().map(move |&sum| total + sum))
                .collect();
        }
        totals
    }

    /// Cross-constrains the circle and the arrow against a sum set.
    ///
    /// Shared by init (bounded sums) and step (exact sums): keep only sums
    /// some compatible circle arrangement can show, then narrow both sides
    /// to what the surviving sums allow.
    fn apply_sums(
        &self,
        board: &mut Board,
        mut log: Option<&mut StepLog>,
        sums: &BTreeSet<u32>,
    ) -> LogicResult {
        let mut valid_sums = Vec::new();
        let mut keep_circle = vec![DigitSet::EMPTY; self.circle_cells.len()];
        let mut arrangement_count = 0usize;
        let mut sole_arrangement = None;

        for &total in sums {
            let arrangements = self.circle_arrangements(board, total);
            if arrangements.is_empty() {
                continue;
            }
            valid_sums.push(total);
            for arrangement in arrangements {
                for (keep, &piece) in keep_circle.iter_mut().zip(&arrangement) {
                    keep.insert(piece_digit(piece));
                }
                arrangement_count += 1;
                sole_arrangement = Some(arrangement);
            }
        }

        if valid_sums.is_empty() {
            return self.report_no_valid_sums(board, log);
        }

        // A unique sum with a unique arrangement pins the circle outright.
        if arrangement_count == 1
            && self.solved_circle_value(board).is_none()
            && let Some(arrangement) = sole_arrangement
        {
            return self.fill_circle(board, log, valid_sums[0], &arrangement);
        }

        let mut elims = Vec::new();
        for (index, &cell) in self.circle_cells.iter().enumerate() {
            let to_remove = board.candidates(cell).difference(keep_circle[index]);
            elims.extend(board.candidate_indexes(to_remove, &[cell]));
        }
        let message = format!("Impossible sums removed from {}", self.circle_kind());
        let circle_result = remove_candidates(board, elims, &message, log.as_deref_mut());
        if circle_result.is_invalid() {
            return LogicResult::Invalid;
        }

        let arrow_result = self.constrain_arrow_cells(board, log, &valid_sums);
        if arrow_result.is_invalid() {
            return LogicResult::Invalid;
        }
        LogicResult::from_changed(circle_result.is_changed() || arrow_result.is_changed())
    }

    fn report_no_valid_sums(&self, board: &Board, log: Option<&mut StepLog>) -> LogicResult {
        let description = match (self.solved_circle_value(board), self.solved_arrow_sum(board)) {
            (Some(circle), Some(arrow)) if circle != arrow => {
                format!("Sum of circle {circle} and arrow {arrow} do not match.")
            }
            (_, Some(arrow)) => format!(
                "Sum of arrow ({arrow}) is impossible to fill into {}.",
                self.circle_kind()
            ),
            _ => "There are no value sums for the arrow".to_owned(),
        };
        if let Some(log) = log {
            let mut cells = self.circle_cells.clone();
            cells.extend(self.arrow_cells.iter().copied());
            log.push(LogicalStep::new(description, cells));
        }
        LogicResult::Invalid
    }

    /// Commits the unsolved circle cells to the only arrangement left.
    fn fill_circle(
        &self,
        board: &mut Board,
        log: Option<&mut StepLog>,
        total: u32,
        arrangement: &[u32],
    ) -> LogicResult {
        let mut placements = Vec::new();
        for (&piece, &cell) in arrangement.iter().zip(&self.circle_cells) {
            if board.value(cell).is_some() {
                continue;
            }
            let digit = piece_digit(piece);
            if !board.set_value(cell, digit) {
                return LogicResult::Invalid;
            }
            placements.push(format!("{cell}={digit}"));
        }
        if placements.is_empty() {
            return LogicResult::None;
        }
        if let Some(log) = log {
            log.push(LogicalStep::new(
                format!("Circle Sum {total} => {}", placements.join(", ")),
                self.circle_cells.clone(),
            ));
        }
        LogicResult::Changed
    }

    /// Removes arrow digits too large to fit under any surviving sum.
    ///
    /// Bound-based: a digit survives unless, even with every other arrow
    /// cell at its minimum, the sum would overshoot the largest placeable
    /// value.
    fn constrain_arrow_cells(
        &self,
        board: &mut Board,
        log: Option<&mut StepLog>,
        valid_sums: &[u32],
    ) -> LogicResult {
        let Some(&max_valid) = valid_sums.last() else {
            return LogicResult::None;
        };

        let mut total_min = 0u32;
        for &cell in &self.arrow_cells {
            let Some(low) = board.candidates(cell).min() else {
                return LogicResult::None;
            };
            total_min += u32::from(low.value());
        }

        let mut elims = Vec::new();
        for &cell in &self.arrow_cells {
            let candidates = board.candidates(cell);
            let Some(low) = candidates.min() else {
                continue;
            };
            let others_min = total_min - u32::from(low.value());
            let mut to_remove = DigitSet::EMPTY;
            for digit in candidates {
                if u32::from(digit.value()) + others_min > max_valid {
                    to_remove.insert(digit);
                }
            }
            elims.extend(board.candidate_indexes(to_remove, &[cell]));
        }
        remove_candidates(
            board,
            elims,
            "Removing arrow candidates which overshoot every placeable sum",
            log,
        )
    }
}

impl Constraint for ArrowSum {
    fn name(&self) -> &'static str {
        NAME
    }

    fn specific_name(&self) -> String {
        format!("Arrow at {}", self.circle_cells[0])
    }

    fn init_candidates(&mut self, board: &mut Board) -> LogicResult {
        // Bound-driven pass over the whole sum interval. This also
        // validates that the circle can represent any reachable sum at
        // all, which covers the width precondition: an arrow maxing out at
        // `cells * N` can never fill a circle needing more decimal digits.
        let sums = self.bounded_arrow_sums(board);
        self.apply_sums(board, None, &sums)
    }

    fn step_logic(
        &self,
        board: &mut Board,
        log: Option<&mut StepLog>,
        _is_searching: bool,
    ) -> LogicResult {
        let sums = self.exact_arrow_sums(board);
        self.apply_sums(board, log, &sums)
    }

    fn seen_cells(&self, _cell: Cell) -> CellGroup {
        // An arrow asserts a sum, not mutual exclusion; repeats on the
        // arrow are legal wherever the base grid allows them.
        CellGroup::new()
    }
}

/// Enumerates every split of `total`'s decimal representation into exactly
/// `num_digits` contiguous, non-empty, left-to-right pieces, each piece in
/// `[1, max_digit]`.
///
/// Pieces are read most-significant-first. Zero pieces are not permitted,
/// so a piece with a leading zero is invalid and `total = 0` yields no
/// arrangements. Results are ordered by ascending first-piece length.
///
/// This is the exact rule governing how a multi-digit circle's cells can
/// jointly represent an arrow's sum.
///
/// # Examples
///
/// ```
/// use gridlock_solver::constraint::possible_circle_arrangements;
///
/// assert_eq!(
///     possible_circle_arrangements(111, 2, 16),
///     vec![vec![1, 11], vec![11, 1]]
/// );
/// assert!(possible_circle_arrangements(111, 2, 9).is_empty());
/// assert!(possible_circle_arrangements(10, 1, 9).is_empty());
/// ```
#[must_use]
pub fn possible_circle_arrangements(
    total: u32,
    num_digits: usize,
    max_digit: u32,
) -> Vec<Vec<u32>> {
    let mut arrangements = Vec::new();
    if total == 0 || num_digits == 0 {
        return arrangements;
    }
    let digits = decimal_digits(total);
    let mut current = Vec::with_capacity(num_digits);
    split_pieces(&digits, 0, num_digits, max_digit, &mut current, &mut arrangements);
    arrangements
}

fn decimal_digits(total: u32) -> Vec<u32> {
    let mut digits = Vec::new();
    let mut rest = total;
    while rest > 0 {
        digits.push(rest % 10);
        rest /= 10;
    }
    digits.reverse();
    digits
}

fn split_pieces(
    digits: &[u32],
    start: usize,
    remaining: usize,
    max_digit: u32,
    current: &mut Vec<u32>,
    out: &mut Vec<Vec<u32>>,
) {
    if remaining == 0 {
        if start == digits.len() {
            out.push(current.clone());
        }
        return;
    }
    if digits.len() - start < remaining || digits[start] == 0 {
        return;
    }
    let mut value = 0;
    for end in start..digits.len() {
        value = value * 10 + digits[end];
        if value > max_digit {
            break;
        }
        current.push(value);
        split_pieces(digits, end + 1, remaining - 1, max_digit, current, out);
        current.pop();
    }
}

/// Sums reachable by one mutually-visible group: digits are drawn from the
/// cells' candidates without repetition.
///
/// The search memoizes on `(cell index, used digits)`; within a group the
/// running sum is determined by the used-digit set, so each state is
/// explored once.
fn group_sums(board: &Board, group: &[Cell]) -> BTreeSet<u32> {
    fn visit(
        board: &Board,
        group: &[Cell],
        index: usize,
        used: DigitSet,
        sum: u32,
        sums: &mut BTreeSet<u32>,
        visited: &mut HashSet<(usize, u32)>,
    ) {
        if index == group.len() {
            sums.insert(sum);
            return;
        }
        if !visited.insert((index, used.bits())) {
            return;
        }
        for digit in board.candidates(group[index]).difference(used) {
            let mut next_used = used;
            next_used.insert(digit);
            visit(
                board,
                group,
                index + 1,
                next_used,
                sum + u32::from(digit.value()),
                sums,
                visited,
            );
        }
    }

    let mut sums = BTreeSet::new();
    let mut visited = HashSet::new();
    visit(board, group, 0, DigitSet::EMPTY, 0, &mut sums, &mut visited);
    sums
}

fn decimal_shift(value: u8) -> u32 {
    if value >= 10 { 100 } else { 10 }
}

#[expect(clippy::cast_possible_truncation)]
fn piece_digit(piece: u32) -> Digit {
    Digit::new(piece as u8)
}
