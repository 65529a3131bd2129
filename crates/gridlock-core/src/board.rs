use crate::{Cell, CellGroup, CellMask, Digit, DigitSet};

/// Outcome of clearing candidate bits from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearResult {
    /// None of the cleared digits were present.
    Unchanged,
    /// At least one candidate was removed and candidates remain.
    Changed,
    /// The clear removed the cell's last candidate (or targeted the
    /// committed digit of a solved cell); this board state admits no
    /// completion.
    Emptied,
}

/// A flat identifier for one `(cell, digit)` candidate.
///
/// Used to report eliminations in deduction logs; the owning
/// [`Board`] renders identifiers back into human-readable form with
/// [`Board::describe_elims`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateIndex(u32);

impl CandidateIndex {
    /// Returns the raw index value.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// The shared puzzle board: one [`CellMask`] per cell, row-major.
///
/// Constraints read and mutate the board exclusively through the primitives
/// here and never retain copies of mask contents across calls. The board
/// also centralizes the services constraints need for explanations:
/// candidate-index translation, elimination rendering, and the
/// mutual-visibility partitioning behind uniqueness reasoning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    masks: Vec<CellMask>,
}

impl Board {
    /// Creates a blank board with every digit a candidate in every cell.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not in `2..=31`; the mask word reserves bit 31
    /// for the solved flag, which bounds the grid size.
    #[must_use]
    pub fn new(size: u8) -> Self {
        assert!(
            (2..=Digit::MAX).contains(&size),
            "grid size must be between 2 and {}, got {size}",
            Digit::MAX
        );
        let cells = usize::from(size) * usize::from(size);
        Self {
            size,
            masks: vec![CellMask::full(size); cells],
        }
    }

    /// Returns the grid size `N`.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns the set of all digits valid on this board.
    #[must_use]
    pub fn all_digits(&self) -> DigitSet {
        DigitSet::full(self.size)
    }

    fn cell_offset(&self, cell: Cell) -> usize {
        assert!(
            cell.row() < self.size && cell.col() < self.size,
            "cell {cell} out of bounds for grid size {}",
            self.size
        );
        usize::from(cell.row()) * usize::from(self.size) + usize::from(cell.col())
    }

    /// Returns the mask of `cell`.
    #[must_use]
    pub fn mask(&self, cell: Cell) -> CellMask {
        self.masks[self.cell_offset(cell)]
    }

    /// Returns the candidate digits of `cell`.
    ///
    /// For a solved cell this is exactly its committed digit, so candidate
    /// iteration handles solved and unsolved cells uniformly.
    #[must_use]
    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.mask(cell).candidates()
    }

    /// Returns the committed digit of `cell`, if the cell is solved.
    #[must_use]
    pub fn value(&self, cell: Cell) -> Option<Digit> {
        self.mask(cell).solved_digit()
    }

    /// Clears `digits` from `cell`'s candidates, reporting what happened.
    ///
    /// Clearing the committed digit of a solved cell reports
    /// [`ClearResult::Emptied`] without modifying the cell.
    pub fn clear_mask(&mut self, cell: Cell, digits: DigitSet) -> ClearResult {
        let offset = self.cell_offset(cell);
        let mask = self.masks[offset];
        if let Some(value) = mask.solved_digit() {
            return if digits.contains(value) {
                ClearResult::Emptied
            } else {
                ClearResult::Unchanged
            };
        }
        let cleared = mask.without(digits);
        if cleared == mask {
            return ClearResult::Unchanged;
        }
        self.masks[offset] = cleared;
        if cleared.candidates().is_empty() {
            ClearResult::Emptied
        } else {
            ClearResult::Changed
        }
    }

    /// Commits `cell` to `digit`, setting the solved flag.
    ///
    /// Returns `false` (leaving the board untouched) if `digit` is not
    /// currently a candidate, or if the cell is already solved to a
    /// different digit.
    pub fn set_value(&mut self, cell: Cell, digit: Digit) -> bool {
        let offset = self.cell_offset(cell);
        let mask = self.masks[offset];
        if mask.is_solved() {
            return mask.solved_digit() == Some(digit);
        }
        if !mask.candidates().contains(digit) {
            return false;
        }
        self.masks[offset] = CellMask::solved(digit);
        true
    }

    /// Replaces `cell`'s candidates with exactly `digits`, clearing the
    /// solved flag.
    ///
    /// This is a setup and search primitive, not a deduction: no change
    /// reporting is performed.
    pub fn set_candidates(&mut self, cell: Cell, digits: DigitSet) {
        let offset = self.cell_offset(cell);
        self.masks[offset] = CellMask::with_candidates(digits);
    }

    /// Returns the flat candidate identifier for `(cell, digit)`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn candidate_index(&self, cell: Cell, digit: Digit) -> CandidateIndex {
        let offset = self.cell_offset(cell) as u32;
        CandidateIndex(offset * u32::from(self.size) + u32::from(digit.value()) - 1)
    }

    /// Returns candidate identifiers for every digit of `digits` still
    /// present in each of `cells`, skipping solved cells.
    #[must_use]
    pub fn candidate_indexes(&self, digits: DigitSet, cells: &[Cell]) -> Vec<CandidateIndex> {
        let mut indexes = Vec::new();
        for &cell in cells {
            let mask = self.mask(cell);
            if mask.is_solved() {
                continue;
            }
            for digit in mask.candidates() & digits {
                indexes.push(self.candidate_index(cell, digit));
            }
        }
        indexes
    }

    #[expect(clippy::cast_possible_truncation)]
    fn candidate_cell(&self, index: CandidateIndex) -> Cell {
        let offset = index.0 / u32::from(self.size);
        Cell::new(
            (offset / u32::from(self.size)) as u8,
            (offset % u32::from(self.size)) as u8,
        )
    }

    #[expect(clippy::cast_possible_truncation)]
    fn candidate_digit(&self, index: CandidateIndex) -> Digit {
        Digit::new((index.0 % u32::from(self.size)) as u8 + 1)
    }

    /// Clears every candidate in `elims`.
    ///
    /// Returns `false` if any affected cell is left without candidates; the
    /// caller must then treat the board state as contradictory.
    pub fn clear_candidates(&mut self, elims: &[CandidateIndex]) -> bool {
        let mut valid = true;
        for &elim in elims {
            let cell = self.candidate_cell(elim);
            let digit = self.candidate_digit(elim);
            if self.clear_mask(cell, DigitSet::from_digit(digit)) == ClearResult::Emptied {
                valid = false;
            }
        }
        valid
    }

    /// Renders eliminations like `-5r1c2, -6r1c2` for log messages.
    #[must_use]
    pub fn describe_elims(&self, elims: &[CandidateIndex]) -> String {
        let parts: Vec<String> = elims
            .iter()
            .map(|&elim| format!("-{}{}", self.candidate_digit(elim), self.candidate_cell(elim)))
            .collect();
        parts.join(", ")
    }

    /// Returns `true` if `a` and `b` must hold distinct digits under the
    /// base grid rules: same row, same column, or same box.
    ///
    /// Boxes exist only when the grid size is a perfect square; the box
    /// side is then `sqrt(N)`. A cell does not see itself.
    #[must_use]
    pub fn sees(&self, a: Cell, b: Cell) -> bool {
        if a == b {
            return false;
        }
        if a.row() == b.row() || a.col() == b.col() {
            return true;
        }
        self.box_side().is_some_and(|side| {
            (a.row() / side, a.col() / side) == (b.row() / side, b.col() / side)
        })
    }

    fn box_side(&self) -> Option<u8> {
        (2..=5).find(|side| side * side == self.size)
    }

    /// Partitions `cells` into maximal mutually-visible subgroups.
    ///
    /// Each cell joins the first existing group all of whose members it
    /// sees; otherwise it starts a new group. Greedy and deterministic,
    /// which is all the uniqueness bound derivation needs.
    #[must_use]
    pub fn split_into_groups(&self, cells: &[Cell]) -> Vec<CellGroup> {
        let mut groups: Vec<CellGroup> = Vec::new();
        for &cell in cells {
            let joinable = groups
                .iter_mut()
                .find(|group| group.iter().all(|&member| self.sees(member, cell)));
            if let Some(group) = joinable {
                group.push(cell);
            } else {
                groups.push(std::iter::once(cell).collect());
            }
        }
        groups
    }
}
