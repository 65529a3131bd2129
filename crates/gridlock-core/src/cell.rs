use std::fmt;

use tinyvec::TinyVec;

/// A 0-based grid coordinate, row-major.
///
/// Displays as the 1-based `r{row}c{col}` label used in deduction messages.
///
/// # Examples
///
/// ```
/// use gridlock_core::Cell;
///
/// let cell = Cell::new(0, 2);
/// assert_eq!(cell.row(), 0);
/// assert_eq!(cell.col(), 2);
/// assert_eq!(cell.to_string(), "r1c3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Creates a cell from 0-based row and column indices.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the 0-based row index.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the 0-based column index.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// An ordered group of cells.
///
/// Order is semantically significant: line, arrow, and circle roles are
/// assigned positionally, and the first or last element is often
/// distinguished (the diamonds of a Lockout Line, the leading cell of a
/// circle). Groups are small in practice and stored inline up to eight
/// cells.
pub type CellGroup = TinyVec<[Cell; 8]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(Cell::new(0, 0).to_string(), "r1c1");
        assert_eq!(Cell::new(8, 2).to_string(), "r9c3");
    }

    #[test]
    fn test_group_preserves_order() {
        let group: CellGroup = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(0, 1)]
            .into_iter()
            .collect();
        assert_eq!(group[0], Cell::new(0, 0));
        assert_eq!(group[2], Cell::new(0, 1));
    }
}
