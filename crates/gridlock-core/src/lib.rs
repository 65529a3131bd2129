//! Core candidate and board model for grid-placement puzzle deduction.
//!
//! This crate provides the data layer shared by every constraint in the
//! deduction engine:
//!
//! - [`Digit`], [`DigitSet`], [`CellMask`]: a cell's remaining
//!   possibilities and its solved state packed into one machine word, with
//!   pure, stateless operations over them.
//! - [`Cell`] and [`CellGroup`]: 0-based row-major coordinates and the
//!   ordered groups constraints are built from.
//! - [`Board`]: the shared per-cell mask storage with the mutation
//!   primitives constraints use (mask clearing with change reporting, value
//!   commitment), plus candidate-index translation, elimination rendering,
//!   and mutual-visibility grouping.
//!
//! # Examples
//!
//! ```
//! use gridlock_core::{Board, Cell, ClearResult, Digit, DigitSet};
//!
//! let mut board = Board::new(9);
//! let cell = Cell::new(0, 0);
//!
//! // A blank cell holds all nine candidates and is not solved.
//! assert_eq!(board.candidates(cell).len(), 9);
//! assert_eq!(board.value(cell), None);
//!
//! // Clearing reports whether anything changed.
//! let removed = DigitSet::from_values([1, 2, 3]);
//! assert_eq!(board.clear_mask(cell, removed), ClearResult::Changed);
//! assert_eq!(board.clear_mask(cell, removed), ClearResult::Unchanged);
//!
//! // Committing a value sets the solved flag.
//! assert!(board.set_value(cell, Digit::new(5)));
//! assert_eq!(board.value(cell), Some(Digit::new(5)));
//! ```

pub use self::{board::*, cell::*, cell_mask::*, digit::*, digit_set::*};

mod board;
mod cell;
mod cell_mask;
mod digit;
mod digit_set;
