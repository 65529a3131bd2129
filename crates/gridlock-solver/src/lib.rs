//! Constraint propagation for grid-placement puzzle deduction.
//!
//! This crate implements the deduction layer on top of
//! [`gridlock_core`]'s board model:
//!
//! - [`LogicResult`]: the three-valued outcome protocol every propagation
//!   step obeys.
//! - [`LogicalStep`]: the explanation entries a driver can collect to show
//!   *why* each deduction happened.
//! - [`constraint::Constraint`]: the capability contract
//!   (`init_candidates`, `enforce`, `step_logic`, `seen_cells`) with its
//!   two hardest concrete instances, [`constraint::LockoutLine`] and
//!   [`constraint::ArrowSum`].
//! - [`Propagator`]: the fixpoint driver that initializes once, steps every
//!   constraint until a pass changes nothing, and aborts on contradiction.
//!
//! # Examples
//!
//! ```
//! use gridlock_core::{Board, Cell};
//! use gridlock_solver::{LogicResult, Propagator, constraint::LockoutLine};
//!
//! let mut board = Board::new(9);
//! let cells = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]
//!     .into_iter()
//!     .collect();
//! let lockout = LockoutLine::new(9, vec![cells])?;
//!
//! let mut propagator = Propagator::new(vec![Box::new(lockout)]);
//! assert_eq!(propagator.init_candidates(&mut board), LogicResult::Changed);
//!
//! let mut log = Vec::new();
//! let result = propagator.run_to_fixpoint(&mut board, Some(&mut log), false);
//! assert_eq!(result, LogicResult::None); // fixpoint, no contradiction
//! # Ok::<(), gridlock_solver::GeometryError>(())
//! ```

pub use self::{error::*, logic_result::*, logical_step::*, propagator::*};

pub mod constraint;
mod error;
mod logic_result;
mod logical_step;
mod propagator;

#[cfg(test)]
mod testing;
