//! Test utilities for constraint implementations.

use gridlock_core::Board;

use crate::{LogicResult, StepLog, constraint::Constraint};

/// Drives one constraint through the canonical init → setup → step cycle.
///
/// Mirrors how the driver exercises a constraint: `init_candidates` once on
/// a blank board, caller-controlled board mutation, then a single
/// `step_logic` with a log attached. Asserts the step's result and, when
/// `message_contains` is non-empty, that the first logged entry mentions
/// it; `after` receives the final board for further assertions.
#[track_caller]
pub(crate) fn test_logic<C, S, A>(
    mut constraint: C,
    size: u8,
    expected: LogicResult,
    message_contains: &str,
    setup: S,
    after: A,
) where
    C: Constraint,
    S: FnOnce(&mut Board),
    A: FnOnce(&Board),
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut board = Board::new(size);
    constraint.init_candidates(&mut board);
    setup(&mut board);

    let mut log = StepLog::new();
    let result = constraint.step_logic(&mut board, Some(&mut log), false);
    assert_eq!(result, expected, "log: {log:?}");

    if !message_contains.is_empty() {
        assert!(
            !log.is_empty(),
            "expected a logged step containing {message_contains:?}"
        );
        assert!(
            log[0].description().contains(message_contains),
            "message was actually {:?}",
            log[0].description()
        );
    }
    after(&board);
}
