use gridlock_core::ClearResult;

/// The three-valued outcome of a propagation step.
///
/// Every `init_candidates`/`step_logic` call returns exactly one of these.
/// [`Invalid`](Self::Invalid) takes priority over any partial eliminations
/// computed in the same call: a step returning `Invalid` does not present
/// its eliminations as safely applied, since the whole board state is void
/// for that branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LogicResult {
    /// No candidates changed and nothing is proven inconsistent; the driver
    /// should try the next constraint or rule.
    None,
    /// At least one candidate was removed or a cell was solved; the driver
    /// must run another full pass, since the change may unlock further
    /// deductions elsewhere.
    Changed,
    /// The current board admits no legal completion under this constraint;
    /// propagation must stop, and the puzzle or search branch is rejected.
    Invalid,
}

impl LogicResult {
    /// Converts a did-anything-change flag into `Changed`/`None`.
    #[must_use]
    pub const fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::None }
    }
}

impl From<ClearResult> for LogicResult {
    fn from(result: ClearResult) -> Self {
        match result {
            ClearResult::Unchanged => Self::None,
            ClearResult::Changed => Self::Changed,
            ClearResult::Emptied => Self::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_changed() {
        assert_eq!(LogicResult::from_changed(true), LogicResult::Changed);
        assert_eq!(LogicResult::from_changed(false), LogicResult::None);
    }

    #[test]
    fn test_from_clear_result() {
        assert_eq!(LogicResult::from(ClearResult::Unchanged), LogicResult::None);
        assert_eq!(LogicResult::from(ClearResult::Changed), LogicResult::Changed);
        assert_eq!(LogicResult::from(ClearResult::Emptied), LogicResult::Invalid);
    }
}
