/// Errors raised while constructing a constraint from its geometry.
///
/// Configuration errors fail fast, synchronously, at construction time;
/// they are never downgraded to a runtime
/// [`LogicResult`](crate::LogicResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeometryError {
    /// The geometry supplied the wrong number of cell groups.
    #[display("{name} constraint expects {expected} cell group(s), got {got}")]
    WrongGroupCount {
        /// Display name of the constraint kind.
        name: &'static str,
        /// Number of cell groups the constraint requires.
        expected: usize,
        /// Number of cell groups supplied.
        got: usize,
    },
    /// A cell group is too small for its role.
    #[display("{name} constraint expects at least {min} cell(s) in its {role} group, got {got}")]
    TooFewCells {
        /// Display name of the constraint kind.
        name: &'static str,
        /// Role of the undersized group, e.g. `"circle"`.
        role: &'static str,
        /// Minimum number of cells the role requires.
        min: usize,
        /// Number of cells supplied.
        got: usize,
    },
    /// Cell groups that must be disjoint overlap.
    #[display("{name} constraint requires disjoint cell groups")]
    OverlappingGroups {
        /// Display name of the constraint kind.
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_counts() {
        let error = GeometryError::WrongGroupCount {
            name: "Lockout Line",
            expected: 1,
            got: 2,
        };
        assert_eq!(
            error.to_string(),
            "Lockout Line constraint expects 1 cell group(s), got 2"
        );
    }
}
