use std::fmt;

/// How many collect/publish cycles remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationBudget {
    Unbounded,
    Remaining(u64),
}

impl IterationBudget {
    /// Map the CLI count: any negative value means unbounded, zero runs nothing.
    pub fn from_count(count: i64) -> Self {
        if count < 0 {
            IterationBudget::Unbounded
        } else {
            IterationBudget::Remaining(count as u64)
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, IterationBudget::Remaining(0))
    }

    /// Record one completed iteration. Unbounded budgets never change.
    pub fn consume(&mut self) {
        if let IterationBudget::Remaining(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

impl fmt::Display for IterationBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationBudget::Unbounded => f.write_str("unbounded"),
            IterationBudget::Remaining(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_count_is_unbounded() {
        assert_eq!(IterationBudget::from_count(-1), IterationBudget::Unbounded);
        assert_eq!(IterationBudget::from_count(-7), IterationBudget::Unbounded);
    }

    #[test]
    fn test_countdown_reaches_exhaustion() {
        let mut budget = IterationBudget::from_count(2);
        assert!(!budget.is_exhausted());
        budget.consume();
        assert_eq!(budget, IterationBudget::Remaining(1));
        budget.consume();
        assert!(budget.is_exhausted());
        budget.consume();
        assert_eq!(budget, IterationBudget::Remaining(0));
    }

    #[test]
    fn test_unbounded_never_exhausts() {
        let mut budget = IterationBudget::Unbounded;
        for _ in 0..10_000 {
            budget.consume();
        }
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn test_zero_count_starts_exhausted() {
        assert!(IterationBudget::from_count(0).is_exhausted());
    }
}
