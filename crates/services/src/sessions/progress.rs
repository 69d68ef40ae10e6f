/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub position: usize,
    pub is_last: bool,
}

impl SessionProgress {
    /// One-based question number for display.
    #[must_use]
    pub fn display_position(&self) -> usize {
        self.position + 1
    }

    /// Share of the way through the set, in whole percent.
    #[must_use]
    pub fn percent_through(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.position + 1) * 100 / self.total;
        u32::try_from(pct.min(100)).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_through_counts_current_question() {
        let progress = SessionProgress {
            total: 4,
            answered: 0,
            position: 0,
            is_last: false,
        };
        assert_eq!(progress.display_position(), 1);
        assert_eq!(progress.percent_through(), 25);
    }
}
