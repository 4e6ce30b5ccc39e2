use std::fmt;

/// Accuracy derived from the runner's counters; holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn new(correct: usize, total: usize) -> Self {
        debug_assert!(correct <= total);
        Self { correct, total }
    }

    /// Whole percent, rounded half up. `None` before the first response.
    pub fn percent(&self) -> Option<usize> {
        (self.total > 0).then(|| (200 * self.correct + self.total) / (2 * self.total))
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "Accuracy: {}% ({}/{})", pct, self.correct, self.total),
            None => f.write_str("Accuracy: —"),
        }
    }
}
