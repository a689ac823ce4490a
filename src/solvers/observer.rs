//! Search Observer

/// Observer trait for watching the exhaustive search as it runs.
///
/// Callbacks receive borrowed piece counts (largest size first) for the
/// branch being visited, so observers that ignore them cost nothing beyond
/// the call.
pub trait SearchObserver {
    /// Called for every exact combination found.
    fn on_candidate(&mut self, _pieces: &[u64]) {}

    /// Called when a candidate replaces the incumbent best.
    fn on_improvement(&mut self, _pieces: &[u64]) {}

    /// Called when a branch runs out of sizes with a non-zero remainder.
    fn on_dead_end(&mut self, _remaining_units: u64) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that counts search events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Exact combinations visited
    pub candidates: u64,

    /// Times the incumbent was replaced
    pub improvements: u64,

    /// Leaves discarded with a non-zero remainder
    pub dead_ends: u64,
}

impl SearchStats {
    /// Leaves visited, exact or not.
    pub fn leaves(&self) -> u64 {
        self.candidates.saturating_add(self.dead_ends)
    }

    /// Accumulate the counts from another search.
    pub fn merge(&mut self, other: &SearchStats) {
        self.candidates = self.candidates.saturating_add(other.candidates);
        self.improvements = self.improvements.saturating_add(other.improvements);
        self.dead_ends = self.dead_ends.saturating_add(other.dead_ends);
    }
}

impl SearchObserver for SearchStats {
    fn on_candidate(&mut self, _pieces: &[u64]) {
        self.candidates = self.candidates.saturating_add(1);
    }

    fn on_improvement(&mut self, _pieces: &[u64]) {
        self.improvements = self.improvements.saturating_add(1);
    }

    fn on_dead_end(&mut self, _remaining_units: u64) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }
}
