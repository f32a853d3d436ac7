//! Repetition history owned by a game session.

use std::collections::HashMap;

use crate::Board;

/// Occurrence counts of position signatures seen in one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionHistory {
    counts: HashMap<u64, u32>,
}

impl RepetitionHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `board` and returns its new count.
    pub fn record(&mut self, board: &Board) -> u32 {
        let count = self.counts.entry(board.signature()).or_insert(0);
        *count += 1;
        *count
    }

    /// Returns how many times `board` has been recorded.
    pub fn count(&self, board: &Board) -> u32 {
        self.counts.get(&board.signature()).copied().unwrap_or(0)
    }

    /// Forgets every recorded position.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Returns the number of distinct positions recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
