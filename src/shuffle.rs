use crate::model::Direction;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Randomized walk order over the indices of one entry list.
///
/// The cursor never wraps: stepping past either end is rejected and the
/// cursor keeps its position. Callers must [`reshuffle`](Self::reshuffle)
/// whenever the entry count changes; the sequencer does not detect stale
/// indices on its own.
#[derive(Debug)]
pub struct ShuffleSequencer {
    order: Vec<usize>,
    cursor: usize,
    rng: SmallRng,
}

impl ShuffleSequencer {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            order: Vec::new(),
            cursor: 0,
            rng,
        }
    }

    /// Replaces the permutation with a fresh uniform shuffle of `[0, n)` and
    /// puts the cursor back at the start.
    pub fn reshuffle(&mut self, n: usize) {
        self.order = (0..n).collect();
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    /// Moves the cursor one step and returns the entry index now under it.
    /// A step past either end is rejected: the cursor stays where it was and
    /// `None` comes back.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let next = match direction {
            Direction::Forward => self.cursor.checked_add(1),
            Direction::Back => self.cursor.checked_sub(1),
        }?;
        if next >= self.order.len() {
            return None;
        }
        self.cursor = next;
        Some(self.order[next])
    }

    /// Entry index under the cursor, if the permutation is non-empty.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for ShuffleSequencer {
    fn default() -> Self {
        Self::new()
    }
}
