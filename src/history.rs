// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::collections::VecDeque;

/// Bounded undo/redo stacks of whole-state snapshots.
///
/// The caller records the state *before* each mutation. `undo` and `redo` trade the current
/// state for the neighbouring one in the timeline. Both stacks hold at most `limit` entries;
/// when a push would exceed that, the oldest entry is dropped.
#[derive(Clone, Debug)]
pub struct History<T> {
    past: VecDeque<T>,
    future: VecDeque<T>,
    limit: usize,
}

impl<T> History<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            limit,
        }
    }

    /// Records the state a mutation is about to replace. Any redo steps are lost.
    pub fn record(&mut self, state: T) {
        push_bounded(&mut self.past, state, self.limit);
        self.future.clear();
    }

    /// Returns the previous state, remembering `current` for redo. `None` if there is
    /// nothing to undo, in which case `current` is dropped.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        push_bounded(&mut self.future, current, self.limit);
        Some(previous)
    }

    /// Returns the next state, remembering `current` for undo. `None` if there is nothing
    /// to redo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.future.pop_back()?;
        push_bounded(&mut self.past, current, self.limit);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

fn push_bounded<T>(stack: &mut VecDeque<T>, state: T, limit: usize) {
    if limit == 0 {
        return;
    }
    stack.push_back(state);
    while stack.len() > limit {
        stack.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_then_redo_walks_the_timeline() {
        let mut history = History::new(10);
        history.record(0);
        history.record(1);

        assert_eq!(history.undo(2), Some(1));
        assert_eq!(history.undo(1), Some(0));
        assert_eq!(history.undo(0), None);
        assert_eq!(history.redo(0), Some(1));
        assert_eq!(history.redo(1), Some(2));
        assert_eq!(history.redo(2), None);
    }

    #[test]
    fn recording_discards_redo_steps() {
        let mut history = History::new(10);
        history.record("a");
        assert_eq!(history.undo("b"), Some("a"));
        assert!(history.can_redo());

        history.record("a");
        assert!(!history.can_redo());
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut history = History::new(3);
        for state in 0..10 {
            history.record(state);
        }
        assert_eq!(history.past_len(), 3);
        assert_eq!(history.undo(10), Some(9));
        assert_eq!(history.undo(9), Some(8));
        assert_eq!(history.undo(8), Some(7));
        assert_eq!(history.undo(7), None);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = History::new(0);
        history.record(1);
        assert!(!history.can_undo());
    }
}

// End of File
