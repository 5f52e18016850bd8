//! Linear undo/redo history over simulation snapshots
//!
//! The cursor always indexes the snapshot currently materialized into the
//! live state (None while empty). Pushing while rewound discards the
//! abandoned redo branch. Capacity is unbounded; sessions are short-lived
//! and snapshots are small.

use super::state::SimState;

#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    snapshots: Vec<SimState>,
    cursor: Option<usize>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts. An out-of-range cursor is clamped to
    /// the last snapshot rather than rejected.
    pub(crate) fn from_parts(snapshots: Vec<SimState>, cursor: usize) -> Self {
        if snapshots.is_empty() {
            return Self::new();
        }
        let cursor = cursor.min(snapshots.len() - 1);
        Self {
            snapshots,
            cursor: Some(cursor),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn snapshots(&self) -> &[SimState] {
        &self.snapshots
    }

    /// The snapshot currently materialized into the live state
    pub fn current(&self) -> Option<&SimState> {
        self.snapshots.get(self.cursor?)
    }

    /// Append a snapshot, discarding any redo branch beyond the cursor
    pub fn push(&mut self, state: SimState) {
        match self.cursor {
            Some(c) => self.snapshots.truncate(c + 1),
            None => self.snapshots.clear(),
        }
        self.snapshots.push(state);
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step the cursor back and return the snapshot to materialize, or
    /// None at the lower bound
    pub fn undo(&mut self) -> Option<&SimState> {
        let c = self.cursor?;
        if c == 0 {
            return None;
        }
        self.cursor = Some(c - 1);
        self.snapshots.get(c - 1)
    }

    /// Step the cursor forward and return the snapshot to materialize, or
    /// None at the upper bound
    pub fn redo(&mut self) -> Option<&SimState> {
        let c = self.cursor?;
        if c + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(c + 1);
        self.snapshots.get(c + 1)
    }

    /// Drop everything and start over from a single fresh snapshot
    pub fn reset(&mut self, state: SimState) {
        self.snapshots.clear();
        self.snapshots.push(state);
        self.cursor = Some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(next_weight: u8) -> SimState {
        SimState::new(640.0, next_weight)
    }

    #[test]
    fn test_empty_history() {
        let mut h = HistoryManager::new();
        assert!(h.is_empty());
        assert_eq!(h.cursor(), None);
        assert!(h.current().is_none());
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut h = HistoryManager::new();
        h.push(snap(1));
        h.push(snap(2));
        assert_eq!(h.len(), 2);
        assert_eq!(h.cursor(), Some(1));
        assert_eq!(h.current().unwrap().next_weight, 2);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut h = HistoryManager::new();
        h.push(snap(1));
        h.push(snap(2));

        let undone = h.undo().cloned().unwrap();
        assert_eq!(undone.next_weight, 1);
        assert_eq!(h.cursor(), Some(0));

        let redone = h.redo().cloned().unwrap();
        assert_eq!(redone.next_weight, 2);
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn test_undo_stops_at_first_snapshot() {
        let mut h = HistoryManager::new();
        h.push(snap(1));
        assert!(h.undo().is_none());
        assert_eq!(h.cursor(), Some(0));
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut h = HistoryManager::new();
        h.push(snap(1));
        h.push(snap(2));
        h.undo();
        h.push(snap(3));

        assert_eq!(h.len(), 2);
        assert_eq!(h.cursor(), Some(1));
        assert_eq!(h.snapshots()[0].next_weight, 1);
        assert_eq!(h.snapshots()[1].next_weight, 3);
        assert!(h.redo().is_none());
    }

    #[test]
    fn test_reset_leaves_single_snapshot() {
        let mut h = HistoryManager::new();
        h.push(snap(1));
        h.push(snap(2));
        h.reset(snap(9));
        assert_eq!(h.len(), 1);
        assert_eq!(h.cursor(), Some(0));
        assert_eq!(h.current().unwrap().next_weight, 9);
    }

    #[test]
    fn test_from_parts_clamps_cursor() {
        let h = HistoryManager::from_parts(vec![snap(1), snap(2)], 7);
        assert_eq!(h.cursor(), Some(1));
        let empty = HistoryManager::from_parts(Vec::new(), 3);
        assert!(empty.is_empty());
        assert_eq!(empty.cursor(), None);
    }
}
