//! Bounded snapshot history for undo/redo.
//!
//! Undo is snapshot-based: every mutating operation records a deep copy of
//! the document's observable state before the change. Two bounded stacks
//! hold past and future states; any new edit after an undo discards the
//! redo branch.

use tabula_engine::engine::Sheet;

/// Maximum number of undo entries to keep.
pub(crate) const MAX_HISTORY: usize = 50;

/// A deep copy of everything undo restores: the grid, the selection
/// anchor, and the layout metrics. Snapshots own all nested data and never
/// alias live state or each other.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub sheet: Sheet,
    pub selected_row: usize,
    pub selected_col: usize,
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
}

/// Bounded undo/redo stacks of whole-document snapshots.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Record a snapshot taken before a mutation.
    ///
    /// A snapshot structurally identical to the most recent entry is
    /// discarded, so operations that end up changing nothing leave history
    /// untouched. An accepted push clears the redo branch and evicts the
    /// oldest entry once the cap is exceeded.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.past.last() == Some(&snapshot) {
            return;
        }
        self.past.push(snapshot);
        if self.past.len() > MAX_HISTORY {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Step back: store `current` for redo and return the snapshot to
    /// restore, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward after an undo. `current` goes back onto the past stack.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.past.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{History, MAX_HISTORY, Snapshot};
    use tabula_engine::engine::Sheet;

    fn snapshot_with(selected_row: usize) -> Snapshot {
        Snapshot {
            sheet: Sheet::new(2, 2),
            selected_row,
            selected_col: 0,
            column_widths: vec![96.0, 96.0],
            row_heights: vec![21.0, 21.0],
        }
    }

    #[test]
    fn test_push_deduplicates_identical_snapshots() {
        let mut history = History::new();
        history.push(snapshot_with(0));
        history.push(snapshot_with(0));
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn test_push_caps_depth_and_evicts_oldest() {
        let mut history = History::new();
        for i in 0..MAX_HISTORY + 10 {
            history.push(snapshot_with(i));
        }
        assert_eq!(history.depth(), MAX_HISTORY);

        // Undo all the way down: the oldest surviving entry must be the
        // 11th push, the first ten having been evicted.
        let mut last = None;
        let current = snapshot_with(usize::MAX);
        let mut cursor = current;
        while let Some(snapshot) = history.undo(cursor.clone()) {
            last = Some(snapshot.clone());
            cursor = snapshot;
        }
        assert_eq!(last.map(|s| s.selected_row), Some(10));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new();
        history.push(snapshot_with(0));

        let restored = history.undo(snapshot_with(1)).unwrap();
        assert_eq!(restored.selected_row, 0);
        assert!(history.can_redo());

        let replayed = history.redo(restored).unwrap();
        assert_eq!(replayed.selected_row, 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut history = History::new();
        assert!(history.undo(snapshot_with(0)).is_none());
        // The rejected undo must not seed the redo branch.
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_push_clears_redo_branch() {
        let mut history = History::new();
        history.push(snapshot_with(0));
        let restored = history.undo(snapshot_with(1)).unwrap();
        assert!(history.can_redo());

        history.push(restored);
        history.push(snapshot_with(2));
        assert!(!history.can_redo());
        assert!(history.redo(snapshot_with(3)).is_none());
    }
}
