//! Per-room drawing history with a single global undo cursor
//!
//! Operations live in exactly one of two stacks: `history` (what is on the
//! canvas) or `redo_stack` (undone but still recoverable). Any forward
//! edit or clear empties the redo stack.

use crate::core::operation::{Operation, OperationKind};

/// Ordered record of a room's committed and undone operations
#[derive(Debug, Default)]
pub struct OperationLog {
    history: Vec<Operation>,
    redo_stack: Vec<Operation>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new edit at the end of the history.
    ///
    /// Returns the stamped operation so it can be broadcast.
    pub fn append(&mut self, author_id: &str, kind: OperationKind) -> Operation {
        let op = Operation::new(author_id.to_string(), kind);
        self.history.push(op.clone());
        self.redo_stack.clear();
        op
    }

    /// Move the last committed operation onto the redo stack
    pub fn undo(&mut self) -> Option<Operation> {
        let op = self.history.pop()?;
        self.redo_stack.push(op.clone());
        Some(op)
    }

    /// Move the most recently undone operation back to the end of the history
    pub fn redo(&mut self) -> Option<Operation> {
        let op = self.redo_stack.pop()?;
        self.history.push(op.clone());
        Some(op)
    }

    /// Drop everything. Cleared operations cannot be redone.
    pub fn clear(&mut self) {
        self.history.clear();
        self.redo_stack.clear();
    }

    /// Copy of the committed history, oldest first
    pub fn snapshot(&self) -> Vec<Operation> {
        self.history.clone()
    }

    /// Replace the history wholesale, e.g. when restoring a saved session
    pub fn replace(&mut self, history: Vec<Operation>) {
        self.history = history;
        self.redo_stack.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operation::{Point, StrokeData};

    fn stroke(color: &str) -> OperationKind {
        OperationKind::Stroke(StrokeData {
            color: color.to_string(),
            width: 2,
            points: vec![Point { x: 0.0, y: 0.0 }, Point { x: 5.0, y: 5.0 }],
        })
    }

    fn ids(ops: &[Operation]) -> Vec<uuid::Uuid> {
        ops.iter().map(|op| op.id).collect()
    }

    #[test]
    fn test_appends_grow_history_and_clear_redo() {
        let mut log = OperationLog::new();
        for i in 0..5 {
            log.append("user1", stroke(&format!("#00000{}", i)));
            assert_eq!(log.len(), i + 1);
            assert_eq!(log.redo_len(), 0);
        }
    }

    #[test]
    fn test_undo_then_redo_restores_history() {
        let mut log = OperationLog::new();
        log.append("user1", stroke("red"));
        log.append("user2", stroke("blue"));
        let before = ids(&log.snapshot());

        let undone = log.undo().unwrap();
        let redone = log.redo().unwrap();

        assert_eq!(undone.id, redone.id);
        assert_eq!(ids(&log.snapshot()), before);
        assert_eq!(log.redo_len(), 0);
    }

    #[test]
    fn test_append_after_undo_discards_redo() {
        let mut log = OperationLog::new();
        log.append("user1", stroke("red"));
        log.undo();
        log.append("user1", stroke("blue"));
        assert!(log.redo().is_none());
    }

    #[test]
    fn test_clear_is_not_recoverable() {
        let mut log = OperationLog::new();
        log.append("user1", stroke("red"));
        log.append("user1", stroke("green"));
        log.undo();
        log.clear();

        assert!(log.is_empty());
        assert!(log.redo().is_none());
        assert!(log.undo().is_none());
    }

    #[test]
    fn test_empty_log_is_noop() {
        let mut log = OperationLog::new();
        assert!(log.undo().is_none());
        assert!(log.redo().is_none());
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn test_undo_append_redo_scenario() {
        let mut log = OperationLog::new();
        let a = log.append("user1", stroke("a"));
        let b = log.append("user1", stroke("b"));
        let c = log.append("user2", stroke("c"));
        assert_eq!(ids(&log.snapshot()), vec![a.id, b.id, c.id]);

        let undone = log.undo().unwrap();
        assert_eq!(undone.id, c.id);
        assert_eq!(ids(&log.snapshot()), vec![a.id, b.id]);
        assert_eq!(log.redo_len(), 1);

        let d = log.append("user2", stroke("d"));
        assert_eq!(ids(&log.snapshot()), vec![a.id, b.id, d.id]);
        assert_eq!(log.redo_len(), 0);

        assert!(log.redo().is_none());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_redo_goes_to_current_end() {
        let mut log = OperationLog::new();
        let a = log.append("user1", stroke("a"));
        let b = log.append("user1", stroke("b"));
        log.undo();
        log.undo();
        log.redo();
        // a is back, b still on the redo stack
        assert_eq!(ids(&log.snapshot()), vec![a.id]);
        log.redo();
        assert_eq!(ids(&log.snapshot()), vec![a.id, b.id]);
    }

    #[test]
    fn test_replace_resets_redo() {
        let mut log = OperationLog::new();
        let kept = log.append("user1", stroke("a"));
        log.append("user1", stroke("b"));
        log.undo();

        log.replace(vec![kept.clone()]);
        assert_eq!(ids(&log.snapshot()), vec![kept.id]);
        assert_eq!(log.redo_len(), 0);
    }
}
