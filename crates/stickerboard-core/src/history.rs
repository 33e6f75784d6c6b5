//! Snapshot-based undo/redo history.
//!
//! History is a linear sequence of document snapshots with a cursor pointing
//! at the snapshot that matches the live document. Committing after an undo
//! discards everything past the cursor, so there is never more than one redo
//! branch.

use crate::document::Document;

/// Maximum number of snapshots to keep by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// An immutable copy of a document at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    document: Document,
}

impl Snapshot {
    fn capture(document: &Document) -> Self {
        Self { document: document.clone() }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Bounded linear undo/redo history.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    /// Index of the current snapshot; meaningless while `snapshots` is empty.
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history retaining at most `limit` snapshots.
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record `document` as the newest snapshot, dropping any redo branch.
    pub fn commit(&mut self, document: &Document) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(Snapshot::capture(document));

        // Limit history size
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;

        log::debug!(
            "history commit: {} snapshot(s), cursor {}",
            self.snapshots.len(),
            self.cursor
        );
    }

    /// Step back one snapshot. Returns the document to restore, or `None`
    /// when already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("undo: cursor {}", self.cursor);
        self.current()
    }

    /// Step forward one snapshot. Returns the document to restore, or `None`
    /// when already at the newest snapshot.
    pub fn redo(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("redo: cursor {}", self.cursor);
        self.current()
    }

    /// Drop all snapshots and start over with `document` as the only one.
    pub fn reset(&mut self, document: &Document) {
        self.snapshots.clear();
        self.commit(document);
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&Document> {
        self.snapshots.get(self.cursor).map(Snapshot::document)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Cursor position, or `None` when history is empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then_some(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementContent, Geometry};

    /// Documents that differ by element count, so snapshots are distinguishable.
    fn doc_with(n: usize) -> Document {
        let mut doc = Document::new();
        for _ in 0..n {
            doc.add_element(ElementContent::Emoji("⭐".into()), Geometry::default());
        }
        doc
    }

    #[test]
    fn test_empty_history_is_inert() {
        let mut history = History::default();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), None);
        assert!(history.current().is_none());
    }

    #[test]
    fn test_undo_at_first_snapshot_is_noop() {
        let mut history = History::default();
        history.commit(&doc_with(1));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let docs: Vec<_> = (0..4).map(doc_with).collect();
        let mut history = History::default();
        for doc in &docs {
            history.commit(doc);
        }

        assert_eq!(history.undo(), Some(&docs[2]));
        assert_eq!(history.undo(), Some(&docs[1]));
        assert_eq!(history.redo(), Some(&docs[2]));
        assert_eq!(history.redo(), Some(&docs[3]));
        assert!(history.redo().is_none());
        assert_eq!(history.current(), Some(&docs[3]));
    }

    #[test]
    fn test_commit_truncates_redo_branch() {
        let docs: Vec<_> = (0..5).map(doc_with).collect();
        let mut history = History::default();
        for doc in &docs[..4] {
            history.commit(doc);
        }

        history.undo();
        history.undo();
        history.commit(&docs[4]);

        let kept: Vec<_> = history.snapshots().iter().map(|s| s.document().clone()).collect();
        assert_eq!(kept, vec![docs[0].clone(), docs[1].clone(), docs[4].clone()]);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_snapshots_are_independent_of_live_document() {
        let mut live = doc_with(1);
        let mut history = History::default();
        history.commit(&live);

        live.reset();
        assert_eq!(history.current().map(Document::len), Some(1));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.commit(&doc_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.snapshots()[0].document().len(), 2);

        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().map(Document::len), Some(2));
    }

    #[test]
    fn test_reset_seeds_single_snapshot() {
        let mut history = History::default();
        for n in 0..3 {
            history.commit(&doc_with(n));
        }
        history.reset(&Document::new());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
