//! Bounded undo history of whole-editor snapshots.

use std::collections::VecDeque;

use super::document::Document;
use super::position::Position;
use super::Editor;
use crate::{Error, Result};

/// Document, cursor and scroll offset as they were before one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub doc: Document,
    pub pos: Position,
    pub offset: usize,
}

/// Ring of snapshots. Pushing past capacity drops the oldest entry.
#[derive(Debug)]
pub struct Undo {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for Undo {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Undo {
    pub const DEFAULT_CAPACITY: usize = 8192;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Records the editor's current state.
    pub fn snapshot(&mut self, ed: &Editor) {
        self.push(ed.snapshot());
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Puts the most recent snapshot back into the editor.
    pub fn restore(&mut self, ed: &mut Editor) -> Result<()> {
        let snapshot = self.pop().ok_or(Error::NoHistory)?;
        ed.restore(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Mode;

    fn marker(n: usize) -> Snapshot {
        Snapshot {
            doc: Document::from_text(&n.to_string()),
            pos: Position::default(),
            offset: 0,
        }
    }

    #[test]
    fn pops_most_recent_first() {
        let mut undo = Undo::default();
        undo.push(marker(1));
        undo.push(marker(2));
        assert_eq!(undo.pop(), Some(marker(2)));
        assert_eq!(undo.pop(), Some(marker(1)));
        assert_eq!(undo.pop(), None);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut undo = Undo::default();
        for n in 0..=Undo::DEFAULT_CAPACITY {
            undo.push(marker(n));
        }
        assert_eq!(undo.len(), Undo::DEFAULT_CAPACITY);
        let mut last = None;
        while let Some(s) = undo.pop() {
            last = Some(s);
        }
        // entry 0 was dropped; entry 1 is now the oldest
        assert_eq!(last, Some(marker(1)));
    }

    #[test]
    fn restore_on_empty_history_fails() {
        let mut undo = Undo::new(4);
        let mut ed = Editor::new(Document::from_text("x"), Mode::Text, 4, 10);
        assert!(matches!(undo.restore(&mut ed), Err(Error::NoHistory)));
        assert_eq!(ed.doc().line(0), "x");
    }

    #[test]
    fn restore_undoes_one_edit() {
        let mut undo = Undo::new(4);
        let mut ed = Editor::new(Document::from_text("abc"), Mode::Text, 4, 10);
        ed.end();
        undo.snapshot(&ed);
        ed.type_rune('d');
        undo.snapshot(&ed);
        ed.return_key();
        undo.restore(&mut ed).unwrap();
        assert_eq!(ed.doc().line(0), "abcd");
        assert_eq!(ed.data_x(), 4);
        undo.restore(&mut ed).unwrap();
        assert_eq!(ed.doc().line(0), "abc");
        assert!(undo.is_empty());
    }

    #[test]
    fn restore_brings_back_the_scroll_offset() {
        let text: String = (1..=30).map(|i| format!("line {i:02}\n")).collect();
        let mut undo = Undo::default();
        let mut ed = Editor::new(Document::from_text(&text), Mode::Text, 4, 10);
        ed.set_position(9, 7);
        let before = (ed.data_y(), ed.data_x(), ed.screen_y(), ed.view().offset());
        assert_eq!(before, (9, 7, 9, 0));

        undo.snapshot(&ed);
        ed.return_key();
        ed.follow_cursor();
        assert_eq!(ed.view().offset(), 1);

        undo.restore(&mut ed).unwrap();
        let after = (ed.data_y(), ed.data_x(), ed.screen_y(), ed.view().offset());
        assert_eq!(after, before);
    }
}
