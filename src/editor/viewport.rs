//! The visible window into the document.
//!
//! `offset` is the data line shown on the first screen row. Scrolling is
//! clamped to `[0, len - height]` and reports whether anything moved; it
//! never touches the cursor. Callers pair it with cursor movement themselves.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    offset: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            offset: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Largest offset that still fills the screen.
    pub fn max_offset(&self, doc_len: usize) -> usize {
        doc_len.saturating_sub(self.height)
    }

    /// Scrolls `n` lines towards the end. False means the end was already
    /// reached.
    pub fn scroll_down(&mut self, n: usize, doc_len: usize) -> bool {
        let target = self.offset.saturating_add(n).min(self.max_offset(doc_len));
        self.move_to(target)
    }

    /// Scrolls `n` lines towards the start. False means the top was already
    /// shown.
    pub fn scroll_up(&mut self, n: usize, doc_len: usize) -> bool {
        // an offset left too far down by a deleted tail is pulled back first
        let start = self.offset.min(self.max_offset(doc_len));
        let target = start.saturating_sub(n);
        self.move_to(target)
    }

    /// Jumps to `offset`, clamped like every other scroll.
    pub fn scroll_to(&mut self, offset: usize, doc_len: usize) -> bool {
        let target = offset.min(self.max_offset(doc_len));
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> bool {
        let changed = target != self.offset;
        self.offset = target;
        changed
    }

    /// Screen row of data line `y`, if it is on screen.
    pub fn row_of(&self, y: usize) -> Option<usize> {
        y.checked_sub(self.offset).filter(|row| *row < self.height)
    }

    /// Data lines currently on screen.
    pub fn visible(&self, doc_len: usize) -> Range<usize> {
        let start = self.offset.min(doc_len);
        start..(self.offset + self.height).min(doc_len)
    }

    /// Scrolls just enough to put line `y` on screen.
    pub fn follow(&mut self, y: usize, doc_len: usize) -> bool {
        if y < self.offset {
            self.scroll_up(self.offset - y, doc_len)
        } else if y >= self.offset + self.height {
            self.scroll_down(y + 1 - self.height - self.offset, doc_len)
        } else {
            false
        }
    }

    /// Puts line `y` in the middle of the screen, as far as the clamp allows.
    pub fn center_on(&mut self, y: usize, doc_len: usize) -> bool {
        let target = y.saturating_sub(self.height / 2).min(self.max_offset(doc_len));
        self.move_to(target)
    }

    /// Applies a new screen height and re-clamps the offset.
    pub fn resize(&mut self, height: usize, doc_len: usize) -> bool {
        self.height = height.max(1);
        let target = self.offset.min(self.max_offset(doc_len));
        self.move_to(target)
    }
}
