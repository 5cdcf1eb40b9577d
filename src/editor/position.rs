//! Cursor location in data coordinates.
//!
//! Only `(data_y, data_x)` and the sticky column are stored. Screen
//! coordinates are derived from the document and viewport every time they are
//! asked for, so edits and tab width changes can't leave them stale.

use super::coords;
use super::document::Document;
use super::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line index.
    pub data_y: usize,
    /// Rune index within the line; `len` is the end-of-line position.
    pub data_x: usize,
    /// Screen column that vertical movement tries to land on.
    pub saved_x: usize,
}

impl Position {
    pub fn new(data_y: usize, data_x: usize) -> Self {
        Self {
            data_y,
            data_x,
            saved_x: data_x,
        }
    }

    // ─── Projection ──────────────────────────────────────────────────────

    pub fn screen_x(&self, doc: &Document, tab_width: usize) -> usize {
        coords::screen_x(doc.runes(self.data_y), self.data_x, tab_width)
    }

    /// Screen row relative to the viewport. Only meaningful while the line is
    /// visible; see [`Viewport::row_of`].
    pub fn screen_y(&self, view: &Viewport) -> usize {
        self.data_y.saturating_sub(view.offset())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn at_start_of_line(&self) -> bool {
        self.data_x == 0
    }

    pub fn at_start_of_text(&self, doc: &Document) -> bool {
        self.data_x == doc.start_of_text(self.data_y)
    }

    /// True when only indentation lies before the cursor.
    pub fn at_or_before_start_of_text(&self, doc: &Document) -> bool {
        self.data_x <= doc.start_of_text(self.data_y)
    }

    pub fn at_end_of_line(&self, doc: &Document) -> bool {
        self.data_x == doc.line_len(self.data_y)
    }

    pub fn at_or_after_end_of_line(&self, doc: &Document) -> bool {
        self.data_x >= doc.line_len(self.data_y)
    }

    /// True when the cursor sits past the last rune's end position, which
    /// happens after the line under it shrank.
    pub fn after_line_contents(&self, doc: &Document) -> bool {
        self.data_x > doc.line_len(self.data_y)
    }

    pub fn at_last_line(&self, doc: &Document) -> bool {
        self.data_y >= doc.last_index()
    }

    // ─── Horizontal movement ─────────────────────────────────────────────

    /// One rune left. Never wraps to the previous line.
    pub fn prev(&mut self) -> bool {
        if self.data_x == 0 {
            return false;
        }
        self.data_x -= 1;
        true
    }

    /// One rune right, up to `limit`. Never wraps to the next line.
    pub fn next(&mut self, limit: usize) -> bool {
        if self.data_x >= limit {
            return false;
        }
        self.data_x += 1;
        true
    }

    /// Start of line.
    pub fn home(&mut self) {
        self.data_x = 0;
    }

    /// One past the last rune.
    pub fn end(&mut self, doc: &Document) {
        self.data_x = doc.line_len(self.data_y);
    }

    pub fn go_to_start_of_text(&mut self, doc: &Document) {
        self.data_x = doc.start_of_text(self.data_y);
    }

    /// Start of text, or start of line when already at start of text.
    pub fn smart_home(&mut self, doc: &Document) {
        if self.at_start_of_text(doc) {
            self.home();
        } else {
            self.go_to_start_of_text(doc);
        }
    }

    // ─── Vertical movement ───────────────────────────────────────────────

    /// Remembers the current screen column for the next up/down.
    pub fn save_x(&mut self, doc: &Document, tab_width: usize) {
        self.saved_x = self.screen_x(doc, tab_width);
    }

    /// Moves to the rune under the saved screen column on the current line.
    pub fn land_on_saved_x(&mut self, doc: &Document, tab_width: usize) {
        self.data_x = coords::data_x_at(doc.runes(self.data_y), self.saved_x, tab_width);
    }

    pub fn up(&mut self) -> bool {
        if self.data_y == 0 {
            return false;
        }
        self.data_y -= 1;
        true
    }

    pub fn down(&mut self, doc: &Document) -> bool {
        if self.at_last_line(doc) {
            return false;
        }
        self.data_y += 1;
        true
    }

    // ─── Normalising ─────────────────────────────────────────────────────

    /// Pulls a cursor that is past the end of its line back to the end.
    pub fn snap_to_end(&mut self, doc: &Document) -> bool {
        if self.after_line_contents(doc) {
            self.end(doc);
            true
        } else {
            false
        }
    }

    /// Brings both coordinates back inside the document.
    pub fn clamp(&mut self, doc: &Document) {
        self.data_y = doc.clamp_y(self.data_y);
        self.snap_to_end(doc);
    }
}
