//! Mode-specific edit semantics.
//!
//! Text mode inserts and shifts; draw mode overwrites cells in place. Each
//! mode is one [`EditOps`] implementation, picked once through [`Mode::ops`],
//! so no operation has to branch on the mode itself.

use super::document::Document;
use super::position::Position;
use super::Editor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Variable-length lines with insert-and-shift editing.
    Text,
    /// Fixed-width rows of pixel cells with overwrite-in-place editing.
    Draw,
}

impl Mode {
    pub fn ops(self) -> &'static dyn EditOps {
        match self {
            Mode::Text => &TextOps,
            Mode::Draw => &DrawOps,
        }
    }
}

/// Edit operations over the editor's document and cursor. None of them
/// scroll; callers follow the cursor afterwards.
pub trait EditOps {
    /// Places `r` at the cursor.
    fn put_rune(&self, ed: &mut Editor, r: char);

    /// Places a run of runes starting at the cursor, leaving the cursor after
    /// them.
    fn put_str(&self, ed: &mut Editor, s: &str);

    /// A rune typed by the user. Text mode applies the closing-bracket dedent
    /// first.
    fn type_rune(&self, ed: &mut Editor, r: char) {
        self.put_rune(ed, r);
    }

    fn insert_tab(&self, ed: &mut Editor);
    fn return_key(&self, ed: &mut Editor);
    fn backspace(&self, ed: &mut Editor);

    /// Deletes the rune under the cursor.
    fn delete(&self, ed: &mut Editor);

    /// Deletes from the cursor to the end of the line.
    fn kill_line(&self, ed: &mut Editor);

    fn left(&self, ed: &mut Editor) -> bool;
    fn right(&self, ed: &mut Editor) -> bool;
    fn up(&self, ed: &mut Editor) -> bool;
    fn down(&self, ed: &mut Editor) -> bool;

    /// Picks the column after the cursor changed lines.
    fn land(&self, ed: &mut Editor);

    /// Restores the cursor invariants after an edit that bypassed the cursor.
    fn normalize(&self, ed: &mut Editor);
}

// ─── Text mode ───────────────────────────────────────────────────────────

/// The five ways a return key can go in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCase {
    /// Cursor at column 0: a blank line opens above, cursor stays with the text.
    OpenAboveAtStart,
    /// Only indentation before the cursor: a blank line opens above and the
    /// column is kept.
    OpenAboveKeepColumn,
    /// At the end of the last line: an indented line is appended.
    AppendAtEnd,
    /// At the end of any other line: an indented line is opened below.
    OpenBelow,
    /// Inside the text: the line is split at the cursor.
    Split,
}

impl ReturnCase {
    pub fn classify(doc: &Document, pos: &Position) -> Self {
        if pos.at_start_of_line() {
            Self::OpenAboveAtStart
        } else if pos.at_or_before_start_of_text(doc) {
            Self::OpenAboveKeepColumn
        } else if pos.at_or_after_end_of_line(doc) && pos.at_last_line(doc) {
            Self::AppendAtEnd
        } else if pos.at_or_after_end_of_line(doc) {
            Self::OpenBelow
        } else {
            Self::Split
        }
    }
}

/// Indentation for a line opened below `y`: the same leading whitespace, one
/// tab deeper after an opening bracket.
fn next_line_indent(doc: &Document, y: usize) -> String {
    let mut indent = doc.leading_whitespace(y);
    if matches!(doc.runes(y).last(), Some('(' | '{' | '[')) {
        indent.push('\t');
    }
    indent
}

#[derive(Debug)]
pub struct TextOps;

impl TextOps {
    /// On a blank, indented line, drops one indentation level before a
    /// closing bracket is typed: a tab, or up to one tab width of spaces.
    fn smart_dedent(ed: &mut Editor) {
        let y = ed.pos.data_y;
        if ed.pos.data_x == 0 || !ed.doc.is_blank_line(y) {
            return;
        }
        let mut indent = ed.doc.leading_whitespace(y);
        if indent.is_empty() {
            return;
        }
        if indent.ends_with('\t') {
            indent.pop();
        } else {
            let spaces = indent
                .chars()
                .rev()
                .take_while(|c| *c == ' ')
                .count()
                .min(ed.tab_width);
            indent.truncate(indent.len() - spaces);
        }
        ed.doc.set_line(y, &indent);
        ed.pos.end(&ed.doc);
    }
}

impl EditOps for TextOps {
    fn put_rune(&self, ed: &mut Editor, r: char) {
        ed.doc.insert_rune(ed.pos.data_y, ed.pos.data_x, r);
        ed.pos.data_x = (ed.pos.data_x + 1).min(ed.doc.line_len(ed.pos.data_y));
        ed.save_x();
    }

    fn put_str(&self, ed: &mut Editor, s: &str) {
        let x = ed.pos.data_x.min(ed.doc.line_len(ed.pos.data_y));
        let inserted = ed.doc.insert_str(ed.pos.data_y, x, s);
        ed.pos.data_x = x + inserted;
        ed.save_x();
    }

    fn type_rune(&self, ed: &mut Editor, r: char) {
        if matches!(r, '}' | ']' | ')') {
            Self::smart_dedent(ed);
        }
        self.put_rune(ed, r);
    }

    fn insert_tab(&self, ed: &mut Editor) {
        self.put_rune(ed, '\t');
    }

    fn return_key(&self, ed: &mut Editor) {
        let y = ed.pos.data_y;
        ed.doc.trim_right(y);
        ed.pos.clamp(&ed.doc);
        match ReturnCase::classify(&ed.doc, &ed.pos) {
            ReturnCase::OpenAboveAtStart => {
                ed.doc.insert_line_above(y);
                ed.pos.data_y = y + 1;
                ed.pos.home();
            }
            ReturnCase::OpenAboveKeepColumn => {
                ed.doc.insert_line_above(y);
                ed.pos.data_y = y + 1;
            }
            // Both open an indented line below; scrolling is up to the caller.
            ReturnCase::AppendAtEnd | ReturnCase::OpenBelow => {
                let indent = next_line_indent(&ed.doc, y);
                ed.doc.insert_line_below(y, &indent);
                ed.pos.data_y = y + 1;
                ed.pos.end(&ed.doc);
            }
            ReturnCase::Split => {
                ed.doc.split_line(y, ed.pos.data_x);
                ed.pos.data_y = y + 1;
                ed.pos.home();
            }
        }
        ed.save_x();
    }

    fn backspace(&self, ed: &mut Editor) {
        let Position { data_y: y, data_x: x, .. } = ed.pos;
        if y == 0 && x == 0 {
            return;
        }
        if ed.doc.line_len(y) == 0 {
            ed.doc.delete_line(y);
            ed.pos.up();
            ed.doc.trim_right(ed.pos.data_y);
            ed.pos.end(&ed.doc);
        } else if x == 0 {
            ed.pos.up();
            ed.doc.trim_right(ed.pos.data_y);
            ed.pos.end(&ed.doc);
            ed.doc.delete(ed.pos.data_y, ed.pos.data_x);
        } else {
            ed.pos.prev();
            if !ed.pos.at_or_after_end_of_line(&ed.doc) {
                ed.doc.delete(ed.pos.data_y, ed.pos.data_x);
            }
        }
        ed.save_x();
    }

    fn delete(&self, ed: &mut Editor) {
        let y = ed.pos.data_y;
        if ed.pos.at_or_after_end_of_line(&ed.doc) {
            // joining: the tail of this line goes first
            ed.doc.trim_right(y);
            ed.pos.snap_to_end(&ed.doc);
        }
        ed.doc.delete(y, ed.pos.data_x);
    }

    fn kill_line(&self, ed: &mut Editor) {
        let y = ed.pos.data_y;
        ed.doc.truncate(y, ed.pos.data_x);
        if ed.doc.is_blank_line(y) {
            ed.doc.delete_line(y);
        }
        ed.pos.clamp(&ed.doc);
    }

    fn left(&self, ed: &mut Editor) -> bool {
        let moved = ed.pos.prev();
        ed.pos.snap_to_end(&ed.doc);
        ed.save_x();
        moved
    }

    fn right(&self, ed: &mut Editor) -> bool {
        let moved = ed.pos.next(ed.doc.line_len(ed.pos.data_y));
        ed.pos.snap_to_end(&ed.doc);
        ed.save_x();
        moved
    }

    fn up(&self, ed: &mut Editor) -> bool {
        let moved = ed.pos.up();
        if moved {
            self.land(ed);
        }
        moved
    }

    fn down(&self, ed: &mut Editor) -> bool {
        let moved = ed.pos.down(&ed.doc);
        if moved {
            self.land(ed);
        }
        moved
    }

    fn land(&self, ed: &mut Editor) {
        ed.pos.land_on_saved_x(&ed.doc, ed.tab_width);
    }

    fn normalize(&self, ed: &mut Editor) {
        ed.pos.clamp(&ed.doc);
    }
}

// ─── Draw mode ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DrawOps;

impl DrawOps {
    /// Rightmost addressable cell.
    fn last_cell(ed: &Editor) -> usize {
        ed.doc.width().saturating_sub(1)
    }

    fn blank(ed: &mut Editor, x: usize) {
        if x < ed.doc.line_len(ed.pos.data_y) {
            ed.doc.set_rune(ed.pos.data_y, x, ' ');
        }
    }
}

impl EditOps for DrawOps {
    fn put_rune(&self, ed: &mut Editor, r: char) {
        let x = ed.pos.data_x.min(Self::last_cell(ed));
        ed.doc.set_rune(ed.pos.data_y, x, r);
    }

    fn put_str(&self, ed: &mut Editor, s: &str) {
        for r in s.chars() {
            self.put_rune(ed, r);
            if !self.right(ed) {
                break;
            }
        }
    }

    fn insert_tab(&self, _ed: &mut Editor) {}

    fn return_key(&self, ed: &mut Editor) {
        if ed.pos.at_last_line(&ed.doc) {
            let width = ed.doc.width();
            ed.doc.create_line_if_missing(ed.pos.data_y + 1, width);
        }
        ed.pos.down(&ed.doc);
    }

    fn backspace(&self, ed: &mut Editor) {
        if ed.pos.prev() {
            Self::blank(ed, ed.pos.data_x);
        }
    }

    fn delete(&self, ed: &mut Editor) {
        Self::blank(ed, ed.pos.data_x);
    }

    fn kill_line(&self, ed: &mut Editor) {
        for x in ed.pos.data_x..ed.doc.line_len(ed.pos.data_y) {
            Self::blank(ed, x);
        }
    }

    fn left(&self, ed: &mut Editor) -> bool {
        ed.pos.prev()
    }

    fn right(&self, ed: &mut Editor) -> bool {
        let limit = Self::last_cell(ed);
        ed.pos.next(limit)
    }

    fn up(&self, ed: &mut Editor) -> bool {
        let moved = ed.pos.up();
        self.land(ed);
        moved
    }

    fn down(&self, ed: &mut Editor) -> bool {
        let moved = ed.pos.down(&ed.doc);
        self.land(ed);
        moved
    }

    fn land(&self, ed: &mut Editor) {
        self.normalize(ed);
    }

    fn normalize(&self, ed: &mut Editor) {
        ed.pos.data_y = ed.doc.clamp_y(ed.pos.data_y);
        ed.pos.data_x = ed.pos.data_x.min(Self::last_cell(ed));
    }
}
