//! Line-based cut, copy and paste through the system clipboard.
//!
//! The clipboard is best effort: when it can't be reached the last copied
//! line is kept internally and paste falls back to it.

use super::*;

impl App {
    // ─── Clipboard helpers ───────────────────────────────────────────────
    // arboard::Clipboard is created on demand (not stored in App: it's not
    // Send and creating it is cheap).

    pub(super) fn copy_to_clipboard(&self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clip) => {
                if let Err(err) = clip.set_text(text.to_string()) {
                    debug!(error = %err, "clipboard write failed");
                }
            }
            Err(err) => debug!(error = %err, "no clipboard"),
        }
    }

    /// Reads text from the system clipboard. Returns None on failure.
    pub(super) fn paste_from_clipboard(&self) -> Option<String> {
        arboard::Clipboard::new().ok()?.get_text().ok()
    }

    // ─── Line operations ─────────────────────────────────────────────────

    /// ctrl-x: removes the current line and puts it on the clipboard.
    pub(super) fn cut_line(&mut self) {
        self.snapshot();
        self.copy_line = self.editor.cut_line();
        self.copy_to_clipboard(&self.copy_line);
    }

    /// ctrl-c: copies the current line without surrounding whitespace.
    /// Blank lines are not copied.
    pub(super) fn copy_line(&mut self) {
        let trimmed = self.editor.current_line().trim().to_string();
        if !trimmed.is_empty() {
            self.copy_to_clipboard(&trimmed);
            self.copy_line = trimmed;
        }
    }

    /// Pastes the first line of `text` (or of the last copied line when the
    /// clipboard was unavailable). On a blank text line the existing
    /// indentation is kept; in draw mode the cells are always overwritten.
    pub(super) fn paste(&mut self, text: Option<String>) {
        if let Some(text) = text {
            self.copy_line = text.split('\n').next().unwrap_or_default().to_string();
        }
        let line = self.copy_line.replace('\u{a0}', " ");
        let line = line.trim();
        self.snapshot();
        let y = self.editor.data_y();
        if !self.editor.draw_mode() && self.editor.doc().is_blank_line(y) {
            let indent = self.editor.doc().leading_whitespace(y);
            self.editor.set_current_line(&format!("{}{}", indent, line));
        } else {
            self.editor.insert_string(line);
        }
    }
}
