//! Key handling: one key is one editor operation, preceded by an undo
//! snapshot when it changes the document.

use super::*;

impl App {
    // ─── Key handling ────────────────────────────────────────────────────

    /// Main key handler. The go-to-line prompt swallows keys while open;
    /// everything else maps to one binding, after which the view follows
    /// the cursor.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if self.goto_line.is_some() {
            self.handle_goto_key(key);
            return;
        }

        let after_vertical = self.last_key_vertical;
        self.last_key_vertical = false;

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.save(),
            // ctrl-~ arrives as ctrl-6 on most terminals
            (KeyModifiers::CONTROL, KeyCode::Char('~' | '6' | '^')) => {
                self.clear_on_quit = true;
                self.save();
                self.quit();
            }
            (KeyModifiers::CONTROL, KeyCode::Char(' ')) => self.export_or_count(),

            // Movement
            (_, KeyCode::Left) => {
                self.editor.left();
            }
            (_, KeyCode::Right) => {
                self.editor.right();
            }
            (_, KeyCode::Up) => {
                self.editor.up();
                self.last_key_vertical = true;
            }
            (_, KeyCode::Down) => {
                self.editor.down();
                self.last_key_vertical = true;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
                self.line_start(after_vertical)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
                self.line_end(after_vertical)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) | (_, KeyCode::PageDown) => {
                if !self.editor.scroll_down(self.config.scroll_speed) {
                    self.set_status("EOF");
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('p')) | (_, KeyCode::PageUp) => {
                self.editor.scroll_up(self.config.scroll_speed);
            }
            (KeyModifiers::CONTROL, KeyCode::Char('l')) => self.open_goto_prompt(),

            // Edits
            (KeyModifiers::CONTROL, KeyCode::Char('d')) | (_, KeyCode::Delete) => {
                if self.refuse_if_empty() {
                    return;
                }
                self.snapshot();
                self.editor.delete();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('k')) => {
                if self.refuse_if_empty() {
                    return;
                }
                self.snapshot();
                self.editor.kill_line();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('x')) => self.cut_line(),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => self.copy_line(),
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
                let text = self.paste_from_clipboard();
                self.paste(text);
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u' | 'z')) => self.undo(),
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => self.info_mode = !self.info_mode,
            (_, KeyCode::Esc) => self.needs_clear = true,
            (_, KeyCode::Tab) => {
                if !self.editor.draw_mode() {
                    self.snapshot();
                    self.editor.insert_tab();
                }
            }
            (_, KeyCode::Enter) => {
                self.snapshot();
                self.editor.return_key();
            }
            (_, KeyCode::Backspace) | (KeyModifiers::CONTROL, KeyCode::Char('h')) => {
                if !self.editor.at_backspace_limit() {
                    self.snapshot();
                    self.editor.backspace();
                }
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(ch)) => {
                self.snapshot();
                self.editor.type_rune(ch);
            }
            _ => {}
        }

        self.editor.follow_cursor();
    }

    /// Bracketed paste inserts like ctrl-v with the pasted text.
    pub(super) fn handle_paste(&mut self, text: String) {
        if self.goto_line.is_some() {
            return;
        }
        self.paste(Some(text));
        self.editor.follow_cursor();
    }

    pub(super) fn snapshot(&mut self) {
        self.undo.snapshot(&self.editor);
    }

    /// Shows "Empty" and returns true when there is nothing to delete.
    fn refuse_if_empty(&mut self) -> bool {
        if self.editor.doc().is_empty() {
            self.set_status("Empty");
            true
        } else {
            false
        }
    }

    fn quit(&mut self) {
        self.save_location();
        self.should_quit = true;
    }

    fn undo(&mut self) {
        match self.undo.restore(&mut self.editor) {
            Ok(()) => debug!(remaining = self.undo.len(), "undo"),
            Err(err) => self.set_status(&err.to_string()),
        }
    }

    // ─── Line navigation ─────────────────────────────────────────────────

    /// ctrl-a: from column 0 or a blank line, go to the end of the previous
    /// line; otherwise alternate between start of text and start of line.
    /// Right after up/down it never leaves the line.
    fn line_start(&mut self, after_vertical: bool) {
        let y = self.editor.data_y();
        let blank = self.editor.doc().is_blank_line(y);
        if !after_vertical && (blank || self.editor.data_x() == 0) {
            self.editor.up();
            self.editor.end();
        } else {
            self.editor.smart_home();
        }
    }

    /// ctrl-e: go to the end of the line, or from there to the end of the
    /// next one.
    fn line_end(&mut self, after_vertical: bool) {
        let pos = self.editor.pos();
        if !after_vertical && pos.at_or_after_end_of_line(self.editor.doc()) {
            self.editor.down();
        }
        self.editor.end();
    }

    // ─── Go to line (ctrl-l) ─────────────────────────────────────────────

    fn open_goto_prompt(&mut self) {
        self.goto_line = Some(String::new());
        self.set_status_sticky(GOTO_PROMPT);
    }

    fn show_goto_prompt(&mut self) {
        let digits = self.goto_line.clone().unwrap_or_default();
        if digits.is_empty() {
            self.set_status_sticky(GOTO_PROMPT);
        } else {
            self.set_status_sticky(&format!("{} {}", GOTO_PROMPT, digits));
        }
    }

    fn handle_goto_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char(ch)) if ch.is_ascii_digit() && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(digits) = self.goto_line.as_mut() {
                    digits.push(ch);
                }
                self.show_goto_prompt();
            }
            (_, KeyCode::Backspace) | (KeyModifiers::CONTROL, KeyCode::Char('h')) => {
                if let Some(digits) = self.goto_line.as_mut() {
                    digits.pop();
                }
                self.show_goto_prompt();
            }
            (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.goto_line = None;
                self.clear_status();
            }
            (_, KeyCode::Enter) => {
                let digits = self.goto_line.take().unwrap_or_default();
                self.clear_status();
                if let Ok(n) = digits.parse::<usize>() {
                    self.editor.go_to_line(n, true);
                }
            }
            _ => {}
        }
    }
}
