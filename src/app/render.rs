//! UI rendering: document rows, `~` past the end, the status bar and the
//! terminal cursor.

use super::*;

use crate::editor::coords;

impl App {
    /// Runs one frame of the main loop: draw + tick.
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        if self.needs_clear {
            terminal.clear()?;
            self.needs_clear = false;
        }
        terminal.draw(|frame| self.render(frame))?;
        self.tick();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Min(1),                 // Document
            Constraint::Length(STATUS_ROWS),    // Status
        ])
        .split(frame.area());

        self.render_document(frame, chunks[0]);

        let message = if self.goto_line.is_none() && self.info_mode && !self.status_error {
            self.info_line()
        } else {
            self.status_message.clone()
        };
        status::render(
            frame,
            chunks[1],
            status::StatusInfo {
                message: &message,
                is_error: self.status_error,
                theme: &self.theme,
            },
        );

        if let Some(row) = self.editor.view().row_of(self.editor.data_y()) {
            let width = usize::from(chunks[0].width.max(1));
            let col = self.editor.screen_x().min(width - 1);
            frame.set_cursor_position((chunks[0].x + col as u16, chunks[0].y + row as u16));
        }
    }

    fn render_document(&self, frame: &mut Frame, area: Rect) {
        let doc = self.editor.doc();
        let offset = self.editor.view().offset();
        let lines: Vec<Line> = (0..usize::from(area.height))
            .map(|row| {
                let y = offset + row;
                if y >= doc.len() {
                    Line::from(Span::styled("~", self.theme.tilde_style()))
                } else if self.editor.draw_mode() {
                    self.pixel_row(doc.runes(y))
                } else {
                    Line::from(Span::styled(
                        coords::expand_tabs(doc.runes(y), self.editor.tab_width()),
                        self.theme.editor_style(self.read_only),
                    ))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// One row of the icon, each cell in its palette colour.
    fn pixel_row(&self, cells: &[char]) -> Line<'static> {
        let spans: Vec<Span> = cells
            .iter()
            .map(|&cell| {
                let style = if self.read_only {
                    self.theme.editor_style(true)
                } else {
                    self.theme.cell_style(cell)
                };
                Span::styled(cell.to_string(), style)
            })
            .collect();
        Line::from(spans)
    }
}
