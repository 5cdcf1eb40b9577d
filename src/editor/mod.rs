//! The editing core: one document, one cursor and one viewport, plus the
//! mode that decides how edits behave.
//!
//! Nothing in here touches the terminal. Edits and moves report whether they
//! did anything; the caller decides about scrolling by calling
//! [`Editor::follow_cursor`] or one of the scroll methods afterwards.

pub mod coords;
pub mod document;
pub mod modes;
pub mod position;
pub mod undo;
pub mod viewport;

pub use document::Document;
pub use modes::{EditOps, Mode, ReturnCase};
pub use position::Position;
pub use undo::{Snapshot, Undo};
pub use viewport::Viewport;

#[derive(Debug, Clone)]
pub struct Editor {
    doc: Document,
    pos: Position,
    view: Viewport,
    mode: Mode,
    tab_width: usize,
}

impl Editor {
    pub fn new(doc: Document, mode: Mode, tab_width: usize, height: usize) -> Self {
        Self {
            doc,
            pos: Position::default(),
            view: Viewport::new(height),
            mode,
            tab_width: tab_width.max(1),
        }
    }

    fn ops(&self) -> &'static dyn EditOps {
        self.mode.ops()
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn view(&self) -> &Viewport {
        &self.view
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draw_mode(&self) -> bool {
        self.mode == Mode::Draw
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn data_y(&self) -> usize {
        self.pos.data_y
    }

    pub fn data_x(&self) -> usize {
        self.pos.data_x
    }

    pub fn screen_x(&self) -> usize {
        self.pos.screen_x(&self.doc, self.tab_width)
    }

    pub fn screen_y(&self) -> usize {
        self.pos.screen_y(&self.view)
    }

    pub fn current_line(&self) -> String {
        self.doc.line(self.pos.data_y)
    }

    /// The rune under the cursor, if any.
    pub fn current_rune(&self) -> Option<char> {
        self.doc.rune_at(self.pos.data_y, self.pos.data_x)
    }

    /// Puts the cursor at `(y, x)`, clamped into the document, and makes that
    /// column sticky.
    pub fn set_position(&mut self, y: usize, x: usize) {
        self.pos = Position::new(y, x);
        self.ops().normalize(self);
        self.save_x();
    }

    pub(crate) fn save_x(&mut self) {
        self.pos.save_x(&self.doc, self.tab_width);
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    pub fn type_rune(&mut self, r: char) {
        self.ops().type_rune(self, r);
    }

    pub fn insert_tab(&mut self) {
        self.ops().insert_tab(self);
    }

    pub fn return_key(&mut self) {
        self.ops().return_key(self);
    }

    pub fn backspace(&mut self) {
        self.ops().backspace(self);
    }

    /// True where backspace has nothing to remove: the very start of the
    /// document, or the first cell of a row in draw mode.
    pub fn at_backspace_limit(&self) -> bool {
        match self.mode {
            Mode::Text => self.pos.data_y == 0 && self.pos.data_x == 0,
            Mode::Draw => self.pos.data_x == 0,
        }
    }

    pub fn delete(&mut self) {
        self.ops().delete(self);
    }

    pub fn kill_line(&mut self) {
        self.ops().kill_line(self);
    }

    /// Inserts (text) or overwrites (draw) `s` at the cursor.
    pub fn insert_string(&mut self, s: &str) {
        self.ops().put_str(self, s);
    }

    /// Replaces the current line and moves to its end.
    pub fn set_current_line(&mut self, s: &str) {
        self.doc.set_line(self.pos.data_y, s);
        self.pos.end(&self.doc);
        self.ops().normalize(self);
        self.save_x();
    }

    /// Removes the current line and returns what it held.
    pub fn cut_line(&mut self) -> String {
        let line = self.current_line();
        self.doc.delete_line(self.pos.data_y);
        self.ops().normalize(self);
        line
    }

    /// Strips trailing whitespace from every line, as done before saving text.
    pub fn trim_trailing_whitespace(&mut self) {
        self.doc.trim_all();
        self.ops().normalize(self);
    }

    // ─── Movement ────────────────────────────────────────────────────────

    pub fn left(&mut self) -> bool {
        self.ops().left(self)
    }

    pub fn right(&mut self) -> bool {
        self.ops().right(self)
    }

    pub fn up(&mut self) -> bool {
        self.ops().up(self)
    }

    pub fn down(&mut self) -> bool {
        self.ops().down(self)
    }

    pub fn home(&mut self) {
        self.pos.home();
        self.save_x();
    }

    pub fn end(&mut self) {
        self.pos.end(&self.doc);
        self.ops().normalize(self);
        self.save_x();
    }

    pub fn smart_home(&mut self) {
        self.pos.smart_home(&self.doc);
        self.save_x();
    }

    /// Jumps to 1-based `line_number`, clamped to the document, and scrolls
    /// it into view (centered when asked). Returns whether the view moved.
    pub fn go_to_line(&mut self, line_number: usize, center: bool) -> bool {
        let y = self.doc.clamp_y(line_number.saturating_sub(1));
        self.pos = Position::new(y, 0);
        if center {
            self.view.center_on(y, self.doc.len())
        } else {
            self.view.follow(y, self.doc.len())
        }
    }

    // ─── Scrolling ───────────────────────────────────────────────────────

    /// Scrolls the view down and moves the cursor by the same number of
    /// lines, so it keeps its screen row. False at the end of the document.
    pub fn scroll_down(&mut self, n: usize) -> bool {
        let before = self.view.offset();
        if !self.view.scroll_down(n, self.doc.len()) {
            return false;
        }
        let delta = self.view.offset().saturating_sub(before);
        self.pos.data_y = self.doc.clamp_y(self.pos.data_y + delta);
        self.ops().land(self);
        true
    }

    /// Scrolls the view up, moving the cursor along. False at the top.
    pub fn scroll_up(&mut self, n: usize) -> bool {
        let before = self.view.offset();
        if !self.view.scroll_up(n, self.doc.len()) {
            return false;
        }
        let delta = before.saturating_sub(self.view.offset());
        self.pos.data_y = self.pos.data_y.saturating_sub(delta);
        self.ops().land(self);
        self.view.follow(self.pos.data_y, self.doc.len());
        true
    }

    /// Scrolls just enough to show the cursor line.
    pub fn follow_cursor(&mut self) -> bool {
        self.view.follow(self.pos.data_y, self.doc.len())
    }

    /// Applies a new viewport height and keeps the cursor on screen.
    pub fn resize(&mut self, height: usize) -> bool {
        let reclamped = self.view.resize(height, self.doc.len());
        self.follow_cursor() || reclamped
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            doc: self.doc.clone(),
            pos: self.pos,
            offset: self.view.offset(),
        }
    }

    /// Replaces document, cursor and scroll offset with a snapshot. A resize
    /// since the snapshot may still move the view to keep the cursor shown.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.doc = snapshot.doc;
        self.pos = snapshot.pos;
        self.view.scroll_to(snapshot.offset, self.doc.len());
        self.follow_cursor();
    }
}
