//! Line storage. Lines are kept as rune vectors so data columns index
//! directly. The document always holds at least one line.

/// Runes that count as indentation.
pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Vec<char>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    /// Splits text on `\n`, dropping a trailing `\r` per line and the empty
    /// line after a final newline.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_suffix('\n').unwrap_or(text);
        Self::from_lines(text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)))
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines: Vec<Vec<char>> = lines
            .into_iter()
            .map(|l| l.as_ref().chars().collect())
            .collect();
        if lines.is_empty() {
            lines.push(Vec::new());
        }
        Self { lines }
    }

    /// A `width` × `height` grid where every cell holds `fill`.
    pub fn grid(width: usize, height: usize, fill: char) -> Self {
        Self::from_rows(vec![vec![fill; width]; height.max(1)])
    }

    pub(crate) fn from_rows(mut rows: Vec<Vec<char>>) -> Self {
        if rows.is_empty() {
            rows.push(Vec::new());
        }
        Self { lines: rows }
    }

    /// Number of lines (never zero).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True for the single-empty-line document.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Index of the last line.
    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    pub(crate) fn clamp_y(&self, y: usize) -> usize {
        y.min(self.last_index())
    }

    pub fn runes(&self, y: usize) -> &[char] {
        &self.lines[self.clamp_y(y)]
    }

    pub fn line(&self, y: usize) -> String {
        self.runes(y).iter().collect()
    }

    pub fn line_len(&self, y: usize) -> usize {
        self.runes(y).len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Widest row; the grid width in draw mode.
    pub fn width(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rune_at(&self, y: usize, x: usize) -> Option<char> {
        self.runes(y).get(x).copied()
    }

    /// Leading spaces and tabs of a line.
    pub fn leading_whitespace(&self, y: usize) -> String {
        self.runes(y).iter().take_while(|c| is_blank(**c)).collect()
    }

    /// Column of the first non-blank rune, or the line length if there is none.
    pub fn start_of_text(&self, y: usize) -> usize {
        let line = self.runes(y);
        line.iter().position(|c| !is_blank(*c)).unwrap_or(line.len())
    }

    /// True when the line holds nothing but whitespace.
    pub fn is_blank_line(&self, y: usize) -> bool {
        self.runes(y).iter().all(|c| c.is_whitespace())
    }

    // ─── Rune edits ──────────────────────────────────────────────────────

    /// Inserts `r` at column `x`, shifting the tail right. `x` is clamped to
    /// the end of the line.
    pub fn insert_rune(&mut self, y: usize, x: usize, r: char) {
        let y = self.clamp_y(y);
        let line = &mut self.lines[y];
        let x = x.min(line.len());
        line.insert(x, r);
    }

    /// Inserts a run of runes at column `x`, returning how many went in.
    pub fn insert_str(&mut self, y: usize, x: usize, s: &str) -> usize {
        let y = self.clamp_y(y);
        let line = &mut self.lines[y];
        let x = x.min(line.len());
        let before = line.len();
        line.splice(x..x, s.chars());
        line.len() - before
    }

    /// Overwrites the cell at column `x`. A column past the end pads the row
    /// with blanks first.
    pub fn set_rune(&mut self, y: usize, x: usize, r: char) {
        let y = self.clamp_y(y);
        let line = &mut self.lines[y];
        if x >= line.len() {
            line.resize(x + 1, ' ');
        }
        line[x] = r;
    }

    /// Removes the rune at column `x`. At or past the end of the line the next
    /// line is joined onto this one instead. Returns false when there was
    /// nothing to delete.
    pub fn delete(&mut self, y: usize, x: usize) -> bool {
        let y = self.clamp_y(y);
        if x < self.lines[y].len() {
            self.lines[y].remove(x);
            true
        } else if y < self.last_index() {
            let next = self.lines.remove(y + 1);
            self.lines[y].extend(next);
            true
        } else {
            false
        }
    }

    /// Drops everything from column `x` to the end of the line.
    pub fn truncate(&mut self, y: usize, x: usize) {
        let y = self.clamp_y(y);
        self.lines[y].truncate(x);
    }

    pub fn trim_right(&mut self, y: usize) {
        let y = self.clamp_y(y);
        let line = &mut self.lines[y];
        while line.last().is_some_and(|c| c.is_whitespace()) {
            line.pop();
        }
    }

    pub fn set_line(&mut self, y: usize, s: &str) {
        let y = self.clamp_y(y);
        self.lines[y] = s.chars().collect();
    }

    // ─── Line edits ──────────────────────────────────────────────────────

    pub fn insert_line_above(&mut self, y: usize) {
        let y = self.clamp_y(y);
        self.lines.insert(y, Vec::new());
    }

    /// Inserts a line holding `content` right after line `y`.
    pub fn insert_line_below(&mut self, y: usize, content: &str) {
        let y = self.clamp_y(y);
        self.lines.insert(y + 1, content.chars().collect());
    }

    /// Removes line `y`. Deleting the only line leaves one empty line.
    pub fn delete_line(&mut self, y: usize) {
        let y = self.clamp_y(y);
        if self.lines.len() == 1 {
            self.lines[0].clear();
        } else {
            self.lines.remove(y);
        }
    }

    /// Moves everything from column `x` onto a new line below.
    pub fn split_line(&mut self, y: usize, x: usize) {
        let y = self.clamp_y(y);
        let x = x.min(self.lines[y].len());
        let tail = self.lines[y].split_off(x);
        self.lines.insert(y + 1, tail);
    }

    /// Appends blank rows of `width` cells until line `y` exists.
    pub fn create_line_if_missing(&mut self, y: usize, width: usize) {
        while self.lines.len() <= y {
            self.lines.push(vec![' '; width]);
        }
    }

    // ─── Whole-document views ────────────────────────────────────────────

    /// The document as text with a final newline, optionally with trailing
    /// whitespace removed from every line.
    pub fn to_text(&self, trim_trailing: bool) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let s: String = line.iter().collect();
            if trim_trailing {
                out.push_str(s.trim_end());
            } else {
                out.push_str(&s);
            }
            out.push('\n');
        }
        out
    }

    pub fn trim_all(&mut self) {
        for y in 0..self.lines.len() {
            self.trim_right(y);
        }
    }

    pub fn word_count(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.split(|c| c.is_whitespace()).filter(|w| !w.is_empty()).count())
            .sum()
    }
}
