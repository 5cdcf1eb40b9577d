//! The editing session for one file: the editor core, its undo history, the
//! status line and everything the key bindings need around them.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, warn};

use crate::codec;
use crate::components::status;
use crate::config::Config;
use crate::editor::{Editor, Undo};
use crate::history::LocationHistory;
use crate::theme::Theme;
use crate::{Error, Result};

/// Rows reserved below the document for the status bar.
const STATUS_ROWS: u16 = 1;

/// Document rows until the terminal reports its real size.
const DEFAULT_HEIGHT: usize = 23;

/// Prompt shown while ctrl-l collects a line number.
const GOTO_PROMPT: &str = "Go to line number:";

pub struct App {
    // --- Core state ---
    pub editor: Editor,
    pub undo: Undo,
    /// The file name as given on the command line.
    pub file_path: PathBuf,
    /// Key for the location history.
    abs_path: PathBuf,
    /// Set when the start-up write probe failed. Saving is refused.
    pub read_only: bool,
    pub should_quit: bool,
    /// Clear the terminal on exit (ctrl-~).
    pub clear_on_quit: bool,

    // --- Settings ---
    pub config: Config,
    pub theme: Theme,
    history: LocationHistory,

    // --- Status bar ---
    pub status_message: String,
    /// When the message was set; `None` keeps it until replaced.
    pub status_time: Option<Instant>,
    pub status_error: bool,
    /// ctrl-g: show file, position and word count instead of messages.
    pub info_mode: bool,

    // --- Go-to-line prompt (ctrl-l) ---
    /// Digits typed so far, while the prompt is open.
    pub goto_line: Option<String>,

    // --- Internal tracking ---
    /// True when the previous key was an up or down arrow.
    last_key_vertical: bool,
    /// Fallback for paste when the system clipboard is unavailable.
    copy_line: String,
    /// Terminal size from the last resize event, applied by the main loop.
    pending_resize: Option<(u16, u16)>,
    /// Request for a full clear before the next frame (esc, resize).
    pub needs_clear: bool,
}

impl App {
    /// Opens `file_path` with default settings and an in-memory location
    /// history.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        Self::open(file_path, Config::default(), LocationHistory::in_memory(), None)
    }

    /// Runs the start-up sequence: load or prepare the file, probe whether it
    /// can be written, then jump to `line` or to the remembered location.
    pub fn open(
        file_path: PathBuf,
        config: Config,
        history: LocationHistory,
        line: Option<usize>,
    ) -> Result<Self> {
        let name = file_path.display().to_string();
        let (loaded, read_only, status_message) = match std::fs::metadata(&file_path) {
            Ok(meta) if meta.is_dir() => return Err(Error::IsDirectory(file_path)),
            Ok(_) => {
                let loaded = codec::load(&file_path)?;
                let mut message = if loaded.doc.is_empty() {
                    format!("Loaded empty file: {}{}", name, loaded.warning)
                } else {
                    format!("Loaded {}{}", name, loaded.warning)
                };
                let read_only = !can_write(&file_path);
                if read_only {
                    message.push_str(" (read only)");
                }
                (loaded, read_only, message)
            }
            Err(_) => {
                let loaded = codec::prepare_empty(&file_path);
                probe_create(&file_path, &loaded.doc)?;
                (loaded, false, format!("New {}", name))
            }
        };
        info!(path = %name, mode = ?loaded.mode, read_only, "opened");

        let abs_path = std::path::absolute(&file_path).unwrap_or_else(|_| file_path.clone());
        let mut editor = Editor::new(loaded.doc, loaded.mode, config.tab_width, DEFAULT_HEIGHT);
        if let Some(n) = line {
            editor.go_to_line(n, false);
        } else if let Some(n) = history.get(&abs_path) {
            debug!(line = n, "jumping to remembered location");
            editor.go_to_line(n, true);
        }

        Ok(Self {
            editor,
            undo: Undo::new(config.undo_capacity),
            file_path,
            abs_path,
            read_only,
            should_quit: false,
            clear_on_quit: false,
            theme: Theme::from_config(&config),
            config,
            history,
            status_message,
            status_time: Some(Instant::now()),
            status_error: false,
            info_mode: false,
            goto_line: None,
            last_key_vertical: false,
            copy_line: String::new(),
            pending_resize: None,
            needs_clear: false,
        })
    }

    /// The file name shown in messages.
    pub fn filename(&self) -> String {
        self.file_path.display().to_string()
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called once per frame. Expires timed status messages.
    pub fn tick(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() >= self.config.status_duration() {
                self.clear_status();
            }
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Top-level event handler. Resizes are only recorded here; the main loop
    /// applies them through [`App::apply_pending_resize`].
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(text),
            Event::Resize(width, height) => self.pending_resize = Some((width, height)),
            _ => {}
        }
    }

    /// Applies the last recorded terminal size, if any. Returns whether
    /// there was one.
    pub fn apply_pending_resize(&mut self) -> bool {
        match self.pending_resize.take() {
            Some((width, height)) => {
                self.resize(width, height);
                true
            }
            None => false,
        }
    }

    pub fn pending_resize(&self) -> Option<(u16, u16)> {
        self.pending_resize
    }

    /// Fits the viewport to a terminal of `width` × `height` cells.
    pub fn resize(&mut self, width: u16, height: u16) {
        let rows = height.saturating_sub(STATUS_ROWS).max(1) as usize;
        self.editor.resize(rows);
        self.needs_clear = true;
        debug!(width, height, rows, "resized");
    }

    // ─── Status bar ──────────────────────────────────────────────────────

    /// Shows a message that clears itself after the configured duration.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_time = Some(Instant::now());
        self.status_error = false;
    }

    /// Shows a message that stays until it is replaced.
    pub fn set_status_sticky(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_time = None;
        self.status_error = false;
    }

    /// Shows a failure in the error colour.
    pub fn set_error(&mut self, err: &Error) {
        warn!(error = %err, "status error");
        self.set_status(&err.to_string());
        self.status_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message.clear();
        self.status_time = None;
        self.status_error = false;
    }

    /// The info line shown by ctrl-g.
    pub fn info_line(&self) -> String {
        let rune = self
            .editor
            .current_rune()
            .map(|r| format!("U+{:04X}", u32::from(r)))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} | line {}, col {} | {} | {} words",
            self.filename(),
            self.editor.data_y() + 1,
            self.editor.screen_x() + 1,
            rune,
            self.editor.doc().word_count()
        )
    }

    // ─── Location history ────────────────────────────────────────────────

    /// Remembers the current line for this file. Failures only get logged.
    pub(super) fn save_location(&mut self) {
        let line = self.editor.data_y() + 1;
        if let Err(err) = self.history.record(&self.abs_path, line) {
            warn!(error = %err, "could not save location history");
        }
    }
}

/// Whether an existing file can be opened for writing.
fn can_write(path: &Path) -> bool {
    OpenOptions::new().write(true).open(path).is_ok()
}

/// Creates and removes the file once, so a file that can never be saved is
/// reported before any editing happens.
fn probe_create(path: &Path, doc: &crate::editor::Document) -> Result<()> {
    codec::save(doc, path, true, false)?;
    std::fs::remove_file(path).map_err(|e| Error::io(path, e))
}

mod clipboard;
mod input;
mod render;
mod save;

#[cfg(test)]
mod tests;
