use ratatui::style::{Color, Modifier, Style};

use crate::codec::PALETTE;
use crate::config::Config;

// Dark terminals (the default)
pub const EDITOR_FG: Color = Color::LightGreen;
pub const STATUS_FG: Color = Color::White;
pub const STATUS_BG: Color = Color::Black;
pub const ERROR_FG: Color = Color::LightRed;

// Light terminals
pub const LIGHT_EDITOR_FG: Color = Color::Black;
pub const LIGHT_ERROR_FG: Color = Color::Red;

// Read-only sessions draw the document in red
pub const READ_ONLY_FG: Color = Color::Red;

// Tilde color for empty lines beyond file content
pub const TILDE: Color = Color::DarkGray;

/// The colors one session is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub editor_fg: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub error_fg: Color,
    pub tilde: Color,
    /// Draw without any color at all.
    pub plain: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            editor_fg: EDITOR_FG,
            status_fg: STATUS_FG,
            status_bg: STATUS_BG,
            error_fg: ERROR_FG,
            tilde: TILDE,
            plain: false,
        }
    }

    pub fn light() -> Self {
        Self {
            editor_fg: LIGHT_EDITOR_FG,
            error_fg: LIGHT_ERROR_FG,
            ..Self::dark()
        }
    }

    /// Terminal defaults everywhere.
    pub fn plain() -> Self {
        Self {
            editor_fg: Color::Reset,
            status_fg: Color::Reset,
            status_bg: Color::Reset,
            error_fg: Color::Reset,
            tilde: Color::Reset,
            plain: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.no_color {
            Self::plain()
        } else if config.light_theme {
            Self::light()
        } else {
            Self::dark()
        }
    }

    // Pre-built styles
    pub fn editor_style(&self, read_only: bool) -> Style {
        if read_only && !self.plain {
            Style::default().fg(READ_ONLY_FG)
        } else {
            Style::default().fg(self.editor_fg)
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }

    pub fn error_style(&self) -> Style {
        let style = Style::default().fg(self.error_fg).bg(self.status_bg);
        if self.plain {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn tilde_style(&self) -> Style {
        Style::default().fg(self.tilde)
    }

    /// Style of one pixel cell in draw mode: palette digits are shown in
    /// their own color, anything else like plain text.
    pub fn cell_style(&self, cell: char) -> Style {
        match cell.to_digit(16) {
            Some(index) if !self.plain => {
                let [r, g, b] = PALETTE[index as usize];
                Style::default().fg(Color::Rgb(r, g, b))
            }
            _ => self.editor_style(false),
        }
    }
}
