use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

pub struct StatusInfo<'a> {
    pub message: &'a str,
    pub is_error: bool,
    pub theme: &'a Theme,
}

/// Draws the message on the bottom row. Only the message itself gets the bar
/// colors; an empty message leaves the row blank.
pub fn render(frame: &mut Frame, area: Rect, info: StatusInfo) {
    if info.message.is_empty() {
        return;
    }
    let style = if info.is_error {
        info.theme.error_style()
    } else {
        info.theme.status_style()
    };
    let line = Line::from(Span::styled(format!(" {} ", info.message), style));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}
