//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::HeartTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: This result is a statistical prediction and is not a substitute for a professional medical diagnosis.",
        HeartTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(HeartTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
