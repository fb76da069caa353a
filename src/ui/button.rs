use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Bordered button with a centred, truncated label.
pub fn draw_button(f: &mut Frame, area: Rect, label: &str, color: Color) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let text = truncate_string(label, inner_width);
    let button = Paragraph::new(Line::from(text))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(button, area);
}
