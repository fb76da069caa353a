use crate::ui::button::draw_button;
use crate::ui::layout::calculate_menu_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_menu(f: &mut Frame, title: &str, error: Option<&str>) {
    let layout = calculate_menu_chunks(f.area());

    let welcome = Paragraph::new(format!("Welcome to {}!", title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(welcome, layout.title_area);

    draw_button(f, layout.start_button, "Start", Color::Green);
    draw_button(f, layout.quit_button, "Quit", Color::Red);

    if let Some(error) = error {
        let message = Paragraph::new(error)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message, layout.message_area);
    }
}
