use crate::session::QuizSession;
use crate::ui::button::draw_button;
use crate::ui::layout::calculate_summary_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new(session.config().title.as_str())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let max_score = session.total_questions() as u32 * session.config().points_per_correct;
    let mut text = Text::default();
    text.push_line(Line::from(format!("Game Over! Your score: {}", session.score())));
    text.push_line(Line::from(format!("out of {} possible", max_score)));
    let score = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, layout.score_area);

    draw_button(f, layout.play_again_button, "Play Again", Color::Green);
    draw_button(f, layout.quit_button, "Quit", Color::Red);
}
