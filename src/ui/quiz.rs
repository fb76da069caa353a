use crate::models::{Attempt, Feedback};
use crate::session::QuizSession;
use crate::ui::button::draw_button;
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub fn feedback_color(feedback: Feedback) -> Color {
    match feedback {
        Feedback::CorrectFirstAttempt => Color::Green,
        Feedback::CorrectSecondAttempt => Color::Blue,
        Feedback::WrongRetry | Feedback::WrongFinal => Color::Red,
    }
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, now: Instant) {
    let Some(question) = session.current_question() else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());

    let progress = format!(
        "Question {}/{}",
        session.current_index() + 1,
        session.total_questions()
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let prompt = Paragraph::new(Text::from(question.prompt.as_str()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    for slot in &layout.option_slots {
        let label = format!("{}. {}", slot.option + 1, question.options[slot.option]);
        draw_button(f, slot.area, &label, Color::Gray);
    }

    let attempt = match session.attempt().attempt {
        Attempt::First => "First attempt",
        Attempt::Second => "Second attempt",
    };
    let mut status = vec![Line::from(vec![
        Span::styled(
            format!("Time left: {}", session.time_left(now)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::from(format!("  {}  Score: {}", attempt, session.score())),
    ])];
    if let Some(feedback) = session.visible_feedback(now) {
        status.push(Line::from(Span::styled(
            feedback.message(session.config().extra_time),
            Style::default().fg(feedback_color(feedback)),
        )));
    }
    let status = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    draw_button(f, layout.quit_button, "Quit", Color::Red);
}
