mod button;
pub mod layout;
mod menu;
mod quiz;
mod summary;

pub use button::draw_button;
pub use layout::{calculate_menu_chunks, calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::draw_menu;
pub use quiz::{draw_quiz, feedback_color};
pub use summary::draw_summary;

use crate::app::App;
use crate::models::SessionPhase;
use ratatui::Frame;
use std::time::Instant;

/// Draws whichever screen matches the current round phase.
pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let session = app.session();
    match session.phase() {
        SessionPhase::NotStarted => draw_menu(f, &session.config().title, app.error()),
        SessionPhase::InProgress => draw_quiz(f, session, now),
        SessionPhase::Over => draw_summary(f, session),
    }
}
