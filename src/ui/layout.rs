use crate::config::OPTIONS_PER_QUESTION;
use crate::utils::{centered_horizontally, rect_contains};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const MENU_BUTTON_WIDTH: u16 = 20;
const SUMMARY_BUTTON_WIDTH: u16 = 16;
const QUIT_BUTTON_WIDTH: u16 = 12;

pub struct MenuLayout {
    pub title_area: Rect,
    pub start_button: Rect,
    pub quit_button: Rect,
    pub message_area: Rect,
}

/// A rendered answer button and the logical option it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSlot {
    pub area: Rect,
    pub option: usize,
}

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub option_slots: [OptionSlot; OPTIONS_PER_QUESTION],
    pub status_area: Rect,
    pub quit_button: Rect,
}

impl QuizLayout {
    pub fn option_at(&self, x: u16, y: u16) -> Option<usize> {
        self.option_slots
            .iter()
            .find(|slot| rect_contains(slot.area, x, y))
            .map(|slot| slot.option)
    }
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub score_area: Rect,
    pub play_again_button: Rect,
    pub quit_button: Rect,
}

pub fn calculate_menu_chunks(area: Rect) -> MenuLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    MenuLayout {
        title_area: chunks[1],
        start_button: centered_horizontally(chunks[3], MENU_BUTTON_WIDTH),
        quit_button: centered_horizontally(chunks[5], MENU_BUTTON_WIDTH),
        message_area: chunks[6],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(QUIT_BUTTON_WIDTH)])
        .split(chunks[6]);

    // Display order is currently identity; the slot carries the logical index.
    let option_slots = std::array::from_fn(|i| OptionSlot {
        area: chunks[2 + i],
        option: i,
    });

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        option_slots,
        status_area: footer[0],
        quit_button: footer[1],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let buttons_row = centered_horizontally(chunks[2], SUMMARY_BUTTON_WIDTH * 2 + 2);
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SUMMARY_BUTTON_WIDTH),
            Constraint::Length(2),
            Constraint::Length(SUMMARY_BUTTON_WIDTH),
        ])
        .split(buttons_row);

    SummaryLayout {
        header_area: chunks[0],
        score_area: chunks[1],
        play_again_button: buttons[0],
        quit_button: buttons[2],
    }
}
