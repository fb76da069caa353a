use crate::models::UiEvent;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
#[cfg(test)]
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Source of discrete UI events for the host loop.
pub trait InputSource {
    /// Waits at most `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>>;
}

/// Reads keyboard and mouse events from the terminal via crossterm.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(translate_event(event::read()?))
    }
}

/// Replays a fixed list of events, then reports no further input.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<UiEvent>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    fn next_event(&mut self, _timeout: Duration) -> io::Result<Option<UiEvent>> {
        Ok(self.events.pop_front())
    }
}

pub fn translate_event(event: Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<UiEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(UiEvent::PointerDown {
            x: mouse.column,
            y: mouse.row,
        }),
        _ => None,
    }
}
