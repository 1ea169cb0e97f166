use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;

use crate::state::Input;

/// Collects the key presses seen between two ticks.
///
/// Terminals only report presses (and auto-repeats), never releases, so a
/// direction counts as held for a tick when it was pressed during that tick.
/// The restart key is edge-triggered: it shows up in exactly one `Input`.
#[derive(Debug, Default)]
pub struct KeyTracker {
    pending: Input,
    quit_requested: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_events(&mut self, events: &[KeyEvent]) {
        for ev in events {
            self.process_event(ev);
        }
    }

    pub fn process_event(&mut self, ev: &KeyEvent) {
        if is_quit(ev) {
            self.quit_requested = true;
            return;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => self.pending.up = true,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => self.pending.down = true,
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => self.pending.left = true,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => self.pending.right = true,
            KeyCode::Char(' ') => self.pending.restart = true,
            _ => {}
        }
    }

    /// Hands out this tick's input and starts a fresh window.
    pub fn take_input(&mut self) -> Input {
        let input = std::mem::take(&mut self.pending);
        if input != Input::default() {
            trace!("tick input {:?}", input);
        }
        input
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
        || matches!(ev.code, KeyCode::Esc | KeyCode::Char('q'))
}
