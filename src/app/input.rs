//! Keyboard handling
//!
//! A dedicated thread polls crossterm for key events and forwards decoded
//! commands over a channel. Polling with a timeout lets the thread notice
//! that the receiving side is gone without blocking forever in a read.

use std::io;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use crate::constants::KEY_POLL_INTERVAL;

/// Action requested from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `p`, `P` or space
    TogglePause,
    /// `q`, `Q` or Ctrl+C
    Quit,
}

impl Command {
    /// Decodes a key press; releases, repeats and unbound keys yield `None`.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('C')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Command::Quit)
            }
            _ if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => None,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                Some(Command::TogglePause)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Spawns the key listener thread.
///
/// The thread exits once the receiver is dropped.
pub fn spawn_key_listener(commands: Sender<Command>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("key-listener".to_string())
        .spawn(move || listen(commands))
}

fn listen(commands: Sender<Command>) {
    loop {
        if commands.is_closed() {
            break;
        }
        match event::poll(KEY_POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    let Some(command) = Command::from_key(&key) else {
                        continue;
                    };
                    debug!(?command, "key command");
                    if commands.blocking_send(command).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "failed to read terminal event");
                    thread::sleep(KEY_POLL_INTERVAL);
                }
            },
            Ok(false) => {}
            Err(err) => {
                // stdin is not a terminal; keep the thread idle instead of spinning
                debug!(error = %err, "terminal event poll failed");
                thread::sleep(KEY_POLL_INTERVAL);
            }
        }
    }
    debug!("key listener stopped");
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_pause_keys() {
        for c in ['p', 'P', ' '] {
            assert_eq!(
                Command::from_key(&press(KeyCode::Char(c), KeyModifiers::NONE)),
                Some(Command::TogglePause)
            );
        }
        assert_eq!(
            Command::from_key(&press(KeyCode::Char('P'), KeyModifiers::SHIFT)),
            Some(Command::TogglePause)
        );
    }

    #[test]
    fn test_quit_keys() {
        for c in ['q', 'Q'] {
            assert_eq!(
                Command::from_key(&press(KeyCode::Char(c), KeyModifiers::NONE)),
                Some(Command::Quit)
            );
        }
        assert_eq!(
            Command::from_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        for code in [KeyCode::Char('x'), KeyCode::Char('c'), KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(Command::from_key(&press(code, KeyModifiers::NONE)), None);
        }
        assert_eq!(
            Command::from_key(&press(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Command::from_key(&release), None);
    }
}
