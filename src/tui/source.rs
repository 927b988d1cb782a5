// Keyboard event source for the terminal preview
//
// Crossterm only reports key releases when the terminal speaks the kitty
// keyboard protocol. Everywhere else a key is considered released once the
// terminal has been silent about it for `RELEASE_AFTER_MS` (its own
// auto-repeat keeps a held key alive).

use crate::clock::{Clock, SystemClock};
use crate::input::{EventSource, Key, RawEvent};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::Duration;

/// Silence after which a key is treated as released
pub const RELEASE_AFTER_MS: u64 = 150;

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    })
}

/// Turns crossterm key events into press / release pairs
#[derive(Debug, Default)]
pub struct KeyTracker {
    reports_release: bool,
    /// Held keys and when they were last heard from
    held: HashMap<Key, u64>,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: HashMap::new(),
        }
    }

    pub fn feed(&mut self, event: &Event, now_ms: u64) -> Option<RawEvent> {
        let Event::Key(key_event) = event else {
            return None;
        };

        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return Some(RawEvent::Quit);
        }
        let key = map_key(key_event.code)?;

        match key_event.kind {
            KeyEventKind::Release => self
                .held
                .remove(&key)
                .map(|_| RawEvent::Key { key, pressed: false }),
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // terminal auto-repeat only refreshes the hold
                let already_held = self.held.insert(key, now_ms).is_some();
                (!already_held).then_some(RawEvent::Key { key, pressed: true })
            }
        }
    }

    /// Synthetic releases for keys that went quiet
    pub fn expire(&mut self, now_ms: u64) -> Vec<RawEvent> {
        if self.reports_release {
            return Vec::new();
        }
        let quiet: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, &heard)| now_ms.saturating_sub(heard) >= RELEASE_AFTER_MS)
            .map(|(&key, _)| key)
            .collect();
        quiet
            .into_iter()
            .map(|key| {
                self.held.remove(&key);
                RawEvent::Key {
                    key,
                    pressed: false,
                }
            })
            .collect()
    }
}

/// `EventSource` reading the terminal through crossterm
pub struct CrosstermSource {
    keys: KeyTracker,
    clock: SystemClock,
}

impl CrosstermSource {
    pub fn new(reports_release: bool, clock: SystemClock) -> Self {
        Self {
            keys: KeyTracker::new(reports_release),
            clock,
        }
    }
}

impl EventSource for CrosstermSource {
    fn poll(&mut self) -> Vec<RawEvent> {
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal poll failed");
                    break;
                }
            }
            match event::read() {
                Ok(ev) => events.extend(self.keys.feed(&ev, self.clock.now_ms())),
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    break;
                }
            }
        }
        events.extend(self.keys.expire(self.clock.now_ms()));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn press(key: Key) -> Option<RawEvent> {
        Some(RawEvent::Key { key, pressed: true })
    }

    fn release(key: Key) -> RawEvent {
        RawEvent::Key {
            key,
            pressed: false,
        }
    }

    #[test]
    fn maps_keys_and_ctrl_c() {
        let mut keys = KeyTracker::new(true);
        assert_eq!(
            keys.feed(&key(KeyCode::Char('X'), KeyEventKind::Press), 0),
            press(Key::Char('x'))
        );
        assert_eq!(
            keys.feed(&key(KeyCode::Char(' '), KeyEventKind::Press), 0),
            press(Key::Space)
        );
        assert_eq!(keys.feed(&key(KeyCode::F(5), KeyEventKind::Press), 0), None);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(keys.feed(&ctrl_c, 0), Some(RawEvent::Quit));
    }

    #[test]
    fn real_releases_pass_through() {
        let mut keys = KeyTracker::new(true);
        assert_eq!(keys.feed(&key(KeyCode::Up, KeyEventKind::Press), 0), press(Key::Up));
        assert_eq!(keys.feed(&key(KeyCode::Up, KeyEventKind::Repeat), 30), None);
        assert!(keys.expire(10_000).is_empty());
        assert_eq!(
            keys.feed(&key(KeyCode::Up, KeyEventKind::Release), 40),
            Some(release(Key::Up))
        );
    }

    #[test]
    fn silent_keys_release_after_timeout() {
        let mut keys = KeyTracker::new(false);
        assert_eq!(keys.feed(&key(KeyCode::Down, KeyEventKind::Press), 0), press(Key::Down));
        assert!(keys.expire(RELEASE_AFTER_MS - 1).is_empty());

        // auto-repeat keeps it held
        assert_eq!(keys.feed(&key(KeyCode::Down, KeyEventKind::Press), 100), None);
        assert!(keys.expire(200).is_empty());
        assert_eq!(keys.expire(100 + RELEASE_AFTER_MS), vec![release(Key::Down)]);

        // and a fresh press after that is a new edge
        assert_eq!(keys.feed(&key(KeyCode::Down, KeyEventKind::Press), 400), press(Key::Down));
    }
}
