//! Raw device input -> canonical buttons

use super::button::{Button, Key, PadAxis, PadButton};
use std::collections::HashMap;

/// Stick deflection below this (of 32767) reads as centered
pub const DEFAULT_DEAD_ZONE: i32 = 12_000;
/// Trigger travel above this (of 32767) reads as pressed
pub const DEFAULT_TRIGGER_THRESHOLD: i32 = 8_000;

/// How an axis turns into buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBinding {
    /// Two-sided stick axis: past the dead zone on either side holds one button
    Stick { negative: Button, positive: Button },
    /// One-sided trigger: past the threshold holds the button
    Trigger(Button),
}

impl AxisBinding {
    /// Button held for an axis position, or `None` when centered/released
    pub fn direction(&self, value: i16, dead_zone: i32, trigger_threshold: i32) -> Option<Button> {
        let value = i32::from(value);
        match *self {
            AxisBinding::Stick { negative, positive } => {
                if value < -dead_zone {
                    Some(negative)
                } else if value > dead_zone {
                    Some(positive)
                } else {
                    None
                }
            }
            AxisBinding::Trigger(button) => (value > trigger_threshold).then_some(button),
        }
    }
}

/// Binding tables for every device class
#[derive(Debug, Clone)]
pub struct Keymap {
    pub keys: HashMap<Key, Button>,
    pub pad: HashMap<PadButton, Button>,
    pub axes: HashMap<PadAxis, AxisBinding>,
    pub dead_zone: i32,
    pub trigger_threshold: i32,
}

impl Keymap {
    pub fn key(&self, key: Key) -> Option<Button> {
        self.keys.get(&key).copied()
    }

    pub fn pad(&self, button: PadButton) -> Option<Button> {
        self.pad.get(&button).copied()
    }

    /// Button an axis position holds, `Some(None)` when the axis is bound but centered
    pub fn axis(&self, axis: PadAxis, value: i16) -> Option<Option<Button>> {
        self.axes
            .get(&axis)
            .map(|b| b.direction(value, self.dead_zone, self.trigger_threshold))
    }

    /// Rebind a keyboard key
    pub fn bind_key(&mut self, key: Key, button: Button) {
        self.keys.insert(key, button);
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let keys = HashMap::from([
            (Key::Up, Button::Up),
            (Key::Down, Button::Down),
            (Key::Left, Button::Left),
            (Key::Right, Button::Right),
            (Key::Enter, Button::A),
            (Key::Esc, Button::B),
            (Key::Backspace, Button::B),
            (Key::Char('x'), Button::X),
            (Key::Char('y'), Button::Y),
            (Key::Char('q'), Button::L1),
            (Key::Char('e'), Button::R1),
            (Key::PageUp, Button::L2),
            (Key::PageDown, Button::R2),
            (Key::Tab, Button::Select),
            (Key::Space, Button::Start),
        ]);

        let pad = HashMap::from([
            (PadButton::A, Button::A),
            (PadButton::B, Button::B),
            (PadButton::X, Button::X),
            (PadButton::Y, Button::Y),
            (PadButton::Back, Button::Select),
            (PadButton::Guide, Button::Guide),
            (PadButton::Start, Button::Start),
            (PadButton::LeftStick, Button::L3),
            (PadButton::RightStick, Button::R3),
            (PadButton::LeftShoulder, Button::L1),
            (PadButton::RightShoulder, Button::R1),
            (PadButton::DPadUp, Button::Up),
            (PadButton::DPadDown, Button::Down),
            (PadButton::DPadLeft, Button::Left),
            (PadButton::DPadRight, Button::Right),
        ]);

        let axes = HashMap::from([
            (
                PadAxis::LeftX,
                AxisBinding::Stick {
                    negative: Button::LLeft,
                    positive: Button::LRight,
                },
            ),
            (
                PadAxis::LeftY,
                AxisBinding::Stick {
                    negative: Button::LUp,
                    positive: Button::LDown,
                },
            ),
            (
                PadAxis::RightX,
                AxisBinding::Stick {
                    negative: Button::RLeft,
                    positive: Button::RRight,
                },
            ),
            (
                PadAxis::RightY,
                AxisBinding::Stick {
                    negative: Button::RUp,
                    positive: Button::RDown,
                },
            ),
            (PadAxis::TriggerLeft, AxisBinding::Trigger(Button::L2)),
            (PadAxis::TriggerRight, AxisBinding::Trigger(Button::R2)),
        ]);

        Self {
            keys,
            pad,
            axes,
            dead_zone: DEFAULT_DEAD_ZONE,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stick_respects_dead_zone() {
        let map = Keymap::default();
        assert_eq!(map.axis(PadAxis::LeftY, 0), Some(None));
        assert_eq!(map.axis(PadAxis::LeftY, 12_000), Some(None));
        assert_eq!(map.axis(PadAxis::LeftY, -20_000), Some(Some(Button::LUp)));
        assert_eq!(map.axis(PadAxis::LeftY, 20_000), Some(Some(Button::LDown)));
    }

    #[test]
    fn trigger_is_one_sided() {
        let map = Keymap::default();
        assert_eq!(map.axis(PadAxis::TriggerLeft, -32_768), Some(None));
        assert_eq!(map.axis(PadAxis::TriggerLeft, 9_000), Some(Some(Button::L2)));
    }

    #[test]
    fn default_keyboard_layout() {
        let map = Keymap::default();
        assert_eq!(map.key(Key::Enter), Some(Button::A));
        assert_eq!(map.key(Key::Backspace), Some(Button::B));
        assert_eq!(map.key(Key::Char('z')), None);
    }
}
