//! Canonical button names and raw device events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Device-independent input action
///
/// D-pad, analog sticks, triggers and keyboard keys all end up here. Stick
/// directions keep their own names (`L_UP`, `R_LEFT`, ...) so a screen can
/// tell them apart from the d-pad when it cares to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
    Start,
    Select,
    Guide,
    LUp,
    LDown,
    LLeft,
    LRight,
    RUp,
    RDown,
    RLeft,
    RRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown button name '{0}'")]
pub struct UnknownButton(pub String);

impl Button {
    pub const ALL: [Button; 25] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::L1,
        Button::R1,
        Button::L2,
        Button::R2,
        Button::L3,
        Button::R3,
        Button::Start,
        Button::Select,
        Button::Guide,
        Button::LUp,
        Button::LDown,
        Button::LLeft,
        Button::LRight,
        Button::RUp,
        Button::RDown,
        Button::RLeft,
        Button::RRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Up => "UP",
            Button::Down => "DOWN",
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
            Button::A => "A",
            Button::B => "B",
            Button::X => "X",
            Button::Y => "Y",
            Button::L1 => "L1",
            Button::R1 => "R1",
            Button::L2 => "L2",
            Button::R2 => "R2",
            Button::L3 => "L3",
            Button::R3 => "R3",
            Button::Start => "START",
            Button::Select => "SELECT",
            Button::Guide => "GUIDE",
            Button::LUp => "L_UP",
            Button::LDown => "L_DOWN",
            Button::LLeft => "L_LEFT",
            Button::LRight => "L_RIGHT",
            Button::RUp => "R_UP",
            Button::RDown => "R_DOWN",
            Button::RLeft => "R_LEFT",
            Button::RRight => "R_RIGHT",
        }
    }

    /// Directional buttons that usually auto-repeat while held
    pub fn navigation() -> [Button; 8] {
        [
            Button::Up,
            Button::Down,
            Button::Left,
            Button::Right,
            Button::LUp,
            Button::LDown,
            Button::LLeft,
            Button::LRight,
        ]
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Button::ALL
            .iter()
            .find(|b| b.as_str() == wanted)
            .copied()
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}

/// Physical game-controller button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

/// Physical game-controller axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

/// Keyboard key, independent of the terminal or window backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Tab,
    Space,
    PageUp,
    PageDown,
    Char(char),
}

/// One event as delivered by a device backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    Pad { button: PadButton, pressed: bool },
    /// Axis position in `-32768..=32767`
    Axis { axis: PadAxis, value: i16 },
    Key { key: Key, pressed: bool },
    Quit,
}
