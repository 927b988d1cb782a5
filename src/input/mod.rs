//! Input normalization
//!
//! Game-controller buttons, analog sticks, triggers and keyboard keys are all
//! folded into one space of canonical `Button`s with per-frame edges.

mod button;
mod keymap;
mod manager;

pub use button::{Button, Key, PadAxis, PadButton, RawEvent, UnknownButton};
pub use keymap::{AxisBinding, Keymap, DEFAULT_DEAD_ZONE, DEFAULT_TRIGGER_THRESHOLD};
pub use manager::{EventManager, EventSource, InputSettings, KeyBehavior, ScriptedSource};
