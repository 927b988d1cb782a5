// Input normalizer
//
// Drains raw device events once per frame and keeps:
// - which canonical buttons are held
// - which buttons got a press / release edge this frame
// - per-button repeat timers for held navigation buttons
//
// Several physical inputs can map to one button (Enter and pad A both give
// `A`). A button stays held while any of them is down: press fires when the
// first goes down, release when the last comes up.
//
// Edges are one-shot: a button produces at most one edge per batch. If a
// second event for the same button shows up in the same batch (press and
// release between two frames), it is held back for the next batch so the
// screen sees the press on this frame and the release on the next.

use super::button::{Button, Key, PadAxis, PadButton, RawEvent};
use super::keymap::{Keymap, DEFAULT_DEAD_ZONE, DEFAULT_TRIGGER_THRESHOLD};
use crate::clock::Clock;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// Something that produces raw device events
pub trait EventSource {
    /// Everything queued since the last call, oldest first
    fn poll(&mut self) -> Vec<RawEvent>;
}

/// Event source fed by hand, one batch per `poll`
///
/// Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    batches: Rc<RefCell<VecDeque<Vec<RawEvent>>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one batch, delivered by a single `poll`
    pub fn push(&self, batch: impl IntoIterator<Item = RawEvent>) {
        self.batches.borrow_mut().push_back(batch.into_iter().collect());
    }
}

impl EventSource for ScriptedSource {
    fn poll(&mut self) -> Vec<RawEvent> {
        self.batches.borrow_mut().pop_front().unwrap_or_default()
    }
}

/// Defines how a button behaves while held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBehavior {
    /// One press edge per physical press
    StateChange,
    /// Press edge, then synthetic press edges while held
    Repeatable {
        initial_delay_ms: u64,
        repeat_interval_ms: u64,
    },
}

impl KeyBehavior {
    /// Standard menu navigation repeat
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay_ms: 400,
            repeat_interval_ms: 80,
        }
    }
}

/// Tunables for the normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct InputSettings {
    pub dead_zone: i32,
    pub trigger_threshold: i32,
    pub repeat_delay_ms: u64,
    pub repeat_interval_ms: u64,
    pub repeatable: Vec<Button>,
}

impl Default for InputSettings {
    fn default() -> Self {
        let mut repeatable = Button::navigation().to_vec();
        repeatable.extend([Button::L1, Button::R1]);
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            repeat_delay_ms: 400,
            repeat_interval_ms: 80,
            repeatable,
        }
    }
}

/// Physical input holding a button down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Source {
    Key(Key),
    Pad(PadButton),
    Axis(PadAxis),
}

/// Tracks a single held button
#[derive(Debug, Clone)]
struct HoldState {
    since_ms: u64,
    next_repeat_ms: Option<u64>,
    sources: HashSet<Source>,
}

/// Frame-based button state with edge queries
pub struct EventManager {
    source: Box<dyn EventSource>,
    clock: Box<dyn Clock>,
    keymap: Keymap,
    behaviors: HashMap<Button, KeyBehavior>,
    held: HashMap<Button, HoldState>,
    /// Held set captured at the start of the current batch
    previous: HashSet<Button>,
    pressed: HashSet<Button>,
    released: HashSet<Button>,
    /// Direction each axis currently holds
    axes: HashMap<PadAxis, Option<Button>>,
    deferred: Vec<RawEvent>,
    quit: bool,
}

impl EventManager {
    pub fn new(source: Box<dyn EventSource>, clock: Box<dyn Clock>) -> Self {
        Self::with_settings(source, clock, &InputSettings::default())
    }

    pub fn with_settings(
        source: Box<dyn EventSource>,
        clock: Box<dyn Clock>,
        settings: &InputSettings,
    ) -> Self {
        let keymap = Keymap {
            dead_zone: settings.dead_zone,
            trigger_threshold: settings.trigger_threshold,
            ..Keymap::default()
        };
        let mut manager = Self {
            source,
            clock,
            keymap,
            behaviors: HashMap::new(),
            held: HashMap::new(),
            previous: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
            axes: HashMap::new(),
            deferred: Vec::new(),
            quit: false,
        };
        manager.configure_buttons(
            &settings.repeatable,
            KeyBehavior::Repeatable {
                initial_delay_ms: settings.repeat_delay_ms,
                repeat_interval_ms: settings.repeat_interval_ms,
            },
        );
        manager
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Configure a button's behavior
    pub fn configure_button(&mut self, button: Button, behavior: KeyBehavior) {
        self.behaviors.insert(button, behavior);
    }

    /// Configure multiple buttons with the same behavior
    pub fn configure_buttons(&mut self, buttons: &[Button], behavior: KeyBehavior) {
        for button in buttons {
            self.configure_button(*button, behavior);
        }
    }

    /// Start a new frame: drain the source and recompute edges
    pub fn handle_events(&mut self) {
        let now = self.clock.now_ms();
        let mut batch = std::mem::take(&mut self.deferred);
        batch.extend(self.source.poll());
        self.process(batch, now);
    }

    fn process(&mut self, events: Vec<RawEvent>, now: u64) {
        self.previous = self.held.keys().copied().collect();
        self.pressed.clear();
        self.released.clear();

        let mut touched: HashSet<Button> = HashSet::new();
        let mut blocked_axes: HashSet<PadAxis> = HashSet::new();

        for event in events {
            let button_event = match event {
                RawEvent::Quit => {
                    tracing::debug!("quit requested");
                    self.quit = true;
                    continue;
                }
                RawEvent::Key { key, pressed } => {
                    self.keymap.key(key).map(|b| (b, Source::Key(key), pressed))
                }
                RawEvent::Pad { button, pressed } => {
                    self.keymap.pad(button).map(|b| (b, Source::Pad(button), pressed))
                }
                RawEvent::Axis { axis, value } => {
                    if blocked_axes.contains(&axis) {
                        self.deferred.push(event);
                        continue;
                    }
                    let Some(next) = self.keymap.axis(axis, value) else {
                        continue;
                    };
                    let prev = self.axes.get(&axis).copied().flatten();
                    if prev == next {
                        continue;
                    }

                    // A flip straight across center releases the old side and
                    // presses the new one together
                    let changes: Vec<(Button, bool)> = prev
                        .map(|b| (b, false))
                        .into_iter()
                        .chain(next.map(|b| (b, true)))
                        .collect();
                    if changes.iter().any(|(b, _)| touched.contains(b)) {
                        blocked_axes.insert(axis);
                        self.deferred.push(event);
                        continue;
                    }

                    self.axes.insert(axis, next);
                    for (button, pressed) in changes {
                        if self.apply(button, Source::Axis(axis), pressed, now) {
                            touched.insert(button);
                        }
                    }
                    continue;
                }
            };

            let Some((button, source, pressed)) = button_event else {
                tracing::trace!(?event, "unmapped input");
                continue;
            };
            if touched.contains(&button) {
                self.deferred.push(event);
                continue;
            }
            if self.apply(button, source, pressed, now) {
                touched.insert(button);
            }
        }

        self.fire_repeats(now, &touched);
    }

    /// Record a transition; returns whether the held state changed
    fn apply(&mut self, button: Button, source: Source, pressed: bool, now: u64) -> bool {
        if pressed {
            if let Some(hold) = self.held.get_mut(&button) {
                hold.sources.insert(source);
                return false;
            }
            let next_repeat_ms = match self.behaviors.get(&button) {
                Some(KeyBehavior::Repeatable {
                    initial_delay_ms, ..
                }) => Some(now + initial_delay_ms),
                _ => None,
            };
            self.held.insert(
                button,
                HoldState {
                    since_ms: now,
                    next_repeat_ms,
                    sources: HashSet::from([source]),
                },
            );
            self.pressed.insert(button);
            tracing::trace!(%button, "pressed");
            true
        } else {
            let Some(hold) = self.held.get_mut(&button) else {
                return false;
            };
            hold.sources.remove(&source);
            if !hold.sources.is_empty() {
                return false;
            }
            self.held.remove(&button);
            self.released.insert(button);
            tracing::trace!(%button, "released");
            true
        }
    }

    /// At most one synthetic press per held button per frame
    fn fire_repeats(&mut self, now: u64, touched: &HashSet<Button>) {
        for (button, hold) in self.held.iter_mut() {
            let Some(due) = hold.next_repeat_ms else {
                continue;
            };
            if touched.contains(button) || now < due {
                continue;
            }
            let interval = match self.behaviors.get(button) {
                Some(KeyBehavior::Repeatable {
                    repeat_interval_ms, ..
                }) => (*repeat_interval_ms).max(1),
                _ => continue,
            };
            self.pressed.insert(*button);
            let mut next = due + interval;
            if next <= now {
                next = now + interval;
            }
            hold.next_repeat_ms = Some(next);
        }
    }

    /// Press edge this frame (including key repeat)
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    /// Release edge this frame
    pub fn was_released(&self, button: Button) -> bool {
        self.released.contains(&button)
    }

    /// Any press edge this frame
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains_key(&button)
    }

    /// Held at the start of this frame's batch
    pub fn was_held(&self, button: Button) -> bool {
        self.previous.contains(&button)
    }

    /// How long a held button has been down
    pub fn held_for_ms(&self, button: Button) -> Option<u64> {
        self.held
            .get(&button)
            .map(|h| self.clock.now_ms().saturating_sub(h.since_ms))
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
