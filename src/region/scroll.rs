// Auto-scroll state machine for overflowing text
//
// slide:   START_PAUSE -> FORWARD -> END_PAUSE -> FORWARD (from 0) -> ...
// marquee: START_PAUSE -> FORWARD -> END_PAUSE -> BACKWARD -> START_PAUSE -> ...
// none:    START_PAUSE forever
//
// `advance` is pure: given the current state and the clock it returns the
// next state. Elapsed time, not frame count, drives it, so a slow frame
// catches up on every step and pause it missed.

use super::config::{ScrollAxis, ScrollMode};
use crate::geometry::{Anchor, Edge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    StartPause,
    Forward,
    EndPause,
    Backward,
}

/// Timing parameters, fixed per region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTiming {
    /// Milliseconds per step
    pub speed_ms: u64,
    /// Pixels per step
    pub amount: i32,
    pub start_delay_ms: u64,
    pub end_delay_ms: u64,
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self {
            speed_ms: 30,
            amount: 1,
            start_delay_ms: 1000,
            end_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScroll {
    mode: Option<ScrollMode>,
    timing: ScrollTiming,
    phase: ScrollPhase,
    pos: i32,
    max: i32,
    /// Clock reading the current phase (or last step) is measured from
    since_ms: u64,
}

impl AutoScroll {
    pub fn new(mode: Option<ScrollMode>, timing: ScrollTiming, now_ms: u64) -> Self {
        Self {
            mode,
            timing: ScrollTiming {
                speed_ms: timing.speed_ms.max(1),
                amount: timing.amount.max(1),
                ..timing
            },
            phase: ScrollPhase::StartPause,
            pos: 0,
            max: 0,
            since_ms: now_ms,
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn pos(&self) -> i32 {
        self.pos
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn mode(&self) -> Option<ScrollMode> {
        self.mode
    }

    /// Set content and viewport size along the scroll axis
    pub fn set_extent(&mut self, content: i32, viewport: i32, now_ms: u64) {
        let max = (content - viewport).max(0);
        if max != self.max {
            self.max = max;
            self.reset(now_ms);
        }
    }

    /// Back to the start position, pausing
    pub fn reset(&mut self, now_ms: u64) {
        self.phase = ScrollPhase::StartPause;
        self.pos = 0;
        self.since_ms = now_ms;
    }

    /// Next state after `now_ms`
    pub fn advance(&self, now_ms: u64) -> Self {
        let mut next = *self;
        let Some(mode) = self.mode else {
            next.phase = ScrollPhase::StartPause;
            next.pos = 0;
            return next;
        };
        if self.max == 0 {
            next.phase = ScrollPhase::StartPause;
            next.pos = 0;
            next.since_ms = now_ms;
            return next;
        }

        let t = next.timing;
        loop {
            let elapsed = now_ms.saturating_sub(next.since_ms);
            match next.phase {
                ScrollPhase::StartPause => {
                    if elapsed < t.start_delay_ms {
                        break;
                    }
                    next.since_ms += t.start_delay_ms;
                    next.phase = ScrollPhase::Forward;
                }
                ScrollPhase::Forward => {
                    let remaining = next.max - next.pos;
                    let needed = (remaining + t.amount - 1) / t.amount;
                    let steps = (elapsed / t.speed_ms).min(needed as u64);
                    next.pos = (next.pos + steps as i32 * t.amount).min(next.max);
                    next.since_ms += steps * t.speed_ms;
                    if next.pos < next.max {
                        break;
                    }
                    next.phase = ScrollPhase::EndPause;
                }
                ScrollPhase::EndPause => {
                    if elapsed < t.end_delay_ms {
                        break;
                    }
                    next.since_ms += t.end_delay_ms;
                    match mode {
                        ScrollMode::Slide => {
                            next.pos = 0;
                            next.phase = ScrollPhase::Forward;
                        }
                        ScrollMode::Marquee => next.phase = ScrollPhase::Backward,
                    }
                }
                ScrollPhase::Backward => {
                    let needed = (next.pos + t.amount - 1) / t.amount;
                    let steps = (elapsed / t.speed_ms).min(needed as u64);
                    next.pos = (next.pos - steps as i32 * t.amount).max(0);
                    next.since_ms += steps * t.speed_ms;
                    if next.pos > 0 {
                        break;
                    }
                    next.phase = ScrollPhase::StartPause;
                }
            }
        }
        next
    }

    /// Advance in place; returns how far the offset moved
    pub fn step(&mut self, now_ms: u64) -> i32 {
        let next = self.advance(now_ms);
        let delta = next.pos - self.pos;
        *self = next;
        delta
    }
}

/// Alignment to lay out scrolled content with
///
/// Centered content that overflows would scroll around its middle; scroll it
/// from the start edge instead. Content that fits keeps its alignment.
pub fn scroll_align(align: Anchor, axis: ScrollAxis, overflows: bool) -> Anchor {
    if !overflows {
        return align;
    }
    let (h, v) = (align.horizontal(), align.vertical());
    match axis {
        ScrollAxis::Horizontal if h == Edge::Middle => Anchor::from_edges(Edge::Start, v),
        ScrollAxis::Vertical if v == Edge::Middle => Anchor::from_edges(h, Edge::Start),
        _ => align,
    }
}
