//! harbor - declarative UI regions and theme composition for a handheld launcher
//!
//! Data flow, leaves first:
//! - `geometry`: parent-relative rect resolution and the named rect registry
//! - `theme`: theme documents, capability gating and composition into
//!   per-screen attribute maps
//! - `input`: raw pad/axis/keyboard events normalized into canonical buttons
//!   with edge queries and key repeat
//! - `region`: typed widgets built from composed attributes, updated from
//!   input and drawn through a `Renderer`
//! - `screen`: the ordered regions of one screen
//!
//! `config`, `logging`, `tui` and `cli` make up the `harbor` binary.

pub mod cli;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod region;
pub mod screen;
pub mod theme;
pub mod tui;
