// Theme system
//
// A theme is one JSON document describing every screen of the launcher:
// regions keyed by name, shared sections under reserved `#` keys, and
// capability-gated variants via `name[req,!req]` suffixes.
//
// Pipeline:
// - loader: find and read `theme.json` (user dirs, then bundled)
// - document: parse into typed sections
// - compose: apply scheme, gate, merge -> per-screen attribute maps
//
// The composed maps are validated into typed region configs by
// `crate::region`, which is where attribute errors surface.

mod bundled;
pub mod compose;
pub mod document;
mod error;
pub mod loader;
pub mod requirements;
pub mod value;

pub use bundled::{BundledTheme, BUNDLED_THEMES};
pub use compose::{compose, ComposedTheme};
pub use document::{Section, SectionKind, ThemeDocument};
pub use error::{Result, ThemeError};
pub use loader::{ensure_themes_extracted, LoadedTheme, ThemeLoader};
pub use requirements::CapabilitySet;
pub use value::{merge, merge_maps, Scalar, ThemeMap, ThemeValue};
