//! Region widget engine
//!
//! A `Region` owns one resolved rect, a typed copy of its theme attributes
//! and a little animation/selection state. Drawing, resource lookup and audio
//! go through collaborator traits so the engine never touches pixels, files
//! or sound devices itself.

mod audio;
mod color;
mod config;
mod list;
mod render;
mod resources;
mod scroll;
mod widget;

pub use audio::{AudioSink, LogAudio, NullAudio};
pub use color::{Color, Pallet};
pub use config::{ImageMode, RegionConfig, ScrollAxis, ScrollMode};
pub use list::{bar_len, layout_bar, list_select, page_size, page_start, BarSlot};
pub use render::{
    wrap_text, DrawCall, MonospaceMeasure, RecordingRenderer, Renderer, TextMeasure, TextRun,
};
pub use resources::ResourceLocator;
pub use scroll::{scroll_align, AutoScroll, ScrollPhase, ScrollTiming};
pub use widget::{Region, RegionEnv, RegionEvent};
