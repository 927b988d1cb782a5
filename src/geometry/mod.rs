//! Coordinate resolution: rects, anchors and the named-rect registry

mod named;
mod rect;

pub use named::{Coord, CoordSpec, GeometryError, NamedRects, MAX_PIXELS, ROOT};
pub use rect::{Anchor, Edge, Rect};
