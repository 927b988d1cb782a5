//! Named, parent-relative rectangles
//!
//! Every region area is written in the theme as a 4-tuple resolved against a
//! parent rect that must already be registered. The tuple is always read as
//! two corners (x1, y1, x2, y2), never as (x, y, w, h):
//!
//! ```text
//!   float in [0, 1]   fraction of the parent's size, from the parent origin
//!   int >= 0          pixels from the parent origin
//!   int < 0           pixels back from the parent's far edge
//! ```

use super::Rect;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Name of the registry's seed rect (the output surface)
pub const ROOT: &str = "root";

/// Largest pixel magnitude a theme may write, for coordinates and sizes
pub const MAX_PIXELS: i32 = 1 << 20;

/// Malformed coordinate spec
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("coordinate spec must have 4 values, found {found}")]
    BadArity { found: usize },

    #[error("coordinate {index} is not a number: {found}")]
    NotNumeric { index: usize, found: String },

    #[error("coordinate {index} fraction {value} is outside [0, 1]")]
    FractionOutOfRange { index: usize, value: f64 },

    #[error("coordinate {index} pixel value {value} is outside ±{}", MAX_PIXELS)]
    PixelsOutOfRange { index: usize, value: i64 },
}

/// One resolved-later coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    /// Fraction of the parent's size along this axis
    Fraction(f64),
    /// Pixels from the parent origin
    Pixels(i32),
    /// Pixels back from the parent's far edge (always negative)
    FromFar(i32),
}

impl Coord {
    fn from_json(index: usize, value: &Value) -> Result<Self, GeometryError> {
        if value.is_f64() {
            let f = value.as_f64().unwrap_or_default();
            if !(0.0..=1.0).contains(&f) {
                return Err(GeometryError::FractionOutOfRange { index, value: f });
            }
            return Ok(Coord::Fraction(f));
        }

        let Some(v) = value.as_i64().or_else(|| value.as_u64().map(|_| i64::MAX)) else {
            return Err(GeometryError::NotNumeric {
                index,
                found: value.to_string(),
            });
        };
        if v.unsigned_abs() > MAX_PIXELS as u64 {
            return Err(GeometryError::PixelsOutOfRange { index, value: v });
        }
        // bounded by MAX_PIXELS above
        let v = v as i32;
        if v < 0 {
            Ok(Coord::FromFar(v))
        } else {
            Ok(Coord::Pixels(v))
        }
    }

    /// Resolve against one axis of the parent
    pub fn resolve(self, origin: i32, size: i32) -> i32 {
        match self {
            Coord::Fraction(f) => origin.saturating_add((size as f64 * f).round() as i32),
            Coord::Pixels(px) => origin.saturating_add(px),
            // clamps at the parent origin, not at 0, so a child never
            // starts left of (or above) its parent
            Coord::FromFar(px) => origin.saturating_add(size).saturating_add(px).max(origin),
        }
    }
}

/// Four coordinates read as (x1, y1, x2, y2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordSpec(pub [Coord; 4]);

impl CoordSpec {
    /// The whole parent
    pub const FULL: CoordSpec = CoordSpec([
        Coord::Pixels(0),
        Coord::Pixels(0),
        Coord::Fraction(1.0),
        Coord::Fraction(1.0),
    ]);

    /// Parse a theme value; anything but a list of exactly four numbers fails
    pub fn from_json(value: &Value) -> Result<Self, GeometryError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(GeometryError::NotNumeric {
                    index: 0,
                    found: other.to_string(),
                })
            }
        };
        if items.len() != 4 {
            return Err(GeometryError::BadArity { found: items.len() });
        }

        let mut coords = [Coord::Pixels(0); 4];
        for (index, item) in items.iter().enumerate() {
            coords[index] = Coord::from_json(index, item)?;
        }
        Ok(CoordSpec(coords))
    }

    /// Resolve against a parent rect
    ///
    /// Values 0 and 2 use the parent's x axis, 1 and 3 its y axis.
    pub fn resolve(&self, parent: &Rect) -> Rect {
        let [x1, y1, x2, y2] = self.0;
        Rect::from_corners(
            x1.resolve(parent.x(), parent.width()),
            y1.resolve(parent.y(), parent.height()),
            x2.resolve(parent.x(), parent.width()),
            y2.resolve(parent.y(), parent.height()),
        )
    }
}

/// Registry of resolved rects, seeded with the root surface
#[derive(Debug, Clone)]
pub struct NamedRects {
    rects: IndexMap<String, Rect>,
}

impl NamedRects {
    pub fn new(root: Rect) -> Self {
        let mut rects = IndexMap::new();
        rects.insert(ROOT.to_string(), root);
        Self { rects }
    }

    pub fn root(&self) -> Rect {
        self.rects.get(ROOT).copied().unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<Rect> {
        self.rects.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rects.contains_key(name)
    }

    /// Register (or replace) a rect
    pub fn insert(&mut self, name: impl Into<String>, rect: Rect) {
        self.rects.insert(name.into(), rect);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rect)> {
        self.rects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Parent lookup with root fallback
    pub fn parent(&self, name: &str) -> Rect {
        match self.rects.get(name) {
            Some(rect) => *rect,
            None => {
                tracing::debug!(parent = name, "unknown parent rect, using root");
                self.root()
            }
        }
    }

    /// Resolve a parsed spec and optionally register the result as `child`
    pub fn resolve(&mut self, parent: &str, child: Option<&str>, spec: &CoordSpec) -> Rect {
        let rect = spec.resolve(&self.parent(parent));
        if let Some(child) = child {
            self.insert(child, rect);
        }
        rect
    }

    /// Parse and resolve a raw theme value
    pub fn make_rect(
        &mut self,
        parent: &str,
        child: Option<&str>,
        spec: &Value,
    ) -> Result<Rect, GeometryError> {
        let spec = CoordSpec::from_json(spec)?;
        Ok(self.resolve(parent, child, &spec))
    }
}
