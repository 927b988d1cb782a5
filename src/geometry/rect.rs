//! Integer rectangle with a 9-point anchor grid
//!
//! Anchor getters report a point on the rect; anchor setters move the rect so
//! that point lands on the given coordinate. Size is never touched by an
//! anchor setter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine anchor points of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    TopLeft,
    MidTop,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    MidBottom,
    BottomRight,
}

/// Position of an anchor along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::MidTop,
        Anchor::TopRight,
        Anchor::MidLeft,
        Anchor::Center,
        Anchor::MidRight,
        Anchor::BottomLeft,
        Anchor::MidBottom,
        Anchor::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::MidTop => "midtop",
            Anchor::TopRight => "topright",
            Anchor::MidLeft => "midleft",
            Anchor::Center => "center",
            Anchor::MidRight => "midright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::MidBottom => "midbottom",
            Anchor::BottomRight => "bottomright",
        }
    }

    /// Horizontal component
    pub fn horizontal(&self) -> Edge {
        match self {
            Anchor::TopLeft | Anchor::MidLeft | Anchor::BottomLeft => Edge::Start,
            Anchor::MidTop | Anchor::Center | Anchor::MidBottom => Edge::Middle,
            Anchor::TopRight | Anchor::MidRight | Anchor::BottomRight => Edge::End,
        }
    }

    /// Vertical component
    pub fn vertical(&self) -> Edge {
        match self {
            Anchor::TopLeft | Anchor::MidTop | Anchor::TopRight => Edge::Start,
            Anchor::MidLeft | Anchor::Center | Anchor::MidRight => Edge::Middle,
            Anchor::BottomLeft | Anchor::MidBottom | Anchor::BottomRight => Edge::End,
        }
    }

    /// Rebuild an anchor from its two axis components
    pub fn from_edges(horizontal: Edge, vertical: Edge) -> Self {
        match (vertical, horizontal) {
            (Edge::Start, Edge::Start) => Anchor::TopLeft,
            (Edge::Start, Edge::Middle) => Anchor::MidTop,
            (Edge::Start, Edge::End) => Anchor::TopRight,
            (Edge::Middle, Edge::Start) => Anchor::MidLeft,
            (Edge::Middle, Edge::Middle) => Anchor::Center,
            (Edge::Middle, Edge::End) => Anchor::MidRight,
            (Edge::End, Edge::Start) => Anchor::BottomLeft,
            (Edge::End, Edge::Middle) => Anchor::MidBottom,
            (Edge::End, Edge::End) => Anchor::BottomRight,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown alignment '{}'", s))
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Negative sizes collapse to zero
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Build from two opposite corners (x1, y1) top-left and (x2, y2) bottom-right
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn topleft(&self) -> (i32, i32) {
        self.anchor(Anchor::TopLeft)
    }

    pub fn bottomright(&self) -> (i32, i32) {
        self.anchor(Anchor::BottomRight)
    }

    pub fn center(&self) -> (i32, i32) {
        self.anchor(Anchor::Center)
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    /// Point of the given anchor
    pub fn anchor(&self, anchor: Anchor) -> (i32, i32) {
        let x = match anchor.horizontal() {
            Edge::Start => self.left(),
            Edge::Middle => self.centerx(),
            Edge::End => self.right(),
        };
        let y = match anchor.vertical() {
            Edge::Start => self.top(),
            Edge::Middle => self.centery(),
            Edge::End => self.bottom(),
        };
        (x, y)
    }

    /// Move the rect so `anchor` sits at `point`
    pub fn set_anchor(&mut self, anchor: Anchor, point: (i32, i32)) {
        self.x = match anchor.horizontal() {
            Edge::Start => point.0,
            Edge::Middle => point.0 - self.width / 2,
            Edge::End => point.0 - self.width,
        };
        self.y = match anchor.vertical() {
            Edge::Start => point.1,
            Edge::Middle => point.1 - self.height / 2,
            Edge::End => point.1 - self.height,
        };
    }

    /// Copy of this rect moved so `anchor` sits at `point`
    pub fn with_anchor(mut self, anchor: Anchor, point: (i32, i32)) -> Self {
        self.set_anchor(anchor, point);
        self
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink by `dx` on the left and right, `dy` on top and bottom
    pub fn inset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - dx * 2,
            self.height - dy * 2,
        )
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Overlapping area, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.left().max(other.left());
        let y1 = self.top().max(other.top());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            None
        } else {
            Some(Rect::from_corners(x1, y1, x2, y2))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_tokens_round_trip() {
        for anchor in Anchor::ALL {
            assert_eq!(anchor.as_str().parse::<Anchor>().unwrap(), anchor);
        }
        assert!("middle".parse::<Anchor>().is_err());
    }

    #[test]
    fn anchors_decompose_and_rebuild() {
        for anchor in Anchor::ALL {
            assert_eq!(
                Anchor::from_edges(anchor.horizontal(), anchor.vertical()),
                anchor
            );
        }
    }

    #[test]
    fn anchor_getters() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.topleft(), (10, 20));
        assert_eq!(r.anchor(Anchor::MidTop), (60, 20));
        assert_eq!(r.anchor(Anchor::MidRight), (110, 45));
        assert_eq!(r.center(), (60, 45));
        assert_eq!(r.bottomright(), (110, 70));
    }

    #[test]
    fn anchor_setters_preserve_size() {
        let mut r = Rect::new(0, 0, 40, 20);
        for anchor in Anchor::ALL {
            r.set_anchor(anchor, (200, 100));
            assert_eq!(r.anchor(anchor), (200, 100));
            assert_eq!((r.width(), r.height()), (40, 20));
        }
    }

    #[test]
    fn from_corners_collapses_inverted_rects() {
        let r = Rect::from_corners(50, 50, 10, 80);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 30);
    }

    #[test]
    fn intersection_and_containment() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersection(&b), Some(Rect::new(50, 50, 50, 50)));
        assert!(a.contains(&Rect::new(10, 10, 20, 20)));
        assert!(!a.contains(&b));
        assert_eq!(a.intersection(&Rect::new(200, 200, 5, 5)), None);
    }

    #[test]
    fn inset_shrinks_on_both_sides() {
        let r = Rect::new(0, 0, 100, 50).inset(5, 10);
        assert_eq!(r, Rect::new(5, 10, 90, 30));
    }
}
