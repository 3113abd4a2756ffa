//! Screen-space geometry.
//!
//! Coordinates are virtual-desktop pixels with `y` growing downwards.  A
//! [`Rect`] is stored as its four edges, which is also how window bounds are
//! persisted in workspace snapshots.  Serialized rectangles also carry
//! `width` and `height`; those keys are ignored when reading.

use serde::{Deserialize, Serialize, Serializer};

/// A point on the virtual desktop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Serialize)]
struct PersistedRect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    width: f64,
    height: f64,
}

impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PersistedRect {
            left: self.left,
            top: self.top,
            right: self.right,
            bottom: self.bottom,
            width: self.width(),
            height: self.height(),
        }
        .serialize(serializer)
    }
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from a center point and half-extents (the form monitors are
    /// usually described in).
    pub fn from_center(center: Point, half_size: Point) -> Self {
        Self {
            left: center.x - half_size.x,
            top: center.y - half_size.y,
            right: center.x + half_size.x,
            bottom: center.y + half_size.y,
        }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Edges are inclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Whether `other` lies entirely within `self` (shared edges allowed).
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Whether `other` would fit inside `self` after a translation.
    pub fn can_hold(&self, other: &Rect) -> bool {
        other.width() <= self.width() && other.height() <= self.height()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Bounding box of every rectangle in `rects`, or `None` if empty.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(a) => Some(a.union(r)),
        })
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Smallest translation that moves `self` inside `area`.
    ///
    /// Axes already inside `area` get a zero offset.  When `self` is larger
    /// than `area` on an axis, the left/top edge wins.
    pub fn offset_into(&self, area: &Rect) -> (f64, f64) {
        fn axis(lo: f64, hi: f64, area_lo: f64, area_hi: f64) -> f64 {
            if lo < area_lo || hi - lo > area_hi - area_lo {
                area_lo - lo
            } else if hi > area_hi {
                area_hi - hi
            } else {
                0.0
            }
        }
        (
            axis(self.left, self.right, area.left, area.right),
            axis(self.top, self.bottom, area.top, area.bottom),
        )
    }

    /// Distance from `p` to the closest point of this rectangle (zero when
    /// `p` is inside).
    pub fn distance_to(&self, p: Point) -> f64 {
        let dx = (self.left - p.x).max(0.0).max(p.x - self.right);
        let dy = (self.top - p.y).max(0.0).max(p.y - self.bottom);
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale about `origin` by `factor`, rounding edges to whole pixels.
    pub fn scale_about(&self, origin: Point, factor: f64) -> Rect {
        let sx = |v: f64| (origin.x + (v - origin.x) * factor).round();
        let sy = |v: f64| (origin.y + (v - origin.y) * factor).round();
        Rect {
            left: sx(self.left),
            top: sy(self.top),
            right: sx(self.right),
            bottom: sy(self.bottom),
        }
    }
}
