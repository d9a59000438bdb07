//! Integer table geometry.
//!
//! All coordinates are in table space. The tabletop spans a very large
//! rectangle, so containment and union are computed in `i64` and saturated
//! back to `i32`.

use serde::{Deserialize, Serialize};

/// A location on the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Return this point moved by the given offset.
    #[must_use]
    pub const fn translate(self, offset: Dimension) -> Self {
        Self {
            x: self.x.saturating_add(offset.width),
            y: self.y.saturating_add(offset.height),
        }
    }

    /// Offset that moves `self` onto `other`.
    #[must_use]
    pub const fn offset_to(self, other: Point) -> Dimension {
        Dimension {
            width: other.x.saturating_sub(self.x),
            height: other.y.saturating_sub(self.y),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A size, or a signed offset between two points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    /// Create a new dimension.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The empty dimension.
    #[must_use]
    pub const fn zero() -> Self {
        Self { width: 0, height: 0 }
    }

    /// Check if both components are zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Multiply both components by `factor`.
    #[must_use]
    pub fn scale(self, factor: usize) -> Self {
        let factor = i32::try_from(factor).unwrap_or(i32::MAX);
        Self {
            width: self.width.saturating_mul(factor),
            height: self.height.saturating_mul(factor),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
///
/// The right and bottom edges are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a location and a size.
    #[must_use]
    pub const fn from_parts(location: Point, size: Dimension) -> Self {
        Self {
            x: location.x,
            y: location.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Check if the rectangle has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if `point` lies inside this rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && py >= y && px < x + i64::from(self.width) && py < y + i64::from(self.height)
    }

    /// Smallest rectangle covering both `self` and `other`.
    ///
    /// Empty rectangles do not contribute to the union.
    #[must_use]
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }

        let left = i64::from(self.x).min(i64::from(other.x));
        let top = i64::from(self.y).min(i64::from(other.y));
        let right = (i64::from(self.x) + i64::from(self.width))
            .max(i64::from(other.x) + i64::from(other.width));
        let bottom = (i64::from(self.y) + i64::from(self.height))
            .max(i64::from(other.y) + i64::from(other.height));

        Rectangle::new(
            saturate(left),
            saturate(top),
            saturate(right - left),
            saturate(bottom - top),
        )
    }

    /// Return this rectangle moved by `offset`.
    #[must_use]
    pub const fn translate(&self, offset: Dimension) -> Rectangle {
        Rectangle::from_parts(self.location().translate(offset), self.size())
    }
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {} {}x{}]", self.x, self.y, self.width, self.height)
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
