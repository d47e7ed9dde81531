//! Integer screen geometry shared by the styling layer

use serde::Deserialize;

/// A point in screen coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between two points, `t` in 0.0..=1.0
    pub fn lerp(from: Point, to: Point, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        Point {
            x: (from.x as f32 + (to.x - from.x) as f32 * t).round() as i32,
            y: (from.y as f32 + (to.y - from.y) as f32 * t).round() as i32,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Translation applied to an area, e.g. a shadow offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "[i32; 2]")]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl From<[i32; 2]> for Offset {
    fn from([dx, dy]: [i32; 2]) -> Self {
        Self { dx, dy }
    }
}

/// Axis-aligned rectangle `(x, y, width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Half-open hit test: the right and bottom edges are outside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The same rectangle moved by `offset`
    pub fn translate(&self, offset: Offset) -> Rect {
        Rect {
            x: self.x + offset.dx,
            y: self.y + offset.dy,
            ..*self
        }
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}
