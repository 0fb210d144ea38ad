//! Board geometry
//!
//! Maps pointer coordinates to squares and squares to pixel centers. The board
//! is drawn with rank 8 at the top and file a on the left.

use std::ops::{Add, Sub};

use crate::game::types::Square;

/// A position in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other`, `t` in 0..=1
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Placement of the 8x8 grid on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub left: f32,
    pub top: f32,
    /// Edge length of one square
    pub cell: f32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::new(0.0, 0.0, 64.0)
    }
}

impl BoardGeometry {
    pub fn new(left: f32, top: f32, cell: f32) -> Self {
        Self { left, top, cell }
    }

    /// Edge length of the whole board
    pub fn size(&self) -> f32 {
        self.cell * 8.0
    }

    /// Square under a point; edges are inclusive, anything outside is `None`
    pub fn square_at(&self, point: Point) -> Option<Square> {
        if self.cell <= 0.0 {
            return None;
        }
        let dx = point.x - self.left;
        let dy = point.y - self.top;
        if !(0.0..=self.size()).contains(&dx) || !(0.0..=self.size()).contains(&dy) {
            return None;
        }
        // The far edge belongs to the last cell.
        let column = ((dx / self.cell).floor() as u8).min(7);
        let row = ((dy / self.cell).floor() as u8).min(7);
        Square::from_indices(column, 7 - row)
    }

    /// Pixel center of a square
    pub fn center_of(&self, square: Square) -> Point {
        let column = f32::from(square.file.index());
        let row = f32::from(7 - square.rank.index());
        Point::new(
            self.left + (column + 0.5) * self.cell,
            self.top + (row + 0.5) * self.cell,
        )
    }
}
