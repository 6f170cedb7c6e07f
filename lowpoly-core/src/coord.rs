use crate::Scalar;
use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Point coordinate.
///
/// # Examples
/// ```
/// use lowpoly_core::prelude::*;
///
/// let a = Coord::new(0.0, 0.0);
/// let b = Coord::new(2.0, 0.0);
/// let c = Coord::new(0.0, 2.0);
/// assert_eq!(b - a, Coord::new(2.0, 0.0));
/// assert_eq!(Coord::orientation(a, b, c), 4.0);
/// assert_eq!(Coord::orientation(a, c, b), -4.0);
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// X value.
    pub x: Scalar,
    /// Y value.
    pub y: Scalar,
}

impl Coord {
    /// Create new point coordinate.
    ///
    /// # Arguments
    /// * `x` - X value.
    /// * `y` - Y value.
    #[inline]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    /// Create coordinate of the pixel at given column and row.
    #[inline]
    pub fn pixel(col: usize, row: usize) -> Self {
        Self::new(col as Scalar, row as Scalar)
    }

    /// Twice the signed area of triangle `abc`.
    ///
    /// Computed in `f64` so it stays exact for pixel coordinates.
    /// Positive when `c` lies on the left side of `a -> b` in a y-up frame.
    #[inline]
    pub fn orientation(a: Self, b: Self, c: Self) -> f64 {
        let (ax, ay) = (a.x as f64, a.y as f64);
        let (bx, by) = (b.x as f64, b.y as f64);
        let (cx, cy) = (c.x as f64, c.y as f64);
        (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
    }
}

impl Sub for Coord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}
