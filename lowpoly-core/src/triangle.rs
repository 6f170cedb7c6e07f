use crate::coord::Coord;
use serde::{Deserialize, Serialize};

/// Triangle.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    /// First point.
    pub a: usize,
    /// Second point.
    pub b: usize,
    /// Third point.
    pub c: usize,
}

impl Triangle {
    /// Returns corner coordinates of this triangle.
    ///
    /// # Arguments
    /// * `points` - Points the triangle indices refer to.
    pub fn corners(&self, points: &[Coord]) -> [Coord; 3] {
        [points[self.a], points[self.b], points[self.c]]
    }

    /// Returns true if triangle contains the point, edges and corners included.
    /// Degenerate (zero area) triangles contain nothing.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// let points = [Coord::new(0.0, 0.0), Coord::new(4.0, 0.0), Coord::new(0.0, 4.0)];
    /// let triangle = Triangle::from([0, 1, 2]);
    /// assert!(triangle.contains(&points, Coord::new(1.0, 1.0)));
    /// assert!(triangle.contains(&points, Coord::new(2.0, 2.0)));
    /// assert!(!triangle.contains(&points, Coord::new(3.0, 3.0)));
    /// ```
    pub fn contains(&self, points: &[Coord], point: Coord) -> bool {
        let [a, b, c] = self.corners(points);
        let area = Coord::orientation(a, b, c);
        if area == 0.0 {
            return false;
        }
        Coord::orientation(a, b, point) * area >= 0.0
            && Coord::orientation(b, c, point) * area >= 0.0
            && Coord::orientation(c, a, point) * area >= 0.0
    }
}

impl From<[usize; 3]> for Triangle {
    fn from([a, b, c]: [usize; 3]) -> Self {
        Self { a, b, c }
    }
}
