use crate::{coord::Coord, into_iter, mesh::GenerateLowPolyError, triangle::Triangle};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use triangulation::{Delaunay, Point};

/// Delaunay triangulation of a point set with point location queries.
///
/// Points lying exactly on an edge or corner shared by several triangles belong to the triangle
/// with the lowest index.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    points: Vec<Coord>,
    triangles: Vec<Triangle>,
}

impl Triangulation {
    /// Triangulate points.
    ///
    /// Repeated points are collapsed into their first occurrence, so triangles always refer to
    /// indices of the `points` slice.
    ///
    /// # Arguments
    /// * `points` - Points to triangulate.
    ///
    /// # Returns
    /// Triangulation or error when there are not enough distinct non-collinear points.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// let points = corner_points(4, 3);
    /// let triangulation = Triangulation::new(&points).unwrap();
    /// assert_eq!(triangulation.triangles().len(), 2);
    /// assert!(Triangulation::new(&points[..2]).is_err());
    /// ```
    pub fn new(points: &[Coord]) -> Result<Self, GenerateLowPolyError> {
        let mut unique = Vec::with_capacity(points.len());
        let mut seen = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            seen.entry((p.x.to_bits(), p.y.to_bits())).or_insert_with(|| {
                unique.push(i);
                i
            });
        }
        if unique.len() < 3 {
            return Err(GenerateLowPolyError::FailedTriangulation);
        }
        let dpoints = unique
            .iter()
            .map(|i| Point::new(points[*i].x, points[*i].y))
            .collect::<Vec<_>>();
        let delaunay = match Delaunay::new(&dpoints) {
            Some(delaunay) => delaunay,
            None => return Err(GenerateLowPolyError::FailedTriangulation),
        };
        let triangles = delaunay
            .dcel
            .vertices
            .chunks(3)
            .map(|t| [unique[t[0]], unique[t[1]], unique[t[2]]].into())
            .collect::<Vec<Triangle>>();
        // collinear input comes back as zero-area triangles only
        let has_area = triangles.iter().any(|t| {
            let [a, b, c] = t.corners(points);
            Coord::orientation(a, b, c) != 0.0
        });
        if !has_area {
            return Err(GenerateLowPolyError::FailedTriangulation);
        }
        debug!(
            "Triangulated {} points ({} distinct) into {} triangles",
            points.len(),
            unique.len(),
            triangles.len()
        );
        Ok(Self {
            points: points.to_vec(),
            triangles,
        })
    }

    /// Returns triangulated points.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Returns triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Consumes triangulation and returns its points and triangles.
    pub fn into_parts(self) -> (Vec<Coord>, Vec<Triangle>) {
        (self.points, self.triangles)
    }

    /// Find triangle containing given point.
    ///
    /// # Returns
    /// Index of the lowest triangle containing the point or `None` if it lies outside of the
    /// triangulated area.
    pub fn locate(&self, point: Coord) -> Option<usize> {
        self.triangles
            .iter()
            .position(|t| t.contains(&self.points, point))
    }

    /// Find owning triangle of every pixel of the canvas.
    ///
    /// Gives exactly the same answers as calling [`Triangulation::locate`] for each pixel.
    ///
    /// # Arguments
    /// * `width` - Canvas width.
    /// * `height` - Canvas height.
    pub fn locate_pixels(&self, width: usize, height: usize) -> PixelIndex {
        if width == 0 || height == 0 {
            return PixelIndex {
                width,
                height,
                owners: vec![None; width * height],
            };
        }
        let bounds = self
            .triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.corners(&self.points);
                let fx = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
                let fy = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
                let tx = (a.x.max(b.x).max(c.x).ceil().max(0.0) as usize).min(width - 1);
                let ty = (a.y.max(b.y).max(c.y).ceil().max(0.0) as usize).min(height - 1);
                (fx, fy, tx, ty)
            })
            .collect::<Vec<_>>();
        let owners = into_iter!(0..height)
            .map(|row| {
                let mut line = vec![None; width];
                for (index, (triangle, (fx, fy, tx, ty))) in
                    self.triangles.iter().zip(bounds.iter()).enumerate()
                {
                    if row < *fy || row > *ty {
                        continue;
                    }
                    for col in *fx..=*tx {
                        let owner = &mut line[col];
                        if owner.is_none()
                            && triangle.contains(&self.points, Coord::pixel(col, row))
                        {
                            *owner = Some(index);
                        }
                    }
                }
                line
            })
            .collect::<Vec<_>>()
            .concat();
        PixelIndex {
            width,
            height,
            owners,
        }
    }
}

/// Owning triangle of each canvas pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelIndex {
    width: usize,
    height: usize,
    owners: Vec<Option<usize>>,
}

impl PixelIndex {
    /// Returns width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns owners buffer, row by row.
    pub fn owners(&self) -> &[Option<usize>] {
        &self.owners
    }

    /// Returns owning triangle of the pixel or `None` when pixel is outside of triangulation
    /// or canvas.
    pub fn owner(&self, col: usize, row: usize) -> Option<usize> {
        if col < self.width && row < self.height {
            self.owners[row * self.width + col]
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{corner_points, PointSet};

    fn scattered_points(width: usize, height: usize, count: usize) -> Vec<Coord> {
        // deterministic pseudo random scatter
        let samples = (0..count)
            .map(|i| {
                let x = (i * 7919 + 13) % width;
                let y = (i * 104_729 + 7) % height;
                Coord::pixel(x, y)
            })
            .collect::<Vec<_>>();
        PointSet::new(width, height, samples).points().to_vec()
    }

    #[test]
    fn test_corners_cover_canvas() {
        let triangulation = Triangulation::new(&corner_points(7, 5)).unwrap();
        assert_eq!(triangulation.triangles().len(), 2);
        let index = triangulation.locate_pixels(7, 5);
        assert!(index.owners().iter().all(|o| o.is_some()));
        assert_eq!(triangulation.locate(Coord::new(-1.0, 0.0)), None);
        assert_eq!(triangulation.locate(Coord::new(7.0, 0.0)), None);
        assert_eq!(index.owner(7, 0), None);
    }

    #[test]
    fn test_every_pixel_located() {
        let points = scattered_points(40, 30, 60);
        let triangulation = Triangulation::new(&points).unwrap();
        assert!(triangulation.triangles().len() > 2);
        let index = triangulation.locate_pixels(40, 30);
        for row in 0..30 {
            for col in 0..40 {
                let owner = index.owner(col, row);
                assert!(owner.is_some());
                assert_eq!(owner, triangulation.locate(Coord::pixel(col, row)));
            }
        }
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let mut points = corner_points(5, 5).to_vec();
        points.push(Coord::new(0.0, 0.0));
        points.push(Coord::new(2.0, 2.0));
        points.push(Coord::new(2.0, 2.0));
        let triangulation = Triangulation::new(&points).unwrap();
        assert_eq!(triangulation.points().len(), 7);
        let used = triangulation
            .triangles()
            .iter()
            .flat_map(|t| vec![t.a, t.b, t.c])
            .collect::<Vec<_>>();
        assert!(used.contains(&5));
        assert!(!used.contains(&4));
        assert!(!used.contains(&6));
        assert_eq!(triangulation.triangles().len(), 4);
    }

    #[test]
    fn test_shared_edge_goes_to_lowest_index() {
        let triangulation = Triangulation::new(&corner_points(6, 6)).unwrap();
        let triangles = triangulation.triangles();
        // pixels on the diagonal are shared by both triangles
        for row in 0..6 {
            for col in 0..6 {
                let p = Coord::pixel(col, row);
                let inside = triangles
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.contains(triangulation.points(), p))
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>();
                assert!(!inside.is_empty());
                assert_eq!(triangulation.locate(p), Some(inside[0]));
            }
        }
    }

    #[test]
    fn test_collinear_points_fail() {
        let points = vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(2.0, 0.0),
            Coord::new(3.0, 0.0),
        ];
        assert_eq!(
            Triangulation::new(&points),
            Err(GenerateLowPolyError::FailedTriangulation)
        );
    }

    #[test]
    fn test_off_line_point_makes_collinear_points_valid() {
        let mut points = (0..4)
            .map(|i| Coord::new(i as f32, 0.0))
            .collect::<Vec<_>>();
        assert!(Triangulation::new(&points[..3]).is_err());
        points.push(Coord::new(1.5, 2.0));
        let triangulation = Triangulation::new(&points).unwrap();
        assert!(!triangulation.triangles().is_empty());
        assert!(triangulation.locate(Coord::new(1.5, 1.0)).is_some());
    }

    #[test]
    fn test_deterministic() {
        let points = scattered_points(64, 48, 200);
        let a = Triangulation::new(&points).unwrap();
        let b = Triangulation::new(&points).unwrap();
        assert_eq!(a, b);
    }
}
