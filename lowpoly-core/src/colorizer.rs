use crate::{delaunay::Triangulation, source::SourceImage, Color};
use log::debug;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct ColorAccumulator {
    sum: [u64; 3],
    count: u64,
}

impl ColorAccumulator {
    fn add(&mut self, [r, g, b]: Color) {
        self.sum[0] += r as u64;
        self.sum[1] += g as u64;
        self.sum[2] += b as u64;
        self.count += 1;
    }

    fn mean(&self) -> Option<Color> {
        if self.count == 0 {
            return None;
        }
        let [r, g, b] = self.sum;
        Some([
            (r / self.count).min(255) as u8,
            (g / self.count).min(255) as u8,
            (b / self.count).min(255) as u8,
        ])
    }
}

/// Representative color of every triangle of a triangulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TriangleColors {
    colors: Vec<Option<Color>>,
}

impl TriangleColors {
    /// Average source pixels covered by each triangle.
    ///
    /// Every pixel contributes to exactly one triangle, the one reported by point location.
    /// Triangles that own no pixel get no color.
    ///
    /// # Arguments
    /// * `triangulation` - Triangulation covering the source canvas.
    /// * `source` - Source image.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// let source = SourceImage::filled(3, 3, [10, 20, 30]);
    /// let triangulation = Triangulation::new(&corner_points(3, 3)).unwrap();
    /// let colors = TriangleColors::new(&triangulation, &source);
    /// assert_eq!(colors.colors(), &[Some([10, 20, 30]), Some([10, 20, 30])]);
    /// ```
    pub fn new(triangulation: &Triangulation, source: &SourceImage) -> Self {
        let width = source.width();
        let height = source.height();
        let mut accumulators = vec![ColorAccumulator::default(); triangulation.triangles().len()];
        let index = triangulation.locate_pixels(width, height);
        let mut outside = 0;
        for (owner, color) in index.owners().iter().zip(source.pixels().iter()) {
            match owner {
                Some(owner) => accumulators[*owner].add(*color),
                None => outside += 1,
            }
        }
        let colors = accumulators
            .iter()
            .map(ColorAccumulator::mean)
            .collect::<Vec<_>>();
        debug!(
            "Colored {} of {} triangles ({} pixels outside of mesh)",
            colors.iter().filter(|c| c.is_some()).count(),
            colors.len(),
            outside
        );
        Self { colors }
    }

    /// Returns color slot of every triangle.
    pub fn colors(&self) -> &[Option<Color>] {
        &self.colors
    }

    /// Returns color of given triangle.
    pub fn color(&self, triangle: usize) -> Option<Color> {
        self.colors.get(triangle).copied().flatten()
    }

    /// Consumes and returns color slots.
    pub fn into_inner(self) -> Vec<Option<Color>> {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coord::Coord, sampler::corner_points};

    #[test]
    fn test_mean_truncates() {
        let mut acc = ColorAccumulator::default();
        assert_eq!(acc.mean(), None);
        acc.add([0, 255, 10]);
        acc.add([1, 254, 11]);
        acc.add([1, 255, 11]);
        assert_eq!(acc.mean(), Some([0, 254, 10]));
    }

    #[test]
    fn test_known_triangle_gets_exact_color() {
        let width = 20;
        let height = 20;
        let mut points = corner_points(width, height).to_vec();
        points.extend([
            Coord::new(4.0, 4.0),
            Coord::new(15.0, 4.0),
            Coord::new(9.0, 15.0),
        ]);
        let triangulation = Triangulation::new(&points).unwrap();
        let inner = triangulation
            .triangles()
            .iter()
            .position(|t| {
                let mut ids = [t.a, t.b, t.c];
                ids.sort_unstable();
                ids == [4, 5, 6]
            })
            .expect("inner triangle must be part of triangulation");
        let index = triangulation.locate_pixels(width, height);
        let mut source = SourceImage::filled(width, height, [0, 0, 255]);
        for row in 0..height {
            for col in 0..width {
                if index.owner(col, row) == Some(inner) {
                    source.set_pixel(col, row, [200, 100, 50]);
                }
            }
        }
        let colors = TriangleColors::new(&triangulation, &source);
        assert_eq!(colors.color(inner), Some([200, 100, 50]));
        for i in 0..triangulation.triangles().len() {
            if i != inner {
                assert_eq!(colors.color(i), Some([0, 0, 255]));
            }
        }
    }

    #[test]
    fn test_every_pixel_counted_once() {
        let width = 9;
        let height = 7;
        let data = (0..(width * height * 3))
            .map(|i| (i * 37 % 256) as u8)
            .collect::<Vec<_>>();
        let source = SourceImage::new(width, height, data).unwrap();
        let mut points = corner_points(width, height).to_vec();
        points.extend([Coord::new(3.0, 2.0), Coord::new(6.0, 5.0), Coord::new(2.0, 5.0)]);
        let triangulation = Triangulation::new(&points).unwrap();
        let index = triangulation.locate_pixels(width, height);
        let colors = TriangleColors::new(&triangulation, &source);
        for (i, color) in colors.colors().iter().enumerate() {
            let owned = (0..(width * height))
                .filter(|p| index.owners()[*p] == Some(i))
                .map(|p| source.pixels()[p])
                .collect::<Vec<_>>();
            if owned.is_empty() {
                assert_eq!(*color, None);
                continue;
            }
            let mut expected = [0u64; 3];
            for c in &owned {
                for k in 0..3 {
                    expected[k] += c[k] as u64;
                }
            }
            let n = owned.len() as u64;
            assert_eq!(
                *color,
                Some([
                    (expected[0] / n) as u8,
                    (expected[1] / n) as u8,
                    (expected[2] / n) as u8,
                ])
            );
        }
        let total = index.owners().iter().filter(|o| o.is_some()).count();
        assert_eq!(total, width * height);
    }
}
