use crate::{coord::Coord, mesh::LowPolyMesh, Color, Scalar};

/// Rendered RGB frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Create black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Returns width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns raw interleaved RGB bytes, row by row.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes frame and returns its raw RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns pixel at given column and row or `None` if out of bounds.
    pub fn pixel(&self, col: usize, row: usize) -> Option<Color> {
        if col < self.width && row < self.height {
            let i = (row * self.width + col) * 3;
            Some([self.data[i], self.data[i + 1], self.data[i + 2]])
        } else {
            None
        }
    }

    fn put_pixel(&mut self, x: isize, y: isize, color: Color) {
        if x >= 0 && x < self.width as _ && y >= 0 && y < self.height as _ {
            let i = (y as usize * self.width + x as usize) * 3;
            self.data[i..(i + 3)].copy_from_slice(&color);
        }
    }
}

/// Draw colored mesh triangles in order, each filled and outlined with its color.
/// Triangles without color are skipped.
///
/// # Arguments
/// * `mesh` - Colored mesh.
/// * `width` - Canvas width.
/// * `height` - Canvas height.
///
/// # Examples
/// ```
/// use lowpoly_core::prelude::*;
///
/// let triangulation = Triangulation::new(&corner_points(4, 4)).unwrap();
/// let source = SourceImage::filled(4, 4, [7, 8, 9]);
/// let colors = TriangleColors::new(&triangulation, &source);
/// let frame = rasterize(&LowPolyMesh::new(triangulation, colors), 4, 4);
/// assert_eq!(frame.data(), SourceImage::filled(4, 4, [7, 8, 9]).pixels().concat());
/// ```
pub fn rasterize(mesh: &LowPolyMesh, width: usize, height: usize) -> Frame {
    let mut frame = Frame::new(width, height);
    if width == 0 || height == 0 {
        return frame;
    }
    for (triangle, color) in mesh.colored_triangles() {
        let [a, b, c] = triangle.corners(&mesh.points);
        let fx = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let fy = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let tx = (a.x.max(b.x).max(c.x).ceil().max(0.0) as usize).min(width - 1);
        let ty = (a.y.max(b.y).max(c.y).ceil().max(0.0) as usize).min(height - 1);
        for row in fy..=ty {
            for col in fx..=tx {
                if triangle.contains(&mesh.points, Coord::pixel(col, row)) {
                    frame.put_pixel(col as _, row as _, color);
                }
            }
        }
        apply_line_on_frame(&mut frame, a, b, color);
        apply_line_on_frame(&mut frame, b, c, color);
        apply_line_on_frame(&mut frame, c, a, color);
    }
    frame
}

fn apply_line_on_frame(frame: &mut Frame, from: Coord, to: Coord, color: Color) {
    let fx = from.x.round() as isize;
    let fy = from.y.round() as isize;
    let tx = to.x.round() as isize;
    let ty = to.y.round() as isize;
    let dx = tx - fx;
    let dy = ty - fy;
    if dx == 0 && dy == 0 {
        frame.put_pixel(fx, fy, color);
        return;
    }
    if dx.abs() > dy.abs() {
        let (fx, tx, fy, ty) = paired_min_max(fx, tx, fy, ty);
        let slope = (ty - fy) as Scalar / (tx - fx) as Scalar;
        for x in fx..=tx {
            let y = fy + ((x - fx) as Scalar * slope).round() as isize;
            frame.put_pixel(x, y, color);
        }
    } else {
        let (fy, ty, fx, tx) = paired_min_max(fy, ty, fx, tx);
        let slope = (tx - fx) as Scalar / (ty - fy) as Scalar;
        for y in fy..=ty {
            let x = fx + ((y - fy) as Scalar * slope).round() as isize;
            frame.put_pixel(x, y, color);
        }
    }
}

fn paired_min_max(a1: isize, b1: isize, a2: isize, b2: isize) -> (isize, isize, isize, isize) {
    if a1 < b1 {
        (a1, b1, a2, b2)
    } else {
        (b1, a1, b2, a2)
    }
}
