use crate::{
    colorizer::TriangleColors, coord::Coord, delaunay::Triangulation, source::SourceImageError,
    triangle::Triangle, Color,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error thrown during low-poly generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateLowPolyError {
    /// Source image error.
    SourceImage(SourceImageError),
    /// Canvas is too thin to be covered with triangles.
    DegenerateCanvas {
        /// Canvas width.
        width: usize,
        /// Canvas height.
        height: usize,
    },
    /// Failed points triangulation.
    FailedTriangulation,
}

impl fmt::Display for GenerateLowPolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceImage(error) => write!(f, "Invalid source image: {error}"),
            Self::DegenerateCanvas { width, height } => write!(
                f,
                "Canvas {width}x{height} is too small, it needs at least 2x2 pixels"
            ),
            Self::FailedTriangulation => write!(f, "Failed points triangulation"),
        }
    }
}

impl std::error::Error for GenerateLowPolyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceImage(error) => Some(error),
            _ => None,
        }
    }
}

impl From<SourceImageError> for GenerateLowPolyError {
    fn from(error: SourceImageError) -> Self {
        Self::SourceImage(error)
    }
}

/// Colored triangle mesh.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowPolyMesh {
    /// List of points.
    pub points: Vec<Coord>,
    /// List of triangles.
    pub triangles: Vec<Triangle>,
    /// Color of each triangle, `None` for triangles that do not cover any pixel.
    pub colors: Vec<Option<Color>>,
}

impl LowPolyMesh {
    /// Create mesh out of triangulation and its triangle colors.
    pub fn new(triangulation: Triangulation, colors: TriangleColors) -> Self {
        let (points, triangles) = triangulation.into_parts();
        Self {
            points,
            triangles,
            colors: colors.into_inner(),
        }
    }

    /// Returns iterator over triangles that have color assigned.
    pub fn colored_triangles(&self) -> impl Iterator<Item = (&Triangle, Color)> + '_ {
        self.triangles
            .iter()
            .zip(self.colors.iter())
            .filter_map(|(t, c)| c.map(|c| (t, c)))
    }
}
