use crate::{
    colorizer::TriangleColors,
    coord::Coord,
    delaunay::Triangulation,
    importance::ImportanceMap,
    mesh::{GenerateLowPolyError, LowPolyMesh},
    raster::{rasterize, Frame},
    sampler::{sample_points, PointSet},
    settings::GenerateLowPolySettings,
    source::SourceImage,
    Scalar,
};
use log::{debug, info};

/// Number of mesh points used for given detail level: `5 + N + 2 * N^2`.
///
/// # Examples
/// ```
/// use lowpoly_core::prelude::*;
///
/// assert_eq!(vertex_budget(0), 5);
/// assert_eq!(vertex_budget(1), 8);
/// assert_eq!(vertex_budget(45), 4100);
/// ```
pub fn vertex_budget(level: usize) -> usize {
    5 + level + 2 * level * level
}

/// Generates low-poly renders of single source image.
///
/// Importance map and points are computed once, every detail level uses a prefix of the same
/// point set, so lower levels are coarser versions of higher ones.
#[derive(Debug, Clone, PartialEq)]
pub struct LowPolyGenerator {
    source: SourceImage,
    map: ImportanceMap,
    points: PointSet,
    settings: GenerateLowPolySettings,
}

impl LowPolyGenerator {
    /// Create new generator.
    ///
    /// # Arguments
    /// * `source` - Source image.
    /// * `settings` - Settings.
    ///
    /// # Returns
    /// New generator instance or error when source image is smaller than 2x2 pixels.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// let source = SourceImage::filled(16, 8, [1, 2, 3]);
    /// let generator = LowPolyGenerator::new(source, GenerateLowPolySettings::default()).unwrap();
    /// assert_eq!(generator.points().len(), 4);
    /// let frame = generator.render(45).unwrap();
    /// assert_eq!((frame.width(), frame.height()), (16, 8));
    ///
    /// let thin = SourceImage::filled(16, 1, [1, 2, 3]);
    /// assert_eq!(
    ///     LowPolyGenerator::new(thin, GenerateLowPolySettings::default()),
    ///     Err(GenerateLowPolyError::DegenerateCanvas { width: 16, height: 1 }),
    /// );
    /// ```
    pub fn new(
        source: SourceImage,
        settings: GenerateLowPolySettings,
    ) -> Result<Self, GenerateLowPolyError> {
        let width = source.width();
        let height = source.height();
        if width < 2 || height < 2 {
            return Err(GenerateLowPolyError::DegenerateCanvas { width, height });
        }
        let map = ImportanceMap::from_source(&source, &settings.importance);
        let samples = sample_points(&map, &settings.sampler);
        let points = PointSet::new(width, height, samples);
        debug!("Point set of {} points (corners included)", points.len());
        Ok(Self {
            source,
            map,
            points,
            settings,
        })
    }

    /// Get source image.
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Get importance map.
    pub fn map(&self) -> &ImportanceMap {
        &self.map
    }

    /// Get all sampled points.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Get settings.
    pub fn settings(&self) -> &GenerateLowPolySettings {
        &self.settings
    }

    /// Points used for given detail level, clamped to the number of available points.
    pub fn points_for_level(&self, level: usize) -> &[Coord] {
        self.points.prefix(vertex_budget(level))
    }

    /// Build colored mesh for given detail level.
    ///
    /// # Arguments
    /// * `level` - Detail level.
    ///
    /// # Returns
    /// Colored mesh or error.
    pub fn mesh(&self, level: usize) -> Result<LowPolyMesh, GenerateLowPolyError> {
        let budget = vertex_budget(level);
        let points = self.points_for_level(level);
        info!(
            "No. of vertices for N={}: {} ({} available)",
            level,
            budget,
            points.len()
        );
        let triangulation = Triangulation::new(points)?;
        let colors = TriangleColors::new(&triangulation, &self.source);
        Ok(LowPolyMesh::new(triangulation, colors))
    }

    /// Render single frame for given detail level.
    ///
    /// # Arguments
    /// * `level` - Detail level.
    ///
    /// # Returns
    /// Rendered frame or error.
    pub fn render(&self, level: usize) -> Result<Frame, GenerateLowPolyError> {
        let mesh = self.mesh(level)?;
        Ok(rasterize(&mesh, self.source.width(), self.source.height()))
    }

    /// Render frames for all detail levels, in given order.
    ///
    /// # Arguments
    /// * `levels` - Detail levels.
    ///
    /// # Returns
    /// Rendered frames or error.
    pub fn render_sequence(&self, levels: &[usize]) -> Result<Vec<Frame>, GenerateLowPolyError> {
        let mut frames = Vec::with_capacity(levels.len());
        self.render_sequence_into(levels, |_, frame| {
            frames.push(frame);
            Ok::<_, GenerateLowPolyError>(())
        })?;
        Ok(frames)
    }

    /// Render frames for all detail levels and hand each of them over as soon as it is ready.
    ///
    /// # Arguments
    /// * `levels` - Detail levels.
    /// * `f` - Frame consumer. Signature: `fn(level, frame)`.
    ///
    /// # Returns
    /// Ok or first error produced either by rendering or by consumer.
    pub fn render_sequence_into<F, E>(&self, levels: &[usize], mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, Frame) -> Result<(), E>,
        E: From<GenerateLowPolyError>,
    {
        for level in levels {
            let frame = self.render(*level)?;
            f(*level, frame)?;
        }
        Ok(())
    }

    /// Render frames for all detail levels, reporting progress.
    ///
    /// # Arguments
    /// * `levels` - Detail levels.
    /// * `f` - Callback triggered after every frame. Signature: `fn(progress, limit, factor)`.
    ///
    /// # Returns
    /// Rendered frames or error.
    pub fn render_sequence_tracked<F>(
        &self,
        levels: &[usize],
        mut f: F,
    ) -> Result<Vec<Frame>, GenerateLowPolyError>
    where
        F: FnMut(usize, usize, Scalar),
    {
        let limit = levels.len();
        let mut frames = Vec::with_capacity(limit);
        f(0, limit, 0.0);
        self.render_sequence_into(levels, |_, frame| {
            frames.push(frame);
            let current = frames.len();
            f(current, limit, current as Scalar / limit as Scalar);
            Ok::<_, GenerateLowPolyError>(())
        })?;
        Ok(frames)
    }
}
