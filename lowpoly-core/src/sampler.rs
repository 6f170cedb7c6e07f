use crate::{coord::Coord, importance::ImportanceMap, settings::SamplerSettings, Scalar};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Draw points with density following importance map (rejection sampling).
///
/// Each trial picks a uniformly random pixel and keeps it when a uniform random value is lower
/// than the importance of that pixel. Accepted points are returned in the order they were drawn,
/// so the same map and settings always produce the same points.
///
/// # Arguments
/// * `map` - Importance map.
/// * `settings` - Sampling settings.
///
/// # Returns
/// Accepted points (not including canvas corners).
///
/// # Examples
/// ```
/// use lowpoly_core::prelude::*;
///
/// let map = ImportanceMap::new(4, 4, vec![1.0; 16]).unwrap();
/// let settings = SamplerSettings { trials: 100, seed: 0 };
/// assert_eq!(sample_points(&map, &settings).len(), 100);
///
/// let map = ImportanceMap::new(4, 4, vec![0.0; 16]).unwrap();
/// assert!(sample_points(&map, &settings).is_empty());
/// ```
pub fn sample_points(map: &ImportanceMap, settings: &SamplerSettings) -> Vec<Coord> {
    let width = map.width();
    let height = map.height();
    if width == 0 || height == 0 {
        return vec![];
    }
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let points = (0..settings.trials)
        .filter_map(|_| {
            let col = rng.random_range(0..width);
            let row = rng.random_range(0..height);
            let chance = rng.random::<Scalar>();
            if chance < map.value_at(col, row) {
                Some(Coord::pixel(col, row))
            } else {
                None
            }
        })
        .collect::<Vec<_>>();
    debug!(
        "Accepted {} of {} sampled points (seed: {})",
        points.len(),
        settings.trials,
        settings.seed
    );
    points
}

/// Canvas corners in order: top-left, bottom-left, top-right, bottom-right.
///
/// # Examples
/// ```
/// use lowpoly_core::prelude::*;
///
/// assert_eq!(
///     corner_points(3, 2),
///     [
///         Coord::new(0.0, 0.0),
///         Coord::new(0.0, 1.0),
///         Coord::new(2.0, 0.0),
///         Coord::new(2.0, 1.0),
///     ],
/// );
/// ```
pub fn corner_points(width: usize, height: usize) -> [Coord; 4] {
    let right = width.saturating_sub(1);
    let bottom = height.saturating_sub(1);
    [
        Coord::pixel(0, 0),
        Coord::pixel(0, bottom),
        Coord::pixel(right, 0),
        Coord::pixel(right, bottom),
    ]
}

/// Ordered mesh points: canvas corners followed by sampled points.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Coord>,
}

impl PointSet {
    /// Create new point set.
    ///
    /// # Arguments
    /// * `width` - Canvas width.
    /// * `height` - Canvas height.
    /// * `samples` - Sampled points, in draw order.
    pub fn new(width: usize, height: usize, samples: Vec<Coord>) -> Self {
        let mut points = Vec::with_capacity(samples.len() + 4);
        points.extend_from_slice(&corner_points(width, height));
        points.extend(samples);
        Self { points }
    }

    /// Returns all points.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Returns number of points, corners included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Tells if there are no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns first `count` points, or all of them when there are fewer.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// let set = PointSet::new(4, 4, vec![Coord::new(1.0, 2.0)]);
    /// assert_eq!(set.prefix(2).len(), 2);
    /// assert_eq!(set.prefix(100).len(), 5);
    /// ```
    pub fn prefix(&self, count: usize) -> &[Coord] {
        &self.points[..count.min(self.points.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_map() -> ImportanceMap {
        let width = 32;
        let height = 8;
        let data = (0..(width * height))
            .map(|i| (i % width) as Scalar / (width - 1) as Scalar)
            .collect::<Vec<_>>();
        ImportanceMap::new(width, height, data).unwrap()
    }

    #[test]
    fn test_deterministic() {
        let map = gradient_map();
        let settings = SamplerSettings {
            trials: 5000,
            seed: 0,
        };
        let a = sample_points(&map, &settings);
        let b = sample_points(&map, &settings);
        assert!(!a.is_empty());
        assert_eq!(a, b);
        let c = sample_points(
            &map,
            &SamplerSettings {
                trials: 5000,
                seed: 1,
            },
        );
        assert_ne!(a, c);
    }

    #[test]
    fn test_longer_run_extends_shorter_one() {
        let map = gradient_map();
        let short = sample_points(
            &map,
            &SamplerSettings {
                trials: 1000,
                seed: 0,
            },
        );
        let long = sample_points(
            &map,
            &SamplerSettings {
                trials: 3000,
                seed: 0,
            },
        );
        assert_eq!(&long[..short.len()], short.as_slice());
    }

    #[test]
    fn test_density_follows_importance() {
        let map = gradient_map();
        let points = sample_points(
            &map,
            &SamplerSettings {
                trials: 20000,
                seed: 0,
            },
        );
        let left = points.iter().filter(|p| p.x < 16.0).count();
        let right = points.len() - left;
        assert!(right > left * 2);
        assert!(points.iter().all(|p| p.x != 0.0));
        assert!(points
            .iter()
            .all(|p| p.x >= 0.0 && p.x < 32.0 && p.y >= 0.0 && p.y < 8.0));
        assert!(points
            .iter()
            .all(|p| p.x.fract() == 0.0 && p.y.fract() == 0.0));
    }

    #[test]
    fn test_corners_come_first() {
        let samples = vec![Coord::new(3.0, 3.0), Coord::new(1.0, 2.0)];
        let set = PointSet::new(10, 6, samples.clone());
        assert_eq!(set.len(), 6);
        assert_eq!(
            &set.points()[..4],
            &[
                Coord::new(0.0, 0.0),
                Coord::new(0.0, 5.0),
                Coord::new(9.0, 0.0),
                Coord::new(9.0, 5.0),
            ]
        );
        assert_eq!(&set.points()[4..], samples.as_slice());
        assert_eq!(set.prefix(0).len(), 0);
    }
}
