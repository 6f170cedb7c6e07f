use crate::{into_iter, settings::ImportanceSettings, source::SourceImage, Scalar};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error thrown during importance map creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceMapError {
    /// Wrong data length.
    /// (provided, expected)
    WrongDataLength(usize, usize),
}

impl fmt::Display for ImportanceMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongDataLength(provided, expected) => write!(
                f,
                "Wrong importance data length: provided {provided}, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for ImportanceMapError {}

/// Importance map that contains per pixel probability of placing a mesh point.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceMap {
    width: usize,
    height: usize,
    data: Vec<Scalar>,
}

impl ImportanceMap {
    /// Create new importance map from already normalized values.
    ///
    /// # Arguments
    /// * `width` - Columns.
    /// * `height` - Rows.
    /// * `data` - Values in range from 0 to 1, row by row.
    ///
    /// # Returns
    /// Importance map or error.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// assert!(ImportanceMap::new(2, 2, vec![0.0, 0.25, 0.5, 1.0]).is_ok());
    /// assert_eq!(
    ///     ImportanceMap::new(1, 2, vec![0.0, 0.25, 0.5, 1.0]),
    ///     Err(ImportanceMapError::WrongDataLength(4, 2)),
    /// );
    /// ```
    pub fn new(width: usize, height: usize, data: Vec<Scalar>) -> Result<Self, ImportanceMapError> {
        if data.len() == width * height {
            Ok(Self {
                width,
                height,
                data,
            })
        } else {
            Err(ImportanceMapError::WrongDataLength(data.len(), width * height))
        }
    }

    /// Build importance map out of source image.
    ///
    /// Luminance is band-pass filtered (difference of two gaussian blurs), values darker than
    /// their surroundings get damped and the result is square-root compressed into 0..=1.
    ///
    /// # Arguments
    /// * `source` - Source image.
    /// * `settings` - Importance map settings.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// let flat = SourceImage::filled(8, 8, [90, 90, 90]);
    /// let map = ImportanceMap::from_source(&flat, &ImportanceSettings::default());
    /// assert!(map.values().iter().all(|v| *v == 0.0));
    /// ```
    pub fn from_source(source: &SourceImage, settings: &ImportanceSettings) -> Self {
        let width = source.width();
        let height = source.height();
        let [wr, wg, wb] = settings.luma_weights;
        let luma = source
            .pixels()
            .iter()
            .map(|[r, g, b]| *r as Scalar * wr + *g as Scalar * wg + *b as Scalar * wb)
            .collect::<Vec<_>>();
        let detail = gaussian_blur(&luma, width, height, settings.detail_sigma, settings.truncate);
        let background = gaussian_blur(
            &luma,
            width,
            height,
            settings.background_sigma,
            settings.truncate,
        );
        let diff = detail
            .iter()
            .zip(background.iter())
            .map(|(d, b)| {
                let v = d - b;
                if v < 0.0 {
                    v * settings.negative_damping
                } else {
                    v
                }
            })
            .collect::<Vec<_>>();
        let limit = diff.iter().fold(0.0 as Scalar, |a, v| a.max(v.abs()));
        debug!("Importance map {}x{}: max detail response {}", width, height, limit);
        // uniform luminance blurs into rounding noise only
        let (low, high) = luma
            .iter()
            .fold((Scalar::INFINITY, Scalar::NEG_INFINITY), |(l, h), v| {
                (l.min(*v), h.max(*v))
            });
        let flat = high <= low;
        let data = if !flat && limit > 0.0 {
            diff.iter()
                .map(|v| (v.abs() / limit).sqrt().min(1.0))
                .collect::<Vec<_>>()
        } else {
            vec![0.0; diff.len()]
        };
        Self {
            width,
            height,
            data,
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

    /// Returns values buffer.
    pub fn values(&self) -> &[Scalar] {
        &self.data
    }

    /// Returns value at given column and row or 0 if out of bounds.
    pub fn value_at(&self, col: usize, row: usize) -> Scalar {
        if col < self.width && row < self.height {
            self.data
                .get(row * self.width + col)
                .copied()
                .unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// Normalized 1D gaussian kernel of radius `floor(truncate * sigma + 0.5)`.
pub(crate) fn gaussian_kernel(sigma: Scalar, truncate: Scalar) -> Vec<Scalar> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (truncate * sigma + 0.5) as isize;
    let sigma2 = sigma * sigma;
    let mut kernel = (-radius..=radius)
        .map(|x| {
            let x = x as Scalar;
            (-0.5 * x * x / sigma2).exp()
        })
        .collect::<Vec<_>>();
    let sum = kernel.iter().sum::<Scalar>();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Maps any index onto `0..len` mirroring around the half-sample boundary:
/// `d c b a | a b c d | d c b a`.
#[inline]
pub(crate) fn reflect_index(index: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let i = index.rem_euclid(period);
    if i < len {
        i as usize
    } else {
        (period - 1 - i) as usize
    }
}

/// Separable gaussian blur with reflected borders.
pub(crate) fn gaussian_blur(
    data: &[Scalar],
    width: usize,
    height: usize,
    sigma: Scalar,
    truncate: Scalar,
) -> Vec<Scalar> {
    if width == 0 || height == 0 {
        return vec![];
    }
    let kernel = gaussian_kernel(sigma, truncate);
    let radius = (kernel.len() / 2) as isize;
    let horizontal = into_iter!(0..height)
        .map(|row| {
            let line = &data[(row * width)..((row + 1) * width)];
            (0..width)
                .map(|col| {
                    kernel
                        .iter()
                        .enumerate()
                        .map(|(k, w)| {
                            let x = reflect_index(col as isize + k as isize - radius, width);
                            line[x] * w
                        })
                        .sum::<Scalar>()
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .concat();
    let columns = into_iter!(0..width)
        .map(|col| {
            (0..height)
                .map(|row| {
                    kernel
                        .iter()
                        .enumerate()
                        .map(|(k, w)| {
                            let y = reflect_index(row as isize + k as isize - radius, height);
                            horizontal[y * width + col] * w
                        })
                        .sum::<Scalar>()
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    (0..(width * height))
        .map(|i| columns[i % width][i / width])
        .collect::<Vec<_>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_index() {
        let mapped = (-5..9).map(|i| reflect_index(i, 4)).collect::<Vec<_>>();
        assert_eq!(mapped, vec![3, 3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0, 0]);
        assert_eq!(reflect_index(-121, 2), 0);
        assert_eq!(reflect_index(0, 1), 0);
        assert_eq!(reflect_index(-7, 1), 0);
    }

    #[test]
    fn test_gaussian_kernel() {
        let kernel = gaussian_kernel(2.0, 4.0);
        assert_eq!(kernel.len(), 17);
        assert!((kernel.iter().sum::<Scalar>() - 1.0).abs() < 1e-5);
        for i in 0..8 {
            assert!((kernel[i] - kernel[16 - i]).abs() < 1e-7);
            assert!(kernel[i] < kernel[i + 1]);
        }
        assert_eq!(gaussian_kernel(30.0, 4.0).len(), 241);
        assert_eq!(gaussian_kernel(0.0, 4.0), vec![1.0]);
    }

    #[test]
    fn test_blur_keeps_constant_field() {
        let data = vec![42.0; 3 * 5];
        for sigma in [0.5, 2.0, 30.0] {
            let blurred = gaussian_blur(&data, 3, 5, sigma, 4.0);
            assert_eq!(blurred.len(), data.len());
            assert!(blurred.iter().all(|v| (v - 42.0).abs() < 1e-3));
        }
    }

    #[test]
    fn test_blur_preserves_mass_and_symmetry() {
        let mut data = vec![0.0; 9 * 9];
        data[4 * 9 + 4] = 81.0;
        let blurred = gaussian_blur(&data, 9, 9, 1.0, 4.0);
        let total = blurred.iter().sum::<Scalar>();
        assert!((total - 81.0).abs() < 1e-2);
        assert!((blurred[4 * 9 + 3] - blurred[4 * 9 + 5]).abs() < 1e-5);
        assert!((blurred[3 * 9 + 4] - blurred[5 * 9 + 4]).abs() < 1e-5);
        assert!(blurred[4 * 9 + 4] > blurred[4 * 9 + 3]);
    }

    #[test]
    fn test_values_in_unit_range() {
        let mut source = SourceImage::filled(24, 16, [30, 60, 90]);
        for row in 4..12 {
            for col in 6..10 {
                source.set_pixel(col, row, [250, 240, 230]);
            }
        }
        source.set_pixel(20, 2, [0, 0, 0]);
        let map = ImportanceMap::from_source(&source, &ImportanceSettings::default());
        assert_eq!(map.width(), 24);
        assert_eq!(map.height(), 16);
        assert_eq!(map.values().len(), 24 * 16);
        assert!(map.values().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(map.values().iter().any(|v| *v > 0.99));
        assert!(map.value_at(8, 8) > map.value_at(22, 14));
    }

    #[test]
    fn test_dark_detail_is_damped() {
        let settings = ImportanceSettings::default();
        let mut bright = SourceImage::filled(21, 21, [100, 100, 100]);
        bright.set_pixel(10, 10, [200, 200, 200]);
        let mut dark = SourceImage::filled(21, 21, [100, 100, 100]);
        dark.set_pixel(10, 10, [0, 0, 0]);
        let bright = ImportanceMap::from_source(&bright, &settings);
        let dark = ImportanceMap::from_source(&dark, &settings);
        // both maps are normalized by their own peak
        assert!((bright.value_at(10, 10) - 1.0).abs() < 1e-5);
        assert!((dark.value_at(10, 10) - 1.0).abs() < 1e-5);
        // the halo around a bright dot is darker than the center, so it is damped;
        // around a dark dot it is brighter and keeps relatively more weight
        assert!(dark.value_at(0, 0) > bright.value_at(0, 0));
    }

    #[test]
    fn test_faint_detail_is_kept() {
        let mut source = SourceImage::filled(15, 15, [120, 120, 120]);
        source.set_pixel(7, 7, [120, 120, 121]);
        let map = ImportanceMap::from_source(&source, &ImportanceSettings::default());
        assert!((map.value_at(7, 7) - 1.0).abs() < 1e-5);
        assert!(map.value_at(7, 7) > map.value_at(0, 0));
    }

    #[test]
    fn test_uniform_luma_is_flat() {
        let settings = ImportanceSettings {
            luma_weights: [1.0, 0.0, 0.0],
            ..Default::default()
        };
        let mut source = SourceImage::filled(9, 9, [77, 10, 10]);
        source.set_pixel(4, 4, [77, 250, 250]);
        let map = ImportanceMap::from_source(&source, &settings);
        assert!(map.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_out_of_bounds_value() {
        let map = ImportanceMap::new(2, 1, vec![0.5, 1.0]).unwrap();
        assert_eq!(map.value_at(1, 0), 1.0);
        assert_eq!(map.value_at(2, 0), 0.0);
        assert_eq!(map.value_at(0, 1), 0.0);
    }
}
