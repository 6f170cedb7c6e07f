use crate::Color;
use std::fmt;

/// Error thrown when building source image from raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceImageError {
    /// Wrong data length.
    /// (provided, expected)
    WrongDataLength(usize, usize),
}

impl fmt::Display for SourceImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongDataLength(provided, expected) => write!(
                f,
                "Wrong source data length: provided {provided}, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for SourceImageError {}

/// RGB source image the low-poly mesh is generated from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl SourceImage {
    /// Create new source image.
    ///
    /// # Arguments
    /// * `width` - Columns.
    /// * `height` - Rows.
    /// * `data` - Raw interleaved RGB bytes, row by row.
    ///
    /// # Returns
    /// Source image or error.
    ///
    /// # Examples
    /// ```
    /// use lowpoly_core::prelude::*;
    ///
    /// assert!(SourceImage::new(2, 1, vec![0, 1, 2, 3, 4, 5]).is_ok());
    /// assert_eq!(
    ///     SourceImage::new(2, 2, vec![0, 1, 2]),
    ///     Err(SourceImageError::WrongDataLength(3, 12)),
    /// );
    /// ```
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SourceImageError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(SourceImageError::WrongDataLength(data.len(), expected));
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect::<Vec<_>>();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create source image filled with single color.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
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

    /// Returns pixels buffer, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Returns pixel at given column and row or `None` if out of bounds.
    pub fn pixel(&self, col: usize, row: usize) -> Option<Color> {
        if col < self.width && row < self.height {
            self.pixels.get(row * self.width + col).copied()
        } else {
            None
        }
    }

    /// Overwrite pixel at given column and row. Out of bounds writes are ignored.
    pub fn set_pixel(&mut self, col: usize, row: usize, color: Color) {
        if col < self.width && row < self.height {
            self.pixels[row * self.width + col] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_access() {
        let mut image = SourceImage::new(2, 2, (0..12).collect()).unwrap();
        assert_eq!(image.pixel(0, 0), Some([0, 1, 2]));
        assert_eq!(image.pixel(1, 0), Some([3, 4, 5]));
        assert_eq!(image.pixel(0, 1), Some([6, 7, 8]));
        assert_eq!(image.pixel(2, 0), None);
        image.set_pixel(1, 1, [255, 255, 255]);
        image.set_pixel(5, 5, [1, 1, 1]);
        assert_eq!(image.pixel(1, 1), Some([255, 255, 255]));
    }
}
