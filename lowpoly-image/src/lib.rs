pub mod error;
pub mod settings;

use crate::{
    error::{LowPolyImageError, Result},
    settings::AnimationSettings,
};
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, DynamicImage, GrayImage, ImageFormat, RgbImage,
};
use log::{debug, info};
use lowpoly_core::prelude::*;
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

/// Convert decoded image into source image (alpha is dropped).
///
/// # Arguments
/// * `image` - Input image.
///
/// # Returns
/// Source image or error.
pub fn generate_source_from_image(
    image: &DynamicImage,
) -> std::result::Result<SourceImage, SourceImageError> {
    let image = image.to_rgb8();
    SourceImage::new(image.width() as _, image.height() as _, image.into_raw())
}

/// Load source image from file.
///
/// # Arguments
/// * `path` - Image file path.
///
/// # Returns
/// Source image or error.
pub fn load_source_image(path: impl AsRef<Path>) -> Result<SourceImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| LowPolyImageError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded '{}' ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(generate_source_from_image(&image)?)
}

/// Convert rendered frame into RGB image.
pub fn generate_frame_image(frame: Frame) -> Result<RgbImage> {
    let width = frame.width();
    let height = frame.height();
    RgbImage::from_raw(width as _, height as _, frame.into_raw())
        .ok_or(LowPolyImageError::InvalidFrame { width, height })
}

/// Generate grayscale preview of importance map.
///
/// # Arguments
/// * `map` - Importance map.
///
/// # Returns
/// Grayscale image or error.
pub fn generate_importance_image(map: &ImportanceMap) -> Result<DynamicImage> {
    let data = map
        .values()
        .iter()
        .map(|v| (v * 255.0) as u8)
        .collect::<Vec<_>>();
    GrayImage::from_raw(map.width() as _, map.height() as _, data)
        .map(DynamicImage::ImageLuma8)
        .ok_or(LowPolyImageError::InvalidFrame {
            width: map.width(),
            height: map.height(),
        })
}

/// Encode image in format matching file extension and write it at once.
///
/// # Arguments
/// * `image` - Image to save.
/// * `path` - Output file path.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|source| LowPolyImageError::ImageExport {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .map_err(|source| LowPolyImageError::ImageExport {
            path: path.to_path_buf(),
            source,
        })?;
    write_file(path, bytes.get_ref())
}

/// Save rendered frame.
///
/// # Arguments
/// * `frame` - Rendered frame.
/// * `path` - Output file path, its extension selects the format.
pub fn save_frame(frame: Frame, path: impl AsRef<Path>) -> Result<()> {
    let image = DynamicImage::ImageRgb8(generate_frame_image(frame)?);
    save_image(&image, path)
}

/// Render growth sequence and save it as looping GIF animation.
///
/// Frames are passed to the encoder as soon as they are rendered. The file is written only
/// after every frame got encoded, so failed runs leave no truncated animation behind.
///
/// # Arguments
/// * `generator` - Low-poly generator.
/// * `levels` - Detail levels of consecutive frames.
/// * `settings` - Animation settings.
/// * `path` - Output file path.
pub fn save_growth_animation(
    generator: &LowPolyGenerator,
    levels: &[usize],
    settings: &AnimationSettings,
    path: impl AsRef<Path>,
) -> Result<()> {
    save_growth_animation_tracked(generator, levels, settings, path, |_, _, _| {})
}

/// Render growth sequence and save it as looping GIF animation, reporting progress.
///
/// # Arguments
/// * `generator` - Low-poly generator.
/// * `levels` - Detail levels of consecutive frames.
/// * `settings` - Animation settings.
/// * `path` - Output file path.
/// * `f` - Callback triggered after every encoded frame. Signature: `fn(progress, limit, factor)`.
pub fn save_growth_animation_tracked<F>(
    generator: &LowPolyGenerator,
    levels: &[usize],
    settings: &AnimationSettings,
    path: impl AsRef<Path>,
    mut f: F,
) -> Result<()>
where
    F: FnMut(usize, usize, Scalar),
{
    let path = path.as_ref();
    let export_error = |source| LowPolyImageError::ImageExport {
        path: path.to_path_buf(),
        source,
    };
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite).map_err(export_error)?;
        let limit = levels.len();
        let mut current = 0;
        f(current, limit, 0.0);
        generator.render_sequence_into(levels, |level, frame| {
            let image = DynamicImage::ImageRgb8(generate_frame_image(frame)?).to_rgba8();
            let delay = Delay::from_numer_denom_ms(settings.frame_delay_ms, 1);
            encoder
                .encode_frame(image::Frame::from_parts(image, 0, 0, delay))
                .map_err(export_error)?;
            current += 1;
            debug!("Encoded frame {} of {} (N={})", current, limit, level);
            f(current, limit, current as Scalar / limit as Scalar);
            Ok::<_, LowPolyImageError>(())
        })?;
    }
    write_file(path, &bytes)?;
    info!("GIF saved to: {}", path.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LowPolyImageError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| LowPolyImageError::FileSystem {
        path: PathBuf::from(path),
        operation: "write file",
        source,
    })
}
