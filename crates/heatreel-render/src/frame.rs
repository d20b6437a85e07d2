//! Frame rendering: scalar grids to color-mapped images on disk.

use std::path::{Path, PathBuf};

use heatreel_core::{DataRange, Grid};
use image::{ImageBuffer, Rgb, RgbImage};

use crate::color_maps::ColorMap;

/// How grid values become pixels.
#[derive(Debug, Clone)]
pub struct FrameStyle {
    /// Color map sampled for every cell.
    pub colormap: ColorMap,
    /// Values mapped to the ends of the color map.
    pub range: DataRange,
    /// Each cell becomes a `scale` x `scale` pixel block.
    pub scale: u32,
}

impl FrameStyle {
    /// Creates a style with unit scale.
    pub fn new(colormap: ColorMap, range: DataRange) -> Self {
        Self {
            colormap,
            range,
            scale: 1,
        }
    }

    /// Sets the pixel scale.
    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }
}

/// Returns the file name of the frame at `index`, e.g. `00042.png`.
pub fn frame_file_name(index: usize) -> String {
    format!("{index:05}.png")
}

/// Maps every grid cell through the color map.
///
/// Row 0 of the grid is the top row of the image. Values outside the style's
/// range take the color of the nearest end.
///
/// # Errors
/// Returns an error if the grid is empty or the scaled size does not fit.
pub fn colorize(grid: &Grid, style: &FrameStyle) -> Result<RgbImage, FrameError> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(FrameError::EmptyFrame);
    }
    let scale = style.scale.max(1);
    let width = scaled_dimension(grid.width(), scale)?;
    let height = scaled_dimension(grid.height(), scale)?;

    let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        let value = grid
            .get((x / scale) as usize, (y / scale) as usize)
            .unwrap_or(f32::NAN);
        Rgb(style.colormap.sample_rgb8(style.range.normalize(value)))
    });
    Ok(img)
}

fn scaled_dimension(cells: usize, scale: u32) -> Result<u32, FrameError> {
    u32::try_from(cells)
        .ok()
        .and_then(|c| c.checked_mul(scale))
        .ok_or(FrameError::TooLarge { cells, scale })
}

/// Colorizes `grid` and saves it as `output_dir/{output_index:05}.png`.
///
/// Returns the path written.
pub fn render_frame(
    grid: &Grid,
    output_index: usize,
    output_dir: &Path,
    style: &FrameStyle,
) -> Result<PathBuf, FrameError> {
    let img = colorize(grid, style)?;
    let path = output_dir.join(frame_file_name(output_index));
    save_image(&path, &img)?;
    log::debug!(
        "wrote frame '{}' ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(path)
}

/// Saves an RGB image, picking the format from the file extension.
///
/// # Arguments
/// * `path` - Output filename (supports .png, .jpg, .jpeg)
/// * `img` - Image to write
///
/// # Errors
/// Returns an error if the file cannot be written or format is unsupported.
pub fn save_image(path: &Path, img: &RgbImage) -> Result<(), FrameError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => {
            img.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            img.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(FrameError::UnsupportedFormat(extension));
        }
    }

    Ok(())
}

/// Encodes an RGB image as PNG in memory.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, FrameError> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Error type for frame operations.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Grid has no cells")]
    EmptyFrame,

    #[error("Frame too large: {cells} cells at scale {scale}")]
    TooLarge { cells: usize, scale: u32 },
}
