//! Writing exposure results to disk.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use solarcast::{ExposureGrid, ExposureReport};

/// Largest image [`grid_image`] will allocate.
const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// Render the grid as a grey-level image, `pixel_size` pixels per cell.
///
/// Grid row 0 (lowest y) becomes the top row of the image.
pub fn grid_image(grid: &ExposureGrid, pixel_size: u32) -> Result<GrayImage> {
    let width = u32::try_from(grid.width()).context("grid too wide for an image")?;
    let height = u32::try_from(grid.height()).context("grid too tall for an image")?;
    let image = GrayImage::from_raw(width, height, grid.cells().to_vec())
        .context("grid cell count does not match its dimensions")?;

    if pixel_size <= 1 {
        return Ok(image);
    }
    let scaled_width = width
        .checked_mul(pixel_size)
        .context("pixel size too large for the grid width")?;
    let scaled_height = height
        .checked_mul(pixel_size)
        .context("pixel size too large for the grid height")?;
    if u64::from(scaled_width) * u64::from(scaled_height) > MAX_IMAGE_PIXELS {
        bail!("pixel size too large: {scaled_width}x{scaled_height} image");
    }
    Ok(imageops::resize(
        &image,
        scaled_width,
        scaled_height,
        FilterType::Nearest,
    ))
}

/// Save the grid as an RGB PNG.
pub fn write_png(grid: &ExposureGrid, path: &Path, pixel_size: u32) -> Result<()> {
    let image = grid_image(grid, pixel_size)?;
    DynamicImage::ImageLuma8(image)
        .to_rgb8()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Save the full report (grid, counters, totals) as pretty JSON.
pub fn write_json(report: &ExposureReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
