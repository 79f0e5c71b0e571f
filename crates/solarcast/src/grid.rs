//! Mapping exposure counters to an 8-bit intensity grid.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ExposureError, Result};

/// A row-major grid of exposure intensities in `[0, 255]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl ExposureGrid {
    /// Normalize counters into intensities and reshape them to `width × height`.
    ///
    /// Each counter maps to `round(count / scale * 255)`. Counters above
    /// `scale` saturate at 255 rather than wrapping.
    pub fn from_counts(counts: &[u32], width: usize, height: usize, scale: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ExposureError::InvalidSettings(
                "grid dimensions must be positive".into(),
            ));
        }
        let expected = width * height;
        if counts.len() != expected {
            return Err(ExposureError::CellCount {
                expected,
                actual: counts.len(),
            });
        }
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(ExposureError::InvalidSettings(
                "normalization_scale must be positive".into(),
            ));
        }

        let mut saturated = 0usize;
        let cells = counts
            .iter()
            .map(|&count| {
                let value = (count as f64 / scale * 255.0).round();
                if value > 255.0 {
                    saturated += 1;
                }
                value.clamp(0.0, 255.0) as u8
            })
            .collect();

        if saturated > 0 {
            warn!(
                saturated,
                scale, "exposure counters exceed the normalization scale; clamped to 255"
            );
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Intensity at `(column, row)`, if in range.
    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + column])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate rows from the first (lowest y) to the last.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    /// Smallest, mean and largest intensity.
    pub fn summary(&self) -> GridSummary {
        let min = self.cells.iter().copied().min().unwrap_or(0);
        let max = self.cells.iter().copied().max().unwrap_or(0);
        let mean = if self.cells.is_empty() {
            0.0
        } else {
            self.cells.iter().map(|&c| c as f64).sum::<f64>() / self.cells.len() as f64
        };
        GridSummary { min, mean, max }
    }
}

/// Basic statistics over an [`ExposureGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSummary {
    /// Smallest intensity.
    pub min: u8,
    /// Mean intensity.
    pub mean: f64,
    /// Largest intensity.
    pub max: u8,
}
