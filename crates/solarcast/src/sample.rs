//! Sample point placement over the base surface.

use solarcast_math::Point3;
use solarcast_mesh::Aabb3;

/// Number of samples along one axis between `floor(min)` and `ceil(max)`.
fn axis_count(min: f64, max: f64, step: f64) -> usize {
    let span = max.ceil() - min.floor();
    if span <= 0.0 || step <= 0.0 {
        return 0;
    }
    (span / step).ceil() as usize
}

/// Grid dimensions `(columns, rows)` that [`sample_grid`] would produce.
///
/// Empty and zero-extent boxes give zero along the flat axes.
pub fn sample_dimensions(extent: &Aabb3, step: f64) -> (usize, usize) {
    if extent.is_empty() {
        return (0, 0);
    }
    (
        axis_count(extent.min.x, extent.max.x, step),
        axis_count(extent.min.y, extent.max.y, step),
    )
}

/// Sample points over the horizontal extent of `extent`, at its top height.
///
/// Columns start at `floor(min.x)` and advance by `step` while below
/// `ceil(max.x)`; rows likewise in y. Points are returned row-major: every
/// x for the first y, then the next y.
pub fn sample_grid(extent: &Aabb3, step: f64) -> Vec<Point3> {
    let (columns, rows) = sample_dimensions(extent, step);
    let x0 = extent.min.x.floor();
    let y0 = extent.min.y.floor();
    let z = extent.max.z;

    let mut points = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        let y = y0 + row as f64 * step;
        for column in 0..columns {
            points.push(Point3::new(x0 + column as f64 * step, y, z));
        }
    }
    points
}
