#![warn(missing_docs)]

//! Solar exposure estimation over roof and ground surfaces.
//!
//! Given a base surface and two groups of occluder meshes (design intent and
//! surrounding context), this crate lays a regular grid of sample points
//! over the base and counts, for each point, how many of a fixed set of sun
//! positions can see it. Counters are normalized into an 8-bit grid that can
//! be rendered as a shading heat-map.
//!
//! # Example
//!
//! ```ignore
//! use solarcast::{compute_exposure_grid, ExposureSettings};
//!
//! let grid = compute_exposure_grid(&base_vertices, &design, &context, &ExposureSettings::default())?;
//! for row in grid.rows() {
//!     println!("{row:?}");
//! }
//! ```

pub mod error;
pub mod grid;
pub mod sample;
pub mod settings;
pub mod sun;
pub mod tracer;

pub use error::{ExposureError, Result};
pub use grid::{ExposureGrid, GridSummary};
pub use sample::{sample_dimensions, sample_grid};
pub use settings::ExposureSettings;
pub use sun::{SunPath, MAX_SUN_POSITIONS};
pub use tracer::ExposureTracer;

pub use solarcast_math::Point3;
pub use solarcast_mesh::{bounding_box, Aabb3, IndexedMesh};
pub use solarcast_raytrace::IntersectTolerance;

use std::fmt;

use serde::{Deserialize, Serialize};
use solarcast_mesh::triangulate;
use solarcast_raytrace::Occluders;
use tracing::{debug, info, info_span};

/// The part a mesh plays in an exposure run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshRole {
    /// The surface that sample points are placed over.
    Base,
    /// Proposed geometry that casts shade.
    Design,
    /// Existing surroundings that cast shade.
    Context,
}

impl fmt::Display for MeshRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshRole::Base => write!(f, "base"),
            MeshRole::Design => write!(f, "design"),
            MeshRole::Context => write!(f, "context"),
        }
    }
}

/// Result of an exposure run.
#[derive(Debug, Clone, Serialize)]
pub struct ExposureReport {
    /// Normalized intensity grid.
    pub grid: ExposureGrid,
    /// Raw per-sample counters, row-major.
    pub counts: Vec<u32>,
    /// Number of sun positions traced.
    pub sun_count: usize,
    /// Number of occluding triangles (design + context).
    pub occluder_count: usize,
}

/// Compute the normalized exposure grid for a base surface.
///
/// `base_vertices` is a flat `[x0, y0, z0, ...]` buffer. Design and context
/// meshes together form the occluder set.
pub fn compute_exposure_grid(
    base_vertices: &[f64],
    design_meshes: &[IndexedMesh],
    context_meshes: &[IndexedMesh],
    settings: &ExposureSettings,
) -> Result<ExposureGrid> {
    compute_exposure(base_vertices, design_meshes, context_meshes, settings).map(|r| r.grid)
}

/// Compute the exposure grid together with the raw counters.
pub fn compute_exposure(
    base_vertices: &[f64],
    design_meshes: &[IndexedMesh],
    context_meshes: &[IndexedMesh],
    settings: &ExposureSettings,
) -> Result<ExposureReport> {
    settings.validate()?;
    let suns = settings.sun.positions();
    compute_exposure_with_suns(base_vertices, design_meshes, context_meshes, &suns, settings)
}

/// Like [`compute_exposure`], with an explicit sun position set.
///
/// `settings.sun` is ignored; every other setting applies.
pub fn compute_exposure_with_suns(
    base_vertices: &[f64],
    design_meshes: &[IndexedMesh],
    context_meshes: &[IndexedMesh],
    suns: &[Point3],
    settings: &ExposureSettings,
) -> Result<ExposureReport> {
    settings.validate_sampling()?;
    let _span = info_span!("compute_exposure").entered();

    let extent = bounding_box(base_vertices).map_err(ExposureError::mesh(MeshRole::Base))?;
    if extent.is_empty() {
        return Err(ExposureError::EmptyGeometry);
    }

    let (columns, rows) = sample_dimensions(&extent, settings.horizontal_step);
    if columns == 0 || rows == 0 {
        return Err(ExposureError::ZeroExtent { columns, rows });
    }
    if (columns, rows) != (settings.grid_width, settings.grid_height) {
        return Err(ExposureError::GridMismatch {
            columns,
            rows,
            width: settings.grid_width,
            height: settings.grid_height,
        });
    }
    let samples = sample_grid(&extent, settings.horizontal_step);
    debug!(columns, rows, z = extent.max.z, "placed sample points");

    let mut triangles = triangulate(design_meshes).map_err(ExposureError::mesh(MeshRole::Design))?;
    let design_count = triangles.len();
    triangles.extend(triangulate(context_meshes).map_err(ExposureError::mesh(MeshRole::Context))?);
    debug!(
        design = design_count,
        context = triangles.len() - design_count,
        "triangulated occluders"
    );

    if triangles.is_empty() {
        info!("no occluder triangles; every sample is fully exposed");
    }
    let occluders = if settings.accelerate {
        Occluders::accelerated(&triangles)
    } else {
        Occluders::brute_force(&triangles)
    };

    let tracer = ExposureTracer::new(&occluders, suns, settings.tolerance);
    let counts = tracer.trace(&samples, settings.parallel)?;
    let grid = ExposureGrid::from_counts(
        &counts,
        settings.grid_width,
        settings.grid_height,
        settings.normalization_scale,
    )?;

    info!(
        samples = samples.len(),
        suns = suns.len(),
        occluders = occluders.len(),
        "exposure traced"
    );

    Ok(ExposureReport {
        grid,
        counts,
        sun_count: suns.len(),
        occluder_count: occluders.len(),
    })
}
