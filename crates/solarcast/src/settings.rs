//! Exposure estimation parameters.

use serde::{Deserialize, Serialize};
use solarcast_mesh::Aabb3;
use solarcast_raytrace::IntersectTolerance;

use crate::error::{ExposureError, Result};
use crate::sample::sample_dimensions;
use crate::sun::{SunPath, MAX_SUN_POSITIONS};

/// Parameters for [`compute_exposure`](crate::compute_exposure).
///
/// Every field has a default, so partial configuration files only need
/// to name what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureSettings {
    /// Output grid width (samples along x).
    pub grid_width: usize,
    /// Output grid height (samples along y).
    pub grid_height: usize,
    /// Horizontal spacing between sample points.
    pub horizontal_step: f64,
    /// Sun positions used as ray origins.
    pub sun: SunPath,
    /// Intersection tolerances.
    pub tolerance: IntersectTolerance,
    /// Counter value that maps to full intensity (255).
    pub normalization_scale: f64,
    /// Index occluders in a BVH instead of scanning every triangle.
    pub accelerate: bool,
    /// Trace sample points on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ExposureSettings {
    fn default() -> Self {
        Self {
            grid_width: 14,
            grid_height: 14,
            horizontal_step: 10.0,
            sun: SunPath::default(),
            tolerance: IntersectTolerance::default(),
            normalization_scale: 100.0,
            accelerate: true,
            parallel: true,
        }
    }
}

impl ExposureSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        self.validate_sampling()?;
        let sun = &self.sun;
        if ![sun.elevation, sun.x_start, sun.x_end, sun.y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ExposureError::InvalidSettings(
                "sun coordinates must be finite".into(),
            ));
        }
        if !(sun.x_step > 0.0 && sun.x_step.is_finite()) {
            return Err(ExposureError::InvalidSettings(
                "sun.x_step must be positive".into(),
            ));
        }
        if sun.x_end <= sun.x_start {
            return Err(ExposureError::InvalidSettings(
                "sun.x_end must be greater than sun.x_start".into(),
            ));
        }
        if sun.checked_len().is_none() {
            return Err(ExposureError::InvalidSettings(format!(
                "sun path has more than {MAX_SUN_POSITIONS} positions"
            )));
        }
        Ok(())
    }

    /// Validate everything except the sun path.
    pub(crate) fn validate_sampling(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ExposureError::InvalidSettings(
                "grid dimensions must be positive".into(),
            ));
        }
        if !(self.horizontal_step > 0.0 && self.horizontal_step.is_finite()) {
            return Err(ExposureError::InvalidSettings(
                "horizontal_step must be positive".into(),
            ));
        }
        if !(self.normalization_scale > 0.0 && self.normalization_scale.is_finite()) {
            return Err(ExposureError::InvalidSettings(
                "normalization_scale must be positive".into(),
            ));
        }
        let tol = &self.tolerance;
        if !(tol.parallel >= 0.0 && tol.parallel.is_finite())
            || !(tol.distance >= 0.0 && tol.distance.is_finite())
        {
            return Err(ExposureError::InvalidSettings(
                "tolerances must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Size the output grid to the samples `extent` produces.
    ///
    /// An extent with no samples along some axis leaves the grid as it is,
    /// so the estimator still reports the empty or flat base.
    pub fn fitted_to(mut self, extent: &Aabb3) -> Self {
        let (columns, rows) = sample_dimensions(extent, self.horizontal_step);
        if columns > 0 && rows > 0 {
            self.grid_width = columns;
            self.grid_height = rows;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarcast_math::Point3;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ExposureSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.sun.len(), 100);
    }

    #[test]
    fn test_invalid_settings() {
        let cases = [
            ExposureSettings {
                grid_width: 0,
                ..Default::default()
            },
            ExposureSettings {
                horizontal_step: 0.0,
                ..Default::default()
            },
            ExposureSettings {
                horizontal_step: f64::NAN,
                ..Default::default()
            },
            ExposureSettings {
                normalization_scale: -1.0,
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    x_step: 0.0,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    x_start: 5.0,
                    x_end: -5.0,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    x_end: f64::INFINITY,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    x_start: f64::NAN,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    elevation: f64::NAN,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    y: f64::NEG_INFINITY,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                sun: SunPath {
                    x_step: 1e-300,
                    ..Default::default()
                },
                ..Default::default()
            },
            ExposureSettings {
                tolerance: IntersectTolerance {
                    parallel: -1e-5,
                    distance: 1e-5,
                },
                ..Default::default()
            },
        ];
        for settings in cases {
            assert!(
                matches!(settings.validate(), Err(ExposureError::InvalidSettings(_))),
                "{settings:?}"
            );
        }
    }

    #[test]
    fn test_fitted_to() {
        let extent = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(30.0, 50.0, 0.0));
        let settings = ExposureSettings::default().fitted_to(&extent);
        assert_eq!((settings.grid_width, settings.grid_height), (3, 5));
    }

    #[test]
    fn test_fitted_to_keeps_grid_without_samples() {
        let defaults = ExposureSettings::default();
        assert_eq!(defaults.clone().fitted_to(&Aabb3::empty()), defaults);

        let line = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(30.0, 0.0, 0.0));
        let settings = defaults.clone().fitted_to(&line);
        assert_eq!((settings.grid_width, settings.grid_height), (14, 14));
    }

    #[test]
    fn test_partial_toml() {
        let settings: ExposureSettings = toml::from_str(
            r#"
            grid_width = 4
            normalization_scale = 50.0

            [sun]
            elevation = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.grid_width, 4);
        assert_eq!(settings.grid_height, 14);
        assert_eq!(settings.normalization_scale, 50.0);
        assert_eq!(settings.sun.elevation, 60.0);
        assert_eq!(settings.sun.x_step, 2.0);
        assert_eq!(settings.tolerance, IntersectTolerance::default());
    }
}
