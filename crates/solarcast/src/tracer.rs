//! Per-sample sun visibility counting.

use rayon::prelude::*;
use solarcast_math::Point3;
use solarcast_raytrace::{IntersectTolerance, Occluders, Ray};

use crate::error::Result;

/// Counts, for each sample point, the sun positions that can see it.
#[derive(Debug, Clone)]
pub struct ExposureTracer<'a> {
    occluders: &'a Occluders,
    suns: &'a [Point3],
    tolerance: IntersectTolerance,
}

impl<'a> ExposureTracer<'a> {
    /// Create a tracer over an occluder set and a sun position set.
    pub fn new(occluders: &'a Occluders, suns: &'a [Point3], tolerance: IntersectTolerance) -> Self {
        Self {
            occluders,
            suns,
            tolerance,
        }
    }

    /// Number of sun positions, the largest possible counter value.
    pub fn sun_count(&self) -> usize {
        self.suns.len()
    }

    /// Number of sun positions with an unobstructed line to `sample`.
    ///
    /// Fails if a sun position coincides with the sample.
    pub fn exposure_at(&self, sample: &Point3) -> Result<u32> {
        let mut exposed = 0;
        for sun in self.suns {
            let ray = Ray::toward(*sun, sample)?;
            if !self.occluders.occluded(&ray, &self.tolerance) {
                exposed += 1;
            }
        }
        Ok(exposed)
    }

    /// Exposure counters for every sample, in sample order.
    ///
    /// With `parallel` the samples are spread over the rayon pool; each
    /// worker owns its sample's counter, so the result is identical to the
    /// sequential loop.
    pub fn trace(&self, samples: &[Point3], parallel: bool) -> Result<Vec<u32>> {
        if parallel {
            samples.par_iter().map(|p| self.exposure_at(p)).collect()
        } else {
            samples.iter().map(|p| self.exposure_at(p)).collect()
        }
    }
}
