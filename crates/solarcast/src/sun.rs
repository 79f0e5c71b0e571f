//! Discrete sun positions.
//!
//! The sun is modelled as a single east-west sweep of points at a fixed
//! height. This is not a solar ephemeris; swap in a different set of
//! positions without touching the tracer.

use serde::{Deserialize, Serialize};
use solarcast_math::Point3;

/// Longest sweep a [`SunPath`] will enumerate.
pub const MAX_SUN_POSITIONS: usize = 1 << 20;

/// A horizontal sweep of sun positions along x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunPath {
    /// Height of every sun position.
    pub elevation: f64,
    /// First x coordinate (inclusive).
    pub x_start: f64,
    /// Last x coordinate (exclusive).
    pub x_end: f64,
    /// Spacing between positions along x.
    pub x_step: f64,
    /// Fixed y coordinate.
    pub y: f64,
}

impl Default for SunPath {
    fn default() -> Self {
        Self {
            elevation: 100.0,
            x_start: -100.0,
            x_end: 100.0,
            x_step: 2.0,
            y: 0.0,
        }
    }
}

impl SunPath {
    /// Number of positions in the sweep, or `None` if the range or step is
    /// not finite or the sweep is longer than [`MAX_SUN_POSITIONS`].
    pub fn checked_len(&self) -> Option<usize> {
        let span = self.x_end - self.x_start;
        if !(span.is_finite() && self.x_step.is_finite()) {
            return None;
        }
        if span <= 0.0 || self.x_step <= 0.0 {
            return Some(0);
        }
        let count = (span / self.x_step).ceil();
        (count <= MAX_SUN_POSITIONS as f64).then_some(count as usize)
    }

    /// Number of positions in the sweep; zero when [`checked_len`](Self::checked_len)
    /// rejects it.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(0)
    }

    /// True if the sweep contains no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enumerate the positions in sweep order.
    pub fn positions(&self) -> Vec<Point3> {
        (0..self.len())
            .map(|i| {
                Point3::new(
                    self.x_start + i as f64 * self.x_step,
                    self.y,
                    self.elevation,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_sweep() {
        let sun = SunPath::default();
        let positions = sun.positions();
        assert_eq!(positions.len(), 100);
        assert_eq!(positions[0], Point3::new(-100.0, 0.0, 100.0));
        assert_eq!(positions[1], Point3::new(-98.0, 0.0, 100.0));
        assert_eq!(positions[99], Point3::new(98.0, 0.0, 100.0));
    }

    #[test]
    fn test_uneven_step() {
        let sun = SunPath {
            x_start: 0.0,
            x_end: 1.0,
            x_step: 0.3,
            ..Default::default()
        };
        let positions = sun.positions();
        assert_eq!(positions.len(), 4);
        assert_relative_eq!(positions[3].x, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_sweep() {
        let sun = SunPath {
            x_start: 10.0,
            x_end: 10.0,
            ..Default::default()
        };
        assert!(sun.is_empty());
        assert!(sun.positions().is_empty());

        let backwards = SunPath {
            x_step: -1.0,
            ..Default::default()
        };
        assert_eq!(backwards.len(), 0);
    }

    #[test]
    fn test_unbounded_sweep_has_no_positions() {
        let infinite = SunPath {
            x_end: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(infinite.checked_len(), None);
        assert!(infinite.positions().is_empty());

        let tiny_step = SunPath {
            x_step: 1e-300,
            ..Default::default()
        };
        assert_eq!(tiny_step.checked_len(), None);
        assert_eq!(tiny_step.len(), 0);

        let at_cap = SunPath {
            x_start: 0.0,
            x_end: MAX_SUN_POSITIONS as f64,
            x_step: 1.0,
            ..Default::default()
        };
        assert_eq!(at_cap.checked_len(), Some(MAX_SUN_POSITIONS));
    }
}
