//! Closed tunnel path with arc-length sampling.
//!
//! The path is a closed centripetal Catmull-Rom spline through a fixed set
//! of control points. Queries take a normalized parameter `u` that is
//! wrapped into `[0, 1)` and mapped through an arc-length table, so equal
//! steps in `u` cover equal distances along the curve.

use glam::Vec3;

use crate::error::{FlythroughError, Result};
use crate::options::{default_control_points, PathConfig};

/// Knot intervals shorter than this are treated as degenerate.
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Parameter step used for finite-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// An immutable closed 3D curve.
#[derive(Debug, Clone)]
pub struct TunnelPath {
    control_points: Vec<Vec3>,
    /// Cumulative arc length at `divisions + 1` evenly spaced curve parameters.
    arc_lengths: Vec<f32>,
}

impl TunnelPath {
    /// Builds a closed path through the given control points.
    ///
    /// `arc_length_divisions` controls the resolution of the arc-length
    /// table used to make sampling uniform in distance.
    pub fn new(control_points: Vec<Vec3>, arc_length_divisions: usize) -> Result<Self> {
        if control_points.len() < 3 {
            return Err(FlythroughError::MalformedPath(format!(
                "at least 3 control points are required, got {}",
                control_points.len()
            )));
        }
        if control_points.iter().any(|p| !p.is_finite()) {
            return Err(FlythroughError::MalformedPath(
                "control points must be finite".to_string(),
            ));
        }
        if arc_length_divisions == 0 {
            return Err(FlythroughError::MalformedPath(
                "arc_length_divisions must be at least 1".to_string(),
            ));
        }

        let mut path = Self {
            control_points,
            arc_lengths: Vec::new(),
        };
        path.arc_lengths = path.compute_arc_lengths(arc_length_divisions);

        let length = path.length();
        if !(length.is_finite() && length > 0.0) {
            return Err(FlythroughError::MalformedPath(format!(
                "path has degenerate length {length}"
            )));
        }

        Ok(path)
    }

    /// Builds a path from its configuration section.
    pub fn from_config(config: &PathConfig) -> Result<Self> {
        Self::new(config.control_points.clone(), config.arc_length_divisions)
    }

    /// Builds the built-in tunnel loop.
    pub fn default_tunnel() -> Result<Self> {
        Self::new(default_control_points(), 200)
    }

    /// Returns the control points.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Returns the total arc length of the closed curve.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Returns the position at normalized arc-length parameter `u`.
    ///
    /// `u` is wrapped modulo 1, so `point_at(0.0) == point_at(1.0)`.
    pub fn point_at(&self, u: f32) -> Vec3 {
        let t = self.u_to_t(wrap_unit(u));
        self.point_at_raw(t)
    }

    /// Returns the unit tangent at normalized arc-length parameter `u`.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let u = wrap_unit(u);
        let ahead = self.point_at(u + TANGENT_DELTA);
        let behind = self.point_at(u - TANGENT_DELTA);
        (ahead - behind).normalize_or_zero()
    }

    /// Evaluates the spline at curve parameter `t` (not arc-length uniform).
    pub fn point_at_raw(&self, t: f32) -> Vec3 {
        let n = self.control_points.len();
        let p = n as f32 * wrap_unit(t);
        let segment = (p.floor() as usize).min(n - 1);
        let weight = p - segment as f32;

        let p0 = self.control_points[(segment + n - 1) % n];
        let p1 = self.control_points[segment];
        let p2 = self.control_points[(segment + 1) % n];
        let p3 = self.control_points[(segment + 2) % n];

        // Centripetal parametrization: knot spacing is sqrt of chord length.
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        cubic_hermite(p1, p2, m1, m2, weight)
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut total = 0.0;
        let mut last = self.point_at_raw(0.0);
        lengths.push(0.0);
        for i in 1..=divisions {
            // The final sample closes the loop back at the first control point.
            let current = if i == divisions {
                self.point_at_raw(0.0)
            } else {
                self.point_at_raw(i as f32 / divisions as f32)
            };
            total += current.distance(last);
            lengths.push(total);
            last = current;
        }
        lengths
    }

    /// Maps a normalized arc-length parameter to a curve parameter.
    fn u_to_t(&self, u: f32) -> f32 {
        let divisions = self.arc_lengths.len() - 1;
        let target = u * self.length();

        // Index of the last table entry not beyond the target length.
        let i = self
            .arc_lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(divisions - 1);

        let before = self.arc_lengths[i];
        let segment_length = self.arc_lengths[i + 1] - before;
        let fraction = if segment_length > 0.0 {
            ((target - before) / segment_length).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (i as f32 + fraction) / divisions as f32
    }
}

/// Wraps a parameter into `[0, 1)`. Non-finite input maps to 0.
fn wrap_unit(u: f32) -> f32 {
    if !u.is_finite() {
        return 0.0;
    }
    let wrapped = u.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Cubic Hermite interpolation between `p1` and `p2` with tangents `m1`, `m2`.
fn cubic_hermite(p1: Vec3, p2: Vec3, m1: Vec3, m2: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;
    p1 + m1 * t + c2 * t2 + c3 * t3
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square_path() -> TunnelPath {
        TunnelPath::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(0.0, 0.0, 10.0),
            ],
            200,
        )
        .unwrap()
    }

    #[test]
    fn test_passes_through_control_points() {
        let path = square_path();
        for (i, p) in path.control_points().iter().enumerate() {
            let at = path.point_at_raw(i as f32 / 4.0);
            assert!((at - *p).length() < 1e-4, "control point {i}: {at:?}");
        }
    }

    #[test]
    fn test_endpoints_coincide() {
        let path = square_path();
        assert_eq!(path.point_at(0.0), path.point_at(1.0));
        assert_eq!(path.point_at(0.0), Vec3::ZERO);
    }

    #[test]
    fn test_length_of_symmetric_loop() {
        let path = square_path();
        // A rounded square through the corners is a bit longer than the
        // inscribed polygon but shorter than a much wider loop.
        assert!(path.length() > 40.0);
        assert!(path.length() < 50.0);
    }

    #[test]
    fn test_arc_length_sampling_is_uniform() {
        let path = TunnelPath::default_tunnel().unwrap();
        let steps = 50;
        let expected = path.length() / steps as f32;
        for i in 0..steps {
            let a = path.point_at(i as f32 / steps as f32);
            let b = path.point_at((i + 1) as f32 / steps as f32);
            let chord = a.distance(b);
            // Chords are slightly shorter than arcs, never much longer.
            assert!(chord <= expected * 1.02, "step {i}: {chord} vs {expected}");
            assert!(chord >= expected * 0.9, "step {i}: {chord} vs {expected}");
        }
    }

    #[test]
    fn test_tangent_is_unit_and_forward() {
        let path = square_path();
        let tangent = path.tangent_at(0.1);
        assert!((tangent.length() - 1.0).abs() < 1e-3);
        let ahead = path.point_at(0.11) - path.point_at(0.1);
        assert!(tangent.dot(ahead) > 0.0);
    }

    #[test]
    fn test_too_few_points_rejected() {
        let result = TunnelPath::new(vec![Vec3::ZERO, Vec3::X], 200);
        assert!(matches!(result, Err(FlythroughError::MalformedPath(_))));
    }

    #[test]
    fn test_coincident_points_rejected() {
        let result = TunnelPath::new(vec![Vec3::ONE; 5], 200);
        assert!(matches!(result, Err(FlythroughError::MalformedPath(_))));
    }

    #[test]
    fn test_non_finite_parameter_is_total() {
        let path = square_path();
        assert_eq!(path.point_at(f32::NAN), path.point_at(0.0));
        assert_eq!(path.point_at(f32::INFINITY), path.point_at(0.0));
    }

    proptest! {
        #[test]
        fn prop_point_at_is_periodic(u in -10.0f32..10.0) {
            let path = square_path();
            let wrapped = u.rem_euclid(1.0);
            prop_assert_eq!(path.point_at(u), path.point_at(wrapped));
        }

        #[test]
        fn prop_integer_shift_is_close(u in 0.0f32..1.0, k in -5i32..5) {
            let path = square_path();
            let shifted = path.point_at(u + k as f32);
            prop_assert!((shifted - path.point_at(u)).length() < 1e-2);
        }

        #[test]
        fn prop_point_at_is_finite(u in proptest::num::f32::ANY) {
            let path = square_path();
            prop_assert!(path.point_at(u).is_finite());
        }
    }
}
