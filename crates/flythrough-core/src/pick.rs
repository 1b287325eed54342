//! Pointer ray picking against markers.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::marker::{Marker, MarkerSet};

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// Returns `None` if the direction is zero or not finite.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalize_or_zero();
        if direction.length_squared() < 1e-12 || !origin.is_finite() {
            return None;
        }
        Some(Self { origin, direction })
    }

    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Slab-method ray/AABB intersection.
///
/// Returns the entry distance. A ray that starts inside the box only sees
/// its back faces and misses, as does a box behind the origin.
pub fn ray_aabb_hit_t(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        if direction.abs() < 1e-12 {
            // Parallel to this slab: must already be inside it.
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / direction;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    (t_min >= 0.0).then_some(t_min)
}

/// The nearest marker hit by a pointer ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHit {
    /// Id of the marker that was hit.
    pub marker_id: u32,
    /// Ray parameter of the hit.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

/// Finds the marker under the pointer.
pub struct HitTester;

impl HitTester {
    /// Returns the nearest marker hit by the ray through `ndc`, if any.
    pub fn test<'a>(ndc: Vec2, camera: &Camera, markers: &'a MarkerSet) -> Option<&'a Marker> {
        let hit = Self::test_hit(ndc, camera, markers)?;
        markers.get(hit.marker_id)
    }

    /// Like [`HitTester::test`], but also reports the hit distance and point.
    ///
    /// Among all hits the smallest ray parameter wins; equal distances go to
    /// the lower marker id. Coordinates outside `[-1, 1]` are clamped.
    pub fn test_hit(ndc: Vec2, camera: &Camera, markers: &MarkerSet) -> Option<MarkerHit> {
        if !ndc.is_finite() {
            return None;
        }
        let ndc = ndc.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let ray = camera.ray_from_ndc(ndc)?;
        Self::test_ray(&ray, markers)
    }

    /// Intersects a world-space ray with every marker's bounding box.
    pub fn test_ray(ray: &Ray, markers: &MarkerSet) -> Option<MarkerHit> {
        let mut best: Option<MarkerHit> = None;

        for marker in markers.iter() {
            let (min, max) = marker.bounds();
            let Some(t) = ray_aabb_hit_t(ray, min, max) else {
                continue;
            };
            let is_better = best.as_ref().is_none_or(|b| {
                t < b.distance || (t == b.distance && marker.id < b.marker_id)
            });
            if is_better {
                best = Some(MarkerHit {
                    marker_id: marker.id,
                    distance: t,
                    point: ray.at(t),
                });
            }
        }

        best
    }
}
