//! Camera and view management.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::options::CameraConfig;
use crate::pick::Ray;

/// Camera placement derived from the path each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub look_at: Vec3,
}

impl CameraPose {
    /// Creates a new pose.
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Returns the unit viewing direction, or zero if degenerate.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }
}

/// A perspective camera for viewing the tunnel.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Creates a camera from its configuration section.
    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.aspect_ratio);
        camera.set_fov_degrees(config.fov_degrees);
        camera.set_near(config.near);
        camera.set_far(config.far);
        camera
    }

    /// Moves the camera to a pose.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.look_at;
    }

    /// Returns the current pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    /// Sets the aspect ratio. Non-positive values are ignored.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Returns the view matrix.
    ///
    /// When the view direction is (anti)parallel to `up`, an alternate up
    /// vector keeps the basis well defined.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            if self.up.dot(Vec3::Z).abs() < 0.99 {
                Vec3::Z
            } else {
                Vec3::X
            }
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    /// Returns the projection matrix (right-handed, depth in `[0, 1]`).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Builds a world-space ray from the camera position through a
    /// normalized device coordinate.
    ///
    /// Returns `None` if the camera matrices are degenerate.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inv_view_proj = self.view_projection_matrix().inverse();

        let far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        if far.w.abs() < 1e-6 {
            return None;
        }

        let ray_far = far.truncate() / far.w;
        Ray::new(self.position, ray_far - self.position)
    }

    /// Projects a world point to normalized device coordinates.
    ///
    /// Returns `None` for points behind the camera.
    #[must_use]
    pub fn project_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Sets the near clipping plane.
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(0.001);
    }

    /// Sets the far clipping plane.
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
