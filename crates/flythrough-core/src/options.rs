//! Configuration options for flythrough.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{FlythroughError, Result};

/// All configuration for a flythrough scene.
///
/// Every section falls back to its defaults when missing from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Path control points and sampling resolution.
    pub path: PathConfig,
    /// Marker placement and appearance.
    pub markers: MarkerConfig,
    /// Camera motion and deceleration.
    pub motion: MotionConfig,
    /// Camera projection.
    pub camera: CameraConfig,
    /// Popup click region in the windowed host.
    pub popup: PopupConfig,
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path configuration.
    pub fn with_path(mut self, path: PathConfig) -> Self {
        self.path = path;
        self
    }

    /// Sets the marker configuration.
    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    /// Sets the motion configuration.
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Sets the camera configuration.
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Parses options from a JSON string and validates them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file and validates them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&contents)?;
        log::info!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.path.validate()?;
        self.markers.validate()?;
        self.motion.validate()?;
        self.camera.validate()?;
        self.popup.validate()
    }
}

/// Control points of the closed tunnel path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Points the closed curve passes through, in order.
    pub control_points: Vec<Vec3>,
    /// Number of samples in the arc-length lookup table.
    pub arc_length_divisions: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            control_points: default_control_points(),
            arc_length_divisions: 200,
        }
    }
}

impl PathConfig {
    /// Creates a path configuration from control points.
    pub fn new(control_points: Vec<Vec3>) -> Self {
        Self {
            control_points,
            ..Self::default()
        }
    }

    /// Sets the arc-length table resolution.
    pub fn with_arc_length_divisions(mut self, divisions: usize) -> Self {
        self.arc_length_divisions = divisions;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.control_points.len() < 3 {
            return Err(FlythroughError::MalformedPath(format!(
                "at least 3 control points are required, got {}",
                self.control_points.len()
            )));
        }
        if let Some(i) = self.control_points.iter().position(|p| !p.is_finite()) {
            return Err(FlythroughError::MalformedPath(format!(
                "control point {i} is not finite"
            )));
        }
        if self.arc_length_divisions == 0 {
            return Err(FlythroughError::MalformedPath(
                "arc_length_divisions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A wobbling ring, roughly 20 units across, used when no path is given.
pub fn default_control_points() -> Vec<Vec3> {
    const COUNT: usize = 12;
    (0..COUNT)
        .map(|i| {
            let a = i as f32 / COUNT as f32 * std::f32::consts::TAU;
            Vec3::new(
                10.0 * a.cos() + 2.0 * (3.0 * a).cos(),
                2.0 * (2.0 * a).sin(),
                10.0 * a.sin() + 2.0 * (3.0 * a).sin(),
            )
        })
        .collect()
}

/// Marker placement and appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Number of markers spread evenly along the path.
    pub count: usize,
    /// Edge length of each marker cube.
    pub size: f32,
    /// Hue added to the marker's path parameter (wrapped to [0, 1)).
    pub hue_offset: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            count: 6,
            size: 0.6,
            hue_offset: 0.7,
        }
    }
}

impl MarkerConfig {
    /// Sets the number of markers.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the marker cube edge length.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(FlythroughError::InvalidMarkerCount(self.count));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(FlythroughError::InvalidMarkerSize(self.size));
        }
        if !self.hue_offset.is_finite() {
            return Err(FlythroughError::InvalidOption(
                "markers.hue_offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the stopping deceleration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DecayMode {
    /// Multiply the speed by the decay factor once per frame.
    ///
    /// Stop duration depends on the frame rate.
    #[default]
    PerFrame,
    /// Scale the decay by elapsed time, as if frames arrived at a fixed rate.
    TimeScaled {
        /// Frame rate the decay factor is calibrated for.
        frames_per_second: f32,
    },
}

/// Camera motion along the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Running speed, in virtual seconds per real second.
    pub nominal_speed: f32,
    /// Virtual seconds for one full loop of the path.
    pub loop_period: f32,
    /// How far ahead on the path the camera looks (normalized parameter).
    pub lookahead_offset: f32,
    /// Multiplicative speed reduction while stopping.
    pub decay_factor: f32,
    /// Speed below which a stopping camera snaps to rest.
    pub speed_epsilon: f32,
    /// Whether the decay is per frame or per unit time.
    pub decay_mode: DecayMode,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            nominal_speed: 0.5,
            loop_period: 20.0,
            lookahead_offset: 0.03,
            decay_factor: 0.95,
            speed_epsilon: 0.01,
            decay_mode: DecayMode::PerFrame,
        }
    }
}

impl MotionConfig {
    /// Sets the running speed.
    pub fn with_nominal_speed(mut self, speed: f32) -> Self {
        self.nominal_speed = speed;
        self
    }

    /// Sets the loop period.
    pub fn with_loop_period(mut self, period: f32) -> Self {
        self.loop_period = period;
        self
    }

    /// Sets the decay factor.
    pub fn with_decay_factor(mut self, factor: f32) -> Self {
        self.decay_factor = factor;
        self
    }

    /// Sets the decay mode.
    pub fn with_decay_mode(mut self, mode: DecayMode) -> Self {
        self.decay_mode = mode;
        self
    }

    fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(FlythroughError::InvalidOption(format!(
                    "motion.{name} must be positive and finite, got {v}"
                )))
            }
        };
        positive("nominal_speed", self.nominal_speed)?;
        positive("loop_period", self.loop_period)?;
        positive("speed_epsilon", self.speed_epsilon)?;
        if !(0.0..1.0).contains(&self.lookahead_offset) {
            return Err(FlythroughError::InvalidOption(format!(
                "motion.lookahead_offset must be in [0, 1), got {}",
                self.lookahead_offset
            )));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(FlythroughError::InvalidOption(format!(
                "motion.decay_factor must be in (0, 1), got {}",
                self.decay_factor
            )));
        }
        if let DecayMode::TimeScaled { frames_per_second } = self.decay_mode {
            positive("decay_mode.frames_per_second", frames_per_second)?;
        }
        Ok(())
    }
}

/// Camera projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Initial aspect ratio (width / height), updated on resize.
    pub aspect_ratio: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(FlythroughError::InvalidOption(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near.is_finite() && self.near > 0.0 && self.far.is_finite() && self.far > self.near)
        {
            return Err(FlythroughError::InvalidOption(format!(
                "camera clip range must satisfy 0 < near < far, got {}..{}",
                self.near, self.far
            )));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(FlythroughError::InvalidOption(format!(
                "camera.aspect_ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Screen-space rectangle of the popup, in pixels from the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            width: 240.0,
            height: 60.0,
        }
    }
}

impl PopupConfig {
    /// Returns true if the screen point lies inside the popup rectangle.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    fn validate(&self) -> Result<()> {
        let all_finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || self.width < 0.0 || self.height < 0.0 {
            return Err(FlythroughError::InvalidOption(
                "popup rectangle must be finite with non-negative size".to_string(),
            ));
        }
        Ok(())
    }
}
