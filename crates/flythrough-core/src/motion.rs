//! Camera motion along the tunnel path.
//!
//! The camera position is a pure function of accumulated virtual time: each
//! frame adds `dt * speed`, and the normalized path parameter is virtual time
//! modulo the loop period. Stopping never snaps; it decays the speed
//! multiplicatively until it falls below an epsilon, and resuming restores
//! the nominal speed at once.

use crate::camera::CameraPose;
use crate::options::{DecayMode, MotionConfig};
use crate::path::TunnelPath;

/// Motion state with the speed carried by the states that move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    /// Moving at a constant speed.
    Running { speed: f32 },
    /// Decelerating toward rest after a stop request.
    Stopping { speed: f32 },
    /// At rest; the pose is frozen.
    Stopped,
}

impl MotionState {
    /// Returns the current speed (zero when stopped).
    pub fn speed(&self) -> f32 {
        match *self {
            MotionState::Running { speed } | MotionState::Stopping { speed } => speed,
            MotionState::Stopped => 0.0,
        }
    }

    /// Returns the state without its payload.
    pub fn phase(&self) -> MotionPhase {
        match self {
            MotionState::Running { .. } => MotionPhase::Running,
            MotionState::Stopping { .. } => MotionPhase::Stopping,
            MotionState::Stopped => MotionPhase::Stopped,
        }
    }
}

/// Payload-free view of [`MotionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    Running,
    Stopping,
    Stopped,
}

/// Advances the camera along the path once per frame.
#[derive(Debug, Clone)]
pub struct CameraMotionController {
    config: MotionConfig,
    state: MotionState,
    /// Virtual time, kept in `[0, loop_period)`.
    elapsed: f32,
    last_pose: Option<CameraPose>,
}

impl CameraMotionController {
    /// Creates a running controller at the start of the path.
    pub fn new(config: MotionConfig) -> Self {
        Self {
            state: MotionState::Running {
                speed: config.nominal_speed,
            },
            config,
            elapsed: 0.0,
            last_pose: None,
        }
    }

    /// Returns the motion configuration.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> MotionPhase {
        self.state.phase()
    }

    /// Returns the current speed.
    pub fn speed(&self) -> f32 {
        self.state.speed()
    }

    /// Returns the speed used while running.
    pub fn nominal_speed(&self) -> f32 {
        self.config.nominal_speed
    }

    /// Returns true while running at nominal speed.
    pub fn is_running(&self) -> bool {
        matches!(self.state, MotionState::Running { .. })
    }

    /// Returns true once fully at rest.
    pub fn is_stopped(&self) -> bool {
        matches!(self.state, MotionState::Stopped)
    }

    /// Returns the accumulated virtual time, wrapped to the loop period.
    pub fn elapsed_virtual_time(&self) -> f32 {
        self.elapsed
    }

    /// Returns the normalized path parameter of the camera position.
    pub fn current_param(&self) -> f32 {
        self.elapsed / self.config.loop_period
    }

    /// Returns the pose computed by the most recent moving frame.
    pub fn last_pose(&self) -> Option<CameraPose> {
        self.last_pose
    }

    /// Computes the pose for the current virtual time without advancing.
    pub fn pose_on(&self, path: &TunnelPath) -> CameraPose {
        let u = self.current_param();
        let position = path.point_at(u);
        let look_at = path.point_at((u + self.config.lookahead_offset).rem_euclid(1.0));
        CameraPose::new(position, look_at)
    }

    /// Advances one frame and returns the camera pose to render with.
    ///
    /// A stopped controller returns its last pose unchanged. Negative or
    /// non-finite `dt` counts as zero.
    pub fn advance(&mut self, dt: f32, path: &TunnelPath) -> CameraPose {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.state {
            MotionState::Running { speed } => {
                self.accumulate(dt * speed);
            }
            MotionState::Stopping { speed } => {
                self.accumulate(dt * speed);
                let decayed = speed * self.decay_multiplier(dt);
                if decayed < self.config.speed_epsilon {
                    log::debug!("camera stopped at u = {:.4}", self.current_param());
                    self.state = MotionState::Stopped;
                } else {
                    self.state = MotionState::Stopping { speed: decayed };
                }
            }
            MotionState::Stopped => {
                if let Some(pose) = self.last_pose {
                    return pose;
                }
            }
        }

        let pose = self.pose_on(path);
        self.last_pose = Some(pose);
        pose
    }

    /// Requests a smooth stop. Returns false if already stopping or stopped.
    pub fn stop(&mut self) -> bool {
        match self.state {
            MotionState::Running { speed } => {
                log::debug!("camera stopping from speed {speed}");
                self.state = MotionState::Stopping { speed };
                true
            }
            MotionState::Stopping { .. } | MotionState::Stopped => false,
        }
    }

    /// Resumes at nominal speed. Returns false if already running.
    pub fn resume(&mut self) -> bool {
        match self.state {
            MotionState::Running { .. } => false,
            MotionState::Stopping { .. } | MotionState::Stopped => {
                log::debug!("camera resuming at speed {}", self.config.nominal_speed);
                self.state = MotionState::Running {
                    speed: self.config.nominal_speed,
                };
                true
            }
        }
    }

    fn accumulate(&mut self, virtual_dt: f32) {
        self.elapsed = (self.elapsed + virtual_dt).rem_euclid(self.config.loop_period);
        if self.elapsed >= self.config.loop_period {
            self.elapsed = 0.0;
        }
    }

    fn decay_multiplier(&self, dt: f32) -> f32 {
        match self.config.decay_mode {
            DecayMode::PerFrame => self.config.decay_factor,
            DecayMode::TimeScaled { frames_per_second } => {
                self.config.decay_factor.powf(dt * frames_per_second)
            }
        }
    }
}
