//! Core logic for flythrough.
//!
//! This crate provides everything the camera flythrough needs apart from
//! windowing and drawing:
//! - [`TunnelPath`] closed 3D path with arc-length sampling
//! - [`MarkerSet`] clickable markers placed along the path
//! - [`HitTester`] pointer ray picking against markers
//! - [`CameraMotionController`] time-driven motion with stop/resume
//! - [`InteractionCoordinator`] pointer handling and the popup overlay
//! - Configuration options and error types

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Marker counts and table indices are small; float casts are intended
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod camera;
pub mod color;
pub mod error;
pub mod interaction;
pub mod marker;
pub mod motion;
pub mod options;
pub mod overlay;
pub mod path;
pub mod pick;

pub use camera::{Camera, CameraPose};
pub use error::{FlythroughError, Result};
pub use interaction::{InteractionCoordinator, Viewport};
pub use marker::{Marker, MarkerInfo, MarkerSet};
pub use motion::{CameraMotionController, MotionPhase, MotionState};
pub use options::{
    CameraConfig, DecayMode, MarkerConfig, MotionConfig, Options, PathConfig, PopupConfig,
};
pub use overlay::{popup_text, OverlayHost, OverlayNodeId, Popup, RecordingOverlayHost};
pub use path::TunnelPath;
pub use pick::{ray_aabb_hit_t, HitTester, MarkerHit, Ray};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
