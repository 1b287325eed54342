//! flythrough: an automatic camera flythrough of a 3D tunnel with clickable
//! hotspot markers.
//!
//! The camera follows a closed path at a constant speed. Clicking a marker
//! decelerates the camera to a stop and opens a popup naming the marker;
//! clicking the popup closes it and the camera resumes at full speed.
//!
//! # Quick Start
//!
//! ```no_run
//! use flythrough::*;
//!
//! fn main() -> Result<()> {
//!     // Open a window and run until it is closed
//!     show(Options::default())
//! }
//! ```
//!
//! # Embedding
//!
//! [`Scene`] is the context object a host drives directly: call
//! [`Scene::advance`] once per frame and forward pointer events to
//! [`Scene::on_pointer_move`], [`Scene::on_pointer_click`] and
//! [`Scene::on_popup_click`]. The popup is drawn through an
//! [`OverlayHost`] the host supplies.
//!
//! ```
//! use flythrough::*;
//!
//! let mut scene = Scene::new(Options::default(), RecordingOverlayHost::new()).unwrap();
//! let pose = scene.advance(1.0 / 60.0);
//! assert!(pose.position.is_finite());
//! assert_eq!(scene.marker_metadata().len(), 6);
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod app;
mod init;
mod input;
mod scene;

pub use app::TitleOverlayHost;
pub use init::{init_logging, load_options, show};
pub use input::{InputEvent, InputSender};
pub use scene::Scene;

// Re-export core types
pub use flythrough_core::{
    camera::{Camera, CameraPose},
    error::{FlythroughError, Result},
    interaction::{InteractionCoordinator, Viewport},
    marker::{Marker, MarkerInfo, MarkerSet},
    motion::{CameraMotionController, MotionPhase, MotionState},
    options::{
        CameraConfig, DecayMode, MarkerConfig, MotionConfig, Options, PathConfig, PopupConfig,
    },
    overlay::{popup_text, OverlayHost, OverlayNodeId, Popup, RecordingOverlayHost},
    path::TunnelPath,
    pick::{HitTester, MarkerHit, Ray},
    Mat4, Vec2, Vec3, Vec4,
};
