//! Application window and event loop management.

mod input;
mod title_overlay;

use std::sync::Arc;
use std::time::Instant;

use winit::{event_loop::EventLoop, window::Window};

use crate::{FlythroughError, PopupConfig, Result, Scene};

pub use title_overlay::TitleOverlayHost;

/// The windowed flythrough application state.
pub struct App {
    pub(super) scene: Scene<TitleOverlayHost>,
    pub(super) window: Option<Arc<Window>>,
    // Cursor position in physical pixels
    pub(super) mouse_pos: (f32, f32),
    // Screen region that counts as a click on the popup
    pub(super) popup_rect: PopupConfig,
    // Frame timing for the motion controller
    pub(super) last_frame_time: Option<Instant>,
    // First fatal error raised inside the event loop
    pub(super) error: Option<FlythroughError>,
}

impl App {
    /// Creates the application around a scene.
    pub fn new(scene: Scene<TitleOverlayHost>) -> Self {
        let popup_rect = scene.options().popup.clone();
        Self {
            scene,
            window: None,
            mouse_pos: (0.0, 0.0),
            popup_rect,
            last_frame_time: None,
            error: None,
        }
    }

    /// Returns the seconds since the previous frame (zero on the first).
    pub(super) fn frame_delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last_frame_time
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame_time = Some(now);
        dt
    }

    /// Routes a left click to the popup or to the scene.
    pub(super) fn handle_click(&mut self) {
        let (x, y) = self.mouse_pos;
        if self.scene.popup().is_some() && self.popup_rect.contains(x, y) {
            self.scene.on_popup_click();
        } else {
            self.scene.on_pointer_click();
        }
    }
}

/// Runs the flythrough application until the window is closed.
pub fn run_app(scene: Scene<TitleOverlayHost>) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| FlythroughError::EventLoop(e.to_string()))?;
    let mut app = App::new(scene);

    event_loop
        .run_app(&mut app)
        .map_err(|e| FlythroughError::EventLoop(e.to_string()))?;

    log::info!(
        "flythrough closed after {} frames",
        app.scene.frame_count()
    );
    app.error.map_or(Ok(()), Err)
}
