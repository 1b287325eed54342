//! Input events queued for the next frame.

use std::sync::mpsc::{SendError, Sender};

/// A host input event, applied by the scene at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a screen position (pixels, origin top-left).
    PointerMoved { x: f32, y: f32 },
    /// Pointer clicked in the scene.
    Click,
    /// Pointer clicked on the popup.
    PopupClick,
    /// Viewport resized (pixels).
    Resized { width: f32, height: f32 },
}

/// Cloneable handle for sending input from other threads.
///
/// Events are applied in send order on the scene's own thread, before the
/// next [`Scene::advance`](crate::Scene::advance) moves the camera.
#[derive(Debug, Clone)]
pub struct InputSender {
    pub(crate) tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queues an event. Fails only if the scene has been dropped.
    pub fn send(&self, event: InputEvent) -> Result<(), SendError<InputEvent>> {
        self.tx.send(event)
    }
}
