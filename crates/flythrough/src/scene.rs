//! The scene context that ties path, markers, motion and interaction together.

use std::sync::mpsc::{self, Receiver, Sender};

use flythrough_core::{
    Camera, CameraMotionController, CameraPose, InteractionCoordinator, MarkerInfo, MarkerSet,
    Options, OverlayHost, Popup, Result, TunnelPath, Viewport,
};

use crate::input::{InputEvent, InputSender};

/// One flythrough session.
///
/// All mutable state lives here and is only touched through `&mut self`, so
/// a host can run several scenes side by side. Input from other threads goes
/// through [`Scene::input_sender`] and is applied at the start of the next
/// [`Scene::advance`].
pub struct Scene<H: OverlayHost> {
    options: Options,
    path: TunnelPath,
    markers: MarkerSet,
    controller: CameraMotionController,
    camera: Camera,
    coordinator: InteractionCoordinator,
    viewport: Viewport,
    host: H,
    input_tx: Sender<InputEvent>,
    input_rx: Receiver<InputEvent>,
    frame_count: u64,
}

impl<H: OverlayHost> Scene<H> {
    /// Builds a scene from validated options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid marker count, marker
    /// size, path, or any other out-of-range option.
    pub fn new(options: Options, host: H) -> Result<Self> {
        options.validate()?;

        let path = TunnelPath::from_config(&options.path)?;
        let markers = MarkerSet::from_config(&path, &options.markers)?;
        let controller = CameraMotionController::new(options.motion.clone());
        let mut camera = Camera::from_config(&options.camera);
        camera.set_pose(controller.pose_on(&path));

        let viewport = Viewport::new(1280.0, 1280.0 / options.camera.aspect_ratio);
        let (input_tx, input_rx) = mpsc::channel();

        log::info!(
            "scene built: {} markers on a path of length {:.2}",
            markers.len(),
            path.length()
        );

        Ok(Self {
            options,
            path,
            markers,
            controller,
            camera,
            coordinator: InteractionCoordinator::new(),
            viewport,
            host,
            input_tx,
            input_rx,
            frame_count: 0,
        })
    }

    /// Advances one frame.
    ///
    /// Queued input is applied first, then the camera moves exactly once.
    /// Returns the pose the frame should be rendered with.
    pub fn advance(&mut self, dt: f32) -> CameraPose {
        while let Ok(event) = self.input_rx.try_recv() {
            self.dispatch(event);
        }

        let pose = self.controller.advance(dt, &self.path);
        self.camera.set_pose(pose);
        self.frame_count += 1;
        self.check_invariants();
        pose
    }

    /// Applies one input event immediately.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.on_pointer_move(x, y),
            InputEvent::Click => {
                self.on_pointer_click();
            }
            InputEvent::PopupClick => {
                self.on_popup_click();
            }
            InputEvent::Resized { width, height } => self.resize(width, height),
        }
    }

    /// Returns a sender for queuing input from any thread.
    pub fn input_sender(&self) -> InputSender {
        InputSender {
            tx: self.input_tx.clone(),
        }
    }

    /// Records the pointer position in screen pixels.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.coordinator.on_pointer_move(x, y, self.viewport);
    }

    /// Handles a click in the scene. Returns the id of the marker hit.
    pub fn on_pointer_click(&mut self) -> Option<u32> {
        let hit = self.coordinator.on_pointer_click(
            &self.camera,
            &self.markers,
            &mut self.controller,
            &mut self.host,
        );
        self.check_invariants();
        hit
    }

    /// Handles a click on the popup. Returns false if no popup was open.
    pub fn on_popup_click(&mut self) -> bool {
        let closed = self
            .coordinator
            .on_popup_click(&mut self.controller, &mut self.host);
        self.check_invariants();
        closed
    }

    /// Updates the viewport and camera aspect ratio. Invalid sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        match viewport.aspect_ratio() {
            Some(aspect) => {
                self.viewport = viewport;
                self.camera.set_aspect_ratio(aspect);
            }
            None => log::warn!("ignoring resize to {width}x{height}"),
        }
    }

    /// Returns the options the scene was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the tunnel path.
    pub fn path(&self) -> &TunnelPath {
        &self.path
    }

    /// Returns the markers.
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Returns `{id, position}` for every marker.
    pub fn marker_metadata(&self) -> Vec<MarkerInfo> {
        self.markers.metadata()
    }

    /// Returns the marker metadata as a JSON array.
    pub fn marker_metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.marker_metadata())?)
    }

    /// Returns the motion controller.
    pub fn controller(&self) -> &CameraMotionController {
        &self.controller
    }

    /// Returns the camera as of the last frame.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Returns the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the open popup, if any.
    pub fn popup(&self) -> Option<&Popup> {
        self.coordinator.popup()
    }

    /// Returns the cached pointer position in NDC.
    pub fn pointer_ndc(&self) -> glam::Vec2 {
        self.coordinator.pointer_ndc()
    }

    /// Returns the overlay host.
    pub fn overlay_host(&self) -> &H {
        &self.host
    }

    /// Returns the overlay host mutably.
    pub fn overlay_host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the number of frames advanced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn check_invariants(&self) {
        debug_assert!(
            !self.coordinator.is_popup_open() || !self.controller.is_running(),
            "popup open while the camera is running"
        );
    }
}
