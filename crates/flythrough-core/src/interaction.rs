//! Pointer handling and popup lifecycle.

use glam::Vec2;

use crate::camera::Camera;
use crate::marker::MarkerSet;
use crate::motion::CameraMotionController;
use crate::overlay::{OverlayHost, Popup};
use crate::pick::HitTester;

/// Screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns width / height, or `None` for an invalid viewport.
    pub fn aspect_ratio(&self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }

    /// Maps a screen position (origin top-left, y down) to NDC.
    ///
    /// Positions outside the viewport are clamped to `[-1, 1]`. Returns
    /// `None` for non-finite input or an invalid viewport.
    pub fn to_ndc(&self, x: f32, y: f32) -> Option<Vec2> {
        if !self.is_valid() || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let ndc = Vec2::new(x / self.width * 2.0 - 1.0, -(y / self.height) * 2.0 + 1.0);
        Some(ndc.clamp(Vec2::NEG_ONE, Vec2::ONE))
    }

    /// Maps NDC back to a screen position.
    pub fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Routes pointer input to picking, the motion controller and the popup.
#[derive(Debug, Default)]
pub struct InteractionCoordinator {
    /// Last pointer position in NDC; the viewport center until first move.
    pointer_ndc: Vec2,
    popup: Option<Popup>,
}

impl InteractionCoordinator {
    /// Creates a coordinator with the pointer at the viewport center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached pointer position in NDC.
    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer_ndc
    }

    /// Returns the open popup, if any.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Returns true while a popup is open.
    pub fn is_popup_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Caches the pointer position. Unusable input keeps the old position.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, viewport: Viewport) {
        match viewport.to_ndc(x, y) {
            Some(ndc) => self.pointer_ndc = ndc,
            None => log::warn!("ignoring pointer move to ({x}, {y}) in {viewport:?}"),
        }
    }

    /// Hit-tests at the cached pointer position.
    ///
    /// On a hit the controller is asked to stop and the popup is opened, or
    /// updated in place if one is already open. Returns the hit marker id.
    pub fn on_pointer_click(
        &mut self,
        camera: &Camera,
        markers: &MarkerSet,
        controller: &mut CameraMotionController,
        host: &mut impl OverlayHost,
    ) -> Option<u32> {
        let Some(marker) = HitTester::test(self.pointer_ndc, camera, markers) else {
            log::debug!("click at {:?} hit nothing", self.pointer_ndc);
            return None;
        };
        let id = marker.id;
        log::debug!("click at {:?} hit marker {id}", self.pointer_ndc);

        controller.stop();
        match &mut self.popup {
            Some(popup) => popup.show_marker(host, id),
            None => self.popup = Some(Popup::open(host, id)),
        }
        Some(id)
    }

    /// Destroys the popup and resumes the camera.
    ///
    /// Returns false, changing nothing, when no popup is open.
    pub fn on_popup_click(
        &mut self,
        controller: &mut CameraMotionController,
        host: &mut impl OverlayHost,
    ) -> bool {
        let Some(popup) = self.popup.take() else {
            return false;
        };
        popup.close(host);
        controller.resume();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPose;
    use crate::options::MotionConfig;
    use crate::overlay::RecordingOverlayHost;
    use crate::path::TunnelPath;
    use glam::Vec3;

    struct Fixture {
        markers: MarkerSet,
        controller: CameraMotionController,
        host: RecordingOverlayHost,
        coordinator: InteractionCoordinator,
    }

    impl Fixture {
        fn new() -> Self {
            let path = TunnelPath::default_tunnel().unwrap();
            Self {
                markers: MarkerSet::build(&path, 6, 0.6, 0.7).unwrap(),
                controller: CameraMotionController::new(MotionConfig::default()),
                host: RecordingOverlayHost::new(),
                coordinator: InteractionCoordinator::new(),
            }
        }

        /// A camera looking straight down at a marker.
        fn camera_over(&self, id: u32) -> Camera {
            let target = self.markers.get(id).unwrap().position;
            let mut camera = Camera::new(1.0);
            camera.set_pose(CameraPose::new(target + Vec3::new(0.0, 2.0, 0.3), target));
            camera
        }

        fn click(&mut self, camera: &Camera) -> Option<u32> {
            self.coordinator.on_pointer_click(
                camera,
                &self.markers,
                &mut self.controller,
                &mut self.host,
            )
        }
    }

    #[test]
    fn test_to_ndc_corners() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.to_ndc(0.0, 0.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(viewport.to_ndc(800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(viewport.to_ndc(400.0, 300.0), Some(Vec2::ZERO));
    }

    #[test]
    fn test_to_ndc_clamps_and_rejects() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.to_ndc(-50.0, 5000.0), Some(Vec2::new(-1.0, -1.0)));
        assert!(viewport.to_ndc(f32::NAN, 0.0).is_none());
        assert!(Viewport::new(0.0, 600.0).to_ndc(1.0, 1.0).is_none());
    }

    #[test]
    fn test_ndc_to_screen_inverts_to_ndc() {
        let viewport = Viewport::new(1024.0, 768.0);
        let screen = viewport.ndc_to_screen(Vec2::new(0.25, -0.5));
        let ndc = viewport.to_ndc(screen.x, screen.y).unwrap();
        assert!((ndc - Vec2::new(0.25, -0.5)).length() < 1e-5);
    }

    #[test]
    fn test_pointer_starts_centered_and_ignores_bad_input() {
        let mut coordinator = InteractionCoordinator::new();
        assert_eq!(coordinator.pointer_ndc(), Vec2::ZERO);
        let viewport = Viewport::new(200.0, 100.0);
        coordinator.on_pointer_move(0.0, 0.0, viewport);
        assert_eq!(coordinator.pointer_ndc(), Vec2::new(-1.0, 1.0));
        coordinator.on_pointer_move(f32::INFINITY, 10.0, viewport);
        assert_eq!(coordinator.pointer_ndc(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_hit_stops_camera_and_opens_popup() {
        let mut fx = Fixture::new();
        let camera = fx.camera_over(3);
        assert_eq!(fx.click(&camera), Some(3));
        assert_eq!(fx.controller.phase(), crate::motion::MotionPhase::Stopping);
        assert_eq!(fx.coordinator.popup().map(Popup::marker_id), Some(3));
        assert_eq!(fx.host.live_texts(), vec!["Marker 3\n(click to close)"]);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut fx = Fixture::new();
        let mut camera = Camera::new(1.0);
        camera.set_pose(CameraPose::new(
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(0.0, 200.0, 0.0),
        ));
        assert_eq!(fx.click(&camera), None);
        assert!(fx.controller.is_running());
        assert!(!fx.coordinator.is_popup_open());
        assert_eq!(fx.host.created_count(), 0);
    }

    #[test]
    fn test_second_hit_updates_popup_in_place() {
        let mut fx = Fixture::new();
        let first = fx.camera_over(2);
        let second = fx.camera_over(5);
        fx.click(&first);
        fx.click(&second);
        assert_eq!(fx.host.live_count(), 1);
        assert_eq!(fx.host.created_count(), 1);
        assert_eq!(fx.coordinator.popup().map(Popup::marker_id), Some(5));
        assert_eq!(fx.host.live_texts(), vec!["Marker 5\n(click to close)"]);
    }

    #[test]
    fn test_popup_click_destroys_and_resumes() {
        let mut fx = Fixture::new();
        let camera = fx.camera_over(1);
        fx.click(&camera);
        assert!(fx
            .coordinator
            .on_popup_click(&mut fx.controller, &mut fx.host));
        assert_eq!(fx.host.live_count(), 0);
        assert!(fx.controller.is_running());
        assert_eq!(fx.controller.speed(), fx.controller.nominal_speed());
    }

    #[test]
    fn test_popup_click_without_popup_is_noop() {
        let mut fx = Fixture::new();
        fx.controller.stop();
        assert!(!fx
            .coordinator
            .on_popup_click(&mut fx.controller, &mut fx.host));
        // Nothing resumed the camera.
        assert!(!fx.controller.is_running());
        assert_eq!(fx.host.destroyed_count(), 0);
    }
}
