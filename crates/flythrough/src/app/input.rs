use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use super::App;
use crate::FlythroughError;

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.scene.overlay_host().base_title())
            .with_inner_size(LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.error = Some(FlythroughError::EventLoop(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.scene.resize(size.width as f32, size.height as f32);
        self.scene.overlay_host_mut().attach(window.clone());
        self.window = Some(window);
        log::info!("flythrough window opened at {}x{}", size.width, size.height);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.scene.resize(size.width as f32, size.height as f32);
            }
            WindowEvent::RedrawRequested => {
                let dt = self.frame_delta();
                let pose = self.scene.advance(dt);
                log::trace!(
                    "frame {}: camera at {:?} looking at {:?}",
                    self.scene.frame_count(),
                    pose.position,
                    pose.look_at
                );
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = (position.x as f32, position.y as f32);
                self.scene.on_pointer_move(self.mouse_pos.0, self.mouse_pos.1);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.scene.on_popup_click();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
