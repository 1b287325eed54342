//! Overlay host that shows the popup in the window title.

use std::sync::Arc;

use winit::window::Window;

use crate::{OverlayHost, OverlayNodeId};

/// Shows at most one overlay node as a suffix of the window title.
pub struct TitleOverlayHost {
    base_title: String,
    window: Option<Arc<Window>>,
    node: Option<(OverlayNodeId, String)>,
    next_id: u64,
}

impl TitleOverlayHost {
    /// Creates a host with the given base window title.
    pub fn new(base_title: impl Into<String>) -> Self {
        Self {
            base_title: base_title.into(),
            window: None,
            node: None,
            next_id: 0,
        }
    }

    /// Connects the host to its window and redraws the title.
    pub fn attach(&mut self, window: Arc<Window>) {
        self.window = Some(window);
        self.refresh();
    }

    /// Returns the title shown when no popup is open.
    pub fn base_title(&self) -> &str {
        &self.base_title
    }

    /// Returns the full title for the current state.
    pub fn title(&self) -> String {
        match &self.node {
            Some((_, text)) => format!("{} | {}", self.base_title, text.replace('\n', " ")),
            None => self.base_title.clone(),
        }
    }

    fn refresh(&self) {
        if let Some(window) = &self.window {
            window.set_title(&self.title());
        }
    }
}

impl OverlayHost for TitleOverlayHost {
    fn create_node(&mut self, text: &str) -> OverlayNodeId {
        if let Some((old, _)) = &self.node {
            log::warn!("replacing overlay node {old:?}; the title holds a single node");
        }
        self.next_id += 1;
        let id = OverlayNodeId(self.next_id);
        self.node = Some((id, text.to_string()));
        self.refresh();
        id
    }

    fn set_text(&mut self, node: OverlayNodeId, text: &str) {
        if let Some((id, current)) = &mut self.node {
            if *id == node {
                *current = text.to_string();
                self.refresh();
            }
        }
    }

    fn destroy_node(&mut self, node: OverlayNodeId) {
        if self.node.as_ref().is_some_and(|(id, _)| *id == node) {
            self.node = None;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_tracks_node() {
        let mut host = TitleOverlayHost::new("flythrough");
        assert_eq!(host.title(), "flythrough");

        let node = host.create_node("Marker 2\n(click to close)");
        assert_eq!(host.title(), "flythrough | Marker 2 (click to close)");

        host.set_text(node, "Marker 4\n(click to close)");
        assert_eq!(host.title(), "flythrough | Marker 4 (click to close)");

        host.destroy_node(node);
        assert_eq!(host.title(), "flythrough");
    }

    #[test]
    fn test_stale_node_ignored() {
        let mut host = TitleOverlayHost::new("t");
        let first = host.create_node("a");
        host.destroy_node(first);
        let second = host.create_node("b");
        host.set_text(first, "stale");
        host.destroy_node(first);
        assert_eq!(host.title(), "t | b");
        assert_ne!(first, second);
    }
}
