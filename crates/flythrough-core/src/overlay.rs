//! Popup overlay handle.
//!
//! The popup is an externally owned resource. [`OverlayHost`] is the seam to
//! whatever draws it; [`Popup`] is the owned handle that guarantees one live
//! node per handle, created on open and destroyed on close.

use std::collections::BTreeMap;

/// Opaque identifier for a node created by an [`OverlayHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayNodeId(pub u64);

/// Something that can show text overlays on top of the scene.
pub trait OverlayHost {
    /// Creates a new overlay node showing `text`.
    fn create_node(&mut self, text: &str) -> OverlayNodeId;

    /// Replaces the text of an existing node.
    fn set_text(&mut self, node: OverlayNodeId, text: &str);

    /// Removes a node. Unknown ids are ignored.
    fn destroy_node(&mut self, node: OverlayNodeId);
}

/// Text shown in the popup for a marker.
pub fn popup_text(marker_id: u32) -> String {
    format!("Marker {marker_id}\n(click to close)")
}

/// An open popup. Dropping the handle without [`Popup::close`] leaks the
/// node on the host, so owners always close it explicitly.
#[derive(Debug, PartialEq, Eq)]
pub struct Popup {
    node: OverlayNodeId,
    marker_id: u32,
}

impl Popup {
    /// Creates the popup node for a marker.
    pub fn open(host: &mut impl OverlayHost, marker_id: u32) -> Self {
        let node = host.create_node(&popup_text(marker_id));
        log::info!("popup opened for marker {marker_id}");
        Self { node, marker_id }
    }

    /// Points the existing popup at another marker, in place.
    pub fn show_marker(&mut self, host: &mut impl OverlayHost, marker_id: u32) {
        host.set_text(self.node, &popup_text(marker_id));
        if marker_id != self.marker_id {
            log::info!("popup switched from marker {} to {marker_id}", self.marker_id);
        }
        self.marker_id = marker_id;
    }

    /// Destroys the popup node.
    pub fn close(self, host: &mut impl OverlayHost) {
        host.destroy_node(self.node);
        log::info!("popup for marker {} dismissed", self.marker_id);
    }

    /// Returns the marker the popup refers to.
    pub fn marker_id(&self) -> u32 {
        self.marker_id
    }

    /// Returns the host node id.
    pub fn node(&self) -> OverlayNodeId {
        self.node
    }
}

/// In-memory overlay host that records what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingOverlayHost {
    next_id: u64,
    live: BTreeMap<OverlayNodeId, String>,
    created: usize,
    destroyed: usize,
}

impl RecordingOverlayHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes currently alive.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Returns the text of a live node.
    pub fn text(&self, node: OverlayNodeId) -> Option<&str> {
        self.live.get(&node).map(String::as_str)
    }

    /// Returns the texts of all live nodes, oldest first.
    pub fn live_texts(&self) -> Vec<&str> {
        self.live.values().map(String::as_str).collect()
    }

    /// Total nodes ever created.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Total nodes ever destroyed.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl OverlayHost for RecordingOverlayHost {
    fn create_node(&mut self, text: &str) -> OverlayNodeId {
        self.next_id += 1;
        let id = OverlayNodeId(self.next_id);
        self.live.insert(id, text.to_string());
        self.created += 1;
        id
    }

    fn set_text(&mut self, node: OverlayNodeId, text: &str) {
        if let Some(existing) = self.live.get_mut(&node) {
            *existing = text.to_string();
        }
    }

    fn destroy_node(&mut self, node: OverlayNodeId) {
        if self.live.remove(&node).is_some() {
            self.destroyed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_lifecycle() {
        let mut host = RecordingOverlayHost::new();
        let mut popup = Popup::open(&mut host, 3);
        assert_eq!(host.live_count(), 1);
        assert_eq!(host.text(popup.node()), Some("Marker 3\n(click to close)"));

        popup.show_marker(&mut host, 5);
        assert_eq!(host.live_count(), 1);
        assert_eq!(popup.marker_id(), 5);
        assert_eq!(host.text(popup.node()), Some(popup_text(5).as_str()));

        popup.close(&mut host);
        assert_eq!(host.live_count(), 0);
        assert_eq!(host.created_count(), 1);
        assert_eq!(host.destroyed_count(), 1);
    }

    #[test]
    fn test_destroy_unknown_node_is_ignored() {
        let mut host = RecordingOverlayHost::new();
        host.destroy_node(OverlayNodeId(42));
        assert_eq!(host.destroyed_count(), 0);
    }

    #[test]
    fn test_node_ids_are_unique() {
        let mut host = RecordingOverlayHost::new();
        let a = host.create_node("a");
        let b = host.create_node("b");
        assert_ne!(a, b);
        assert_eq!(host.live_texts(), vec!["a", "b"]);
    }
}
