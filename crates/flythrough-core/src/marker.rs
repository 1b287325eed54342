//! Interactive markers placed along the tunnel path.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_rgb, srgb_to_linear};
use crate::error::{FlythroughError, Result};
use crate::options::MarkerConfig;
use crate::path::TunnelPath;

/// A clickable cube sitting on the path.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable id, dense from 1 to the marker count.
    pub id: u32,
    /// World-space center.
    pub position: Vec3,
    /// Normalized path parameter in `(0, 1]`.
    pub param: f32,
    /// Linear RGB color derived from `param`.
    pub color: Vec3,
    /// Half the cube edge length.
    pub half_extent: f32,
}

impl Marker {
    /// Returns the axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let half = Vec3::splat(self.half_extent);
        (self.position - half, self.position + half)
    }

    /// Returns the externally visible metadata for this marker.
    pub fn info(&self) -> MarkerInfo {
        MarkerInfo {
            id: self.id,
            position: self.position,
        }
    }
}

/// Marker metadata exposed to the host, e.g. for analytics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerInfo {
    pub id: u32,
    pub position: Vec3,
}

/// A fixed, ordered collection of markers.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    /// Places `count` markers at `u = (i + 1) / count` along the path.
    ///
    /// Marker `i` gets id `i + 1` and hue `hue_offset + u` (wrapped).
    pub fn build(path: &TunnelPath, count: usize, size: f32, hue_offset: f32) -> Result<Self> {
        if count == 0 {
            return Err(FlythroughError::InvalidMarkerCount(count));
        }
        if !(size.is_finite() && size > 0.0) {
            return Err(FlythroughError::InvalidMarkerSize(size));
        }
        let count_u32 =
            u32::try_from(count).map_err(|_| FlythroughError::InvalidMarkerCount(count))?;

        let markers = (1..=count_u32)
            .map(|id| {
                let param = id as f32 / count as f32;
                Marker {
                    id,
                    position: path.point_at(param),
                    param,
                    color: srgb_to_linear(hsl_to_rgb(hue_offset + param, 1.0, 0.5)),
                    half_extent: size * 0.5,
                }
            })
            .collect();

        Ok(Self { markers })
    }

    /// Wraps markers as-is, for tests that need hand-placed layouts.
    #[cfg(test)]
    pub(crate) fn from_markers(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// Builds a marker set from its configuration section.
    pub fn from_config(path: &TunnelPath, config: &MarkerConfig) -> Result<Self> {
        Self::build(path, config.count, config.size, config.hue_offset)
    }

    /// Returns all markers ordered by id.
    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns an iterator over the markers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Looks up a marker by id.
    pub fn get(&self, id: u32) -> Option<&Marker> {
        // Ids are dense and start at 1.
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.markers.get(index)
    }

    /// Returns the number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if there are no markers, which `build` never produces.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns `{id, position}` for every marker.
    pub fn metadata(&self) -> Vec<MarkerInfo> {
        self.markers.iter().map(Marker::info).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path() -> TunnelPath {
        TunnelPath::default_tunnel().unwrap()
    }

    #[test]
    fn test_six_markers_evenly_spaced() {
        let path = path();
        let set = MarkerSet::build(&path, 6, 0.6, 0.7).unwrap();
        assert_eq!(set.len(), 6);
        for (i, marker) in set.all().iter().enumerate() {
            assert_eq!(marker.id as usize, i + 1);
            assert!((marker.param - (i + 1) as f32 / 6.0).abs() < 1e-6);
            assert_eq!(marker.position, path.point_at(marker.param));
            assert!((marker.half_extent - 0.3).abs() < 1e-6);
        }
        // The last marker sits at u = 1, which wraps to the path start.
        assert_eq!(set.all()[5].position, path.point_at(0.0));
    }

    #[test]
    fn test_colors_are_reproducible() {
        let path = path();
        let a = MarkerSet::build(&path, 4, 0.6, 0.7).unwrap();
        let b = MarkerSet::build(&path, 4, 0.6, 0.7).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.color, y.color);
        }
        let expected = srgb_to_linear(hsl_to_rgb(0.7 + 0.25, 1.0, 0.5));
        assert_eq!(a.all()[0].color, expected);
    }

    #[test]
    fn test_zero_count_rejected() {
        let result = MarkerSet::build(&path(), 0, 0.6, 0.7);
        assert!(matches!(result, Err(FlythroughError::InvalidMarkerCount(0))));
    }

    #[test]
    fn test_bad_size_rejected() {
        assert!(matches!(
            MarkerSet::build(&path(), 3, 0.0, 0.7),
            Err(FlythroughError::InvalidMarkerSize(_))
        ));
        assert!(MarkerSet::build(&path(), 3, f32::NAN, 0.7).is_err());
    }

    #[test]
    fn test_get_by_id() {
        let set = MarkerSet::build(&path(), 6, 0.6, 0.7).unwrap();
        assert_eq!(set.get(3).map(|m| m.id), Some(3));
        assert!(set.get(0).is_none());
        assert!(set.get(7).is_none());
    }

    #[test]
    fn test_bounds_contain_center() {
        let set = MarkerSet::build(&path(), 2, 1.0, 0.0).unwrap();
        let marker = &set.all()[0];
        let (min, max) = marker.bounds();
        assert!((max - min - Vec3::ONE).length() < 1e-5);
        assert!(((min + max) * 0.5 - marker.position).length() < 1e-5);
    }

    #[test]
    fn test_metadata_matches_markers() {
        let set = MarkerSet::build(&path(), 3, 0.6, 0.7).unwrap();
        let info = set.metadata();
        assert_eq!(info.len(), 3);
        assert_eq!(info[1].id, 2);
        assert_eq!(info[1].position, set.all()[1].position);
    }

    proptest! {
        #[test]
        fn prop_ids_are_dense(count in 1usize..200) {
            let set = MarkerSet::build(&path(), count, 0.6, 0.7).unwrap();
            prop_assert_eq!(set.all().len(), count);
            let ids: Vec<u32> = set.iter().map(|m| m.id).collect();
            let expected: Vec<u32> = (1..=count as u32).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
