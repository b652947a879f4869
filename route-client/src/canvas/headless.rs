//! Headless surface for tests and terminal demos.
//!
//! Records every drawing operation instead of rasterizing, the same way
//! the backend gateway ships a mock-friendly seam: embeddings without a
//! real canvas (the demo binary, the test suite) run the full rendering
//! path against this and inspect the result.

use tracing::debug;

use crate::domain::Coordinate;

use super::bounds::GeoBounds;
use super::style::PathStyle;
use super::surface::{Layer, MapSurface, Marker, MarkerHandle, PathHandle};

/// Default camera center (Madrid, Puerta del Sol).
pub const DEFAULT_CENTER: (f64, f64) = (40.4168, -3.7038);

struct PlacedMarker {
    handle: MarkerHandle,
    layer: Layer,
    marker: Marker,
}

struct PlacedPath {
    handle: PathHandle,
    layer: Layer,
    points: Vec<Coordinate>,
    style: PathStyle,
}

/// An in-memory `MapSurface` that records what was drawn.
pub struct HeadlessSurface {
    center: Coordinate,
    next_id: u64,
    markers: Vec<PlacedMarker>,
    paths: Vec<PlacedPath>,
    fits: Vec<(GeoBounds, u32)>,
}

impl HeadlessSurface {
    /// Creates a surface centered on the default city center.
    pub fn new() -> Self {
        let (lat, lon) = DEFAULT_CENTER;
        Self::centered_on(
            Coordinate::new(lat, lon).expect("default center is finite"),
        )
    }

    /// Creates a surface with the given camera center.
    pub fn centered_on(center: Coordinate) -> Self {
        Self {
            center,
            next_id: 0,
            markers: Vec::new(),
            paths: Vec::new(),
            fits: Vec::new(),
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Markers currently on a layer, in placement order.
    pub fn markers_in(&self, layer: Layer) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.layer == layer)
            .map(|m| &m.marker)
            .collect()
    }

    /// Point lists and current styles of the paths on a layer.
    pub fn paths_in(&self, layer: Layer) -> Vec<(&[Coordinate], PathStyle)> {
        self.paths
            .iter()
            .filter(|p| p.layer == layer)
            .map(|p| (p.points.as_slice(), p.style))
            .collect()
    }

    /// Handles of the paths on a layer, in placement order.
    pub fn path_handles(&self, layer: Layer) -> Vec<PathHandle> {
        self.paths
            .iter()
            .filter(|p| p.layer == layer)
            .map(|p| p.handle)
            .collect()
    }

    /// Current style of a path, if it is still placed.
    pub fn path_style(&self, handle: PathHandle) -> Option<PathStyle> {
        self.paths
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.style)
    }

    /// The most recent camera fit, if any.
    pub fn last_fit(&self) -> Option<(GeoBounds, u32)> {
        self.fits.last().copied()
    }

    /// Every camera fit performed, in order.
    pub fn fit_count(&self) -> usize {
        self.fits.len()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for HeadlessSurface {
    fn add_marker(&mut self, layer: Layer, marker: Marker) -> MarkerHandle {
        let handle = MarkerHandle(self.next_id());
        debug!(?layer, label = %marker.label, "add marker");
        self.markers.push(PlacedMarker {
            handle,
            layer,
            marker,
        });
        handle
    }

    fn remove_marker(&mut self, layer: Layer, handle: MarkerHandle) {
        self.markers
            .retain(|m| !(m.layer == layer && m.handle == handle));
    }

    fn add_path(&mut self, layer: Layer, points: &[Coordinate], style: PathStyle) -> PathHandle {
        let handle = PathHandle(self.next_id());
        debug!(?layer, points = points.len(), "add path");
        self.paths.push(PlacedPath {
            handle,
            layer,
            points: points.to_vec(),
            style,
        });
        handle
    }

    fn set_path_style(&mut self, handle: PathHandle, style: PathStyle) {
        if let Some(path) = self.paths.iter_mut().find(|p| p.handle == handle) {
            path.style = style;
        }
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.markers.retain(|m| m.layer != layer);
        self.paths.retain(|p| p.layer != layer);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32) {
        debug!(?bounds, padding_px, "fit camera");
        self.fits.push((bounds, padding_px));
    }

    fn center(&self) -> Coordinate {
        self.center
    }
}
