//! The canvas boundary.
//!
//! `MapSurface` is the opaque capability an embedding provides for
//! drawing: named layers, styled markers and paths, and camera control.
//! The renderer drives it; nothing in this crate implements tiles or
//! projection.

use crate::domain::{Coordinate, Station};

use super::bounds::GeoBounds;
use super::style::PathStyle;

/// An independently clearable rendering group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Bike-share station markers
    Stations,
    /// Route candidate paths
    Routes,
    /// Origin/destination pins
    Markers,
}

/// What a marker represents, for icon selection on the embedding side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Station,
    Origin,
    Destination,
}

/// A styled point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub kind: MarkerKind,
    pub label: String,
}

impl Marker {
    /// Marker for a bike-share station.
    pub fn station(station: &Station) -> Self {
        Self {
            position: station.location,
            kind: MarkerKind::Station,
            label: station.name.clone(),
        }
    }

    /// The origin pin.
    pub fn origin(position: Coordinate) -> Self {
        Self {
            position,
            kind: MarkerKind::Origin,
            label: "Origin".to_string(),
        }
    }

    /// The destination pin.
    pub fn destination(position: Coordinate) -> Self {
        Self {
            position,
            kind: MarkerKind::Destination,
            label: "Destination".to_string(),
        }
    }
}

/// Handle to a marker placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Handle to a path placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathHandle(pub u64);

/// The drawing capability provided by the embedding.
pub trait MapSurface {
    /// Places a marker on a layer.
    fn add_marker(&mut self, layer: Layer, marker: Marker) -> MarkerHandle;

    /// Removes a single marker.
    fn remove_marker(&mut self, layer: Layer, handle: MarkerHandle);

    /// Draws a styled path on a layer.
    fn add_path(&mut self, layer: Layer, points: &[Coordinate], style: PathStyle) -> PathHandle;

    /// Restyles an existing path.
    fn set_path_style(&mut self, handle: PathHandle, style: PathStyle);

    /// Removes everything on a layer.
    fn clear_layer(&mut self, layer: Layer);

    /// Moves the camera to frame the given bounds with padding.
    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32);

    /// The current camera center.
    fn center(&self) -> Coordinate;
}
