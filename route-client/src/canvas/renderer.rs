//! Station, route, and pin rendering.
//!
//! The renderer owns three independently clearable layers on the
//! surface: stations, routes, and the origin/destination pins. Route
//! lists replace each other wholesale; a candidate without usable
//! geometry is skipped with a warning and the rest of the batch still
//! renders.

use tracing::{debug, warn};

use crate::domain::{Coordinate, RouteCandidate, Station};

use super::bounds::GeoBounds;
use super::style::PathStyle;
use super::surface::{Layer, MapSurface, Marker, MarkerHandle, PathHandle};

/// Camera padding when framing a route, in pixels.
const FIT_PADDING_PX: u32 = 50;

struct RenderedRoute {
    handle: PathHandle,
    base_style: PathStyle,
    candidate: RouteCandidate,
    index: usize,
}

/// Renders stations, route candidates, and endpoint pins on a surface.
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    origin_marker: Option<MarkerHandle>,
    destination_marker: Option<MarkerHandle>,
    routes: Vec<RenderedRoute>,
}

impl<S: MapSurface> MapRenderer<S> {
    /// Creates a renderer over the given surface.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            origin_marker: None,
            destination_marker: None,
            routes: Vec::new(),
        }
    }

    /// The current camera center.
    pub fn center(&self) -> Coordinate {
        self.surface.center()
    }

    /// Replaces the stations layer with the given snapshot.
    pub fn display_stations(&mut self, stations: &[Station]) {
        self.surface.clear_layer(Layer::Stations);
        for station in stations {
            self.surface
                .add_marker(Layer::Stations, Marker::station(station));
        }
        debug!(count = stations.len(), "displayed stations");
    }

    /// Replaces the routes layer with the given candidates.
    ///
    /// Candidates without geometry are skipped. The camera is framed per
    /// candidate in input order: the first candidate and every
    /// recommended one trigger a fit to that candidate's bounds.
    pub fn display_routes(&mut self, candidates: &[RouteCandidate]) {
        self.surface.clear_layer(Layer::Routes);
        self.routes.clear();

        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.geometry.is_empty() {
                warn!(kind = ?candidate.kind, index, "skipping route without geometry");
                continue;
            }

            let base_style = PathStyle::for_candidate(candidate);
            let handle = self
                .surface
                .add_path(Layer::Routes, &candidate.geometry, base_style);
            self.routes.push(RenderedRoute {
                handle,
                base_style,
                candidate: candidate.clone(),
                index,
            });

            if index == 0 || candidate.is_recommended {
                if let Some(bounds) = GeoBounds::from_points(&candidate.geometry) {
                    self.surface.fit_bounds(bounds, FIT_PADDING_PX);
                }
            }
        }

        debug!(count = self.routes.len(), "displayed routes");
    }

    /// Number of currently rendered route paths.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Places (or moves) the single origin pin.
    pub fn set_origin(&mut self, position: Coordinate) {
        if let Some(handle) = self.origin_marker.take() {
            self.surface.remove_marker(Layer::Markers, handle);
        }
        let handle = self
            .surface
            .add_marker(Layer::Markers, Marker::origin(position));
        self.origin_marker = Some(handle);
    }

    /// Places (or moves) the single destination pin.
    pub fn set_destination(&mut self, position: Coordinate) {
        if let Some(handle) = self.destination_marker.take() {
            self.surface.remove_marker(Layer::Markers, handle);
        }
        let handle = self
            .surface
            .add_marker(Layer::Markers, Marker::destination(position));
        self.destination_marker = Some(handle);
    }

    /// Clears all three layers and drops the pin references.
    pub fn clear_all(&mut self) {
        self.surface.clear_layer(Layer::Stations);
        self.surface.clear_layer(Layer::Routes);
        self.surface.clear_layer(Layer::Markers);
        self.origin_marker = None;
        self.destination_marker = None;
        self.routes.clear();
    }

    /// Applies or reverts the hover style on a rendered path.
    pub fn path_hovered(&mut self, handle: PathHandle, entered: bool) {
        let Some(rendered) = self.routes.iter().find(|r| r.handle == handle) else {
            return;
        };
        let style = if entered {
            rendered.base_style.hovered()
        } else {
            rendered.base_style
        };
        self.surface.set_path_style(handle, style);
    }

    /// Resolves a tapped path to its candidate and input-list index.
    pub fn path_clicked(&self, handle: PathHandle) -> Option<(RouteCandidate, usize)> {
        self.routes
            .iter()
            .find(|r| r.handle == handle)
            .map(|r| (r.candidate.clone(), r.index))
    }

    /// Access to the underlying surface (for tests and embeddings).
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
