//! Map rendering over an opaque canvas capability.
//!
//! The embedding provides a `MapSurface` (layers, markers, paths,
//! camera); `MapRenderer` drives it with the route/station display
//! rules: tier-colored paths, recommended-route emphasis, hover
//! feedback, single origin/destination pins, and camera framing.

mod bounds;
pub mod headless;
mod renderer;
mod style;
mod surface;

pub use bounds::GeoBounds;
pub use headless::HeadlessSurface;
pub use renderer::MapRenderer;
pub use style::{PathStyle, tier_color};
pub use surface::{Layer, MapSurface, Marker, MarkerHandle, MarkerKind, PathHandle};
