//! Map canvas compositing
//!
//! Turns a snapshot of an interactive, multi-layer map into one flat raster
//! at an arbitrary output size. Every remote layer is exported by its map
//! service and fetched concurrently; the rasters that arrive are drawn in
//! layer order, and the map widget's own graphics are composited on top by
//! the configured rendering backend.
//!
//! ```no_run
//! use map_canvas::compose::{CanvasCompositionService, ComposeOptions};
//! use map_canvas::config::CompositionConfig;
//! use map_canvas::map::{Extent, LayerDescriptor, MapView, SpatialReference};
//! use map_canvas::render::OutputSurface;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let view = MapView::builder(800, 600)
//!     .extent(Extent::new(-13.6e6, 4.5e6, -13.5e6, 4.6e6, SpatialReference::WEB_MERCATOR))
//!     .layer(LayerDescriptor::remote("topo", "https://maps.example.com/arcgis/rest/services/Topo/MapServer"))
//!     .basemap_ids(["topo"])
//!     .build()?;
//!
//! let service = CanvasCompositionService::with_http(CompositionConfig::default())?;
//! let mut thumbnail = OutputSurface::new();
//! let report = service
//!     .compose(&view, &mut thumbnail, ComposeOptions::new().size(200, 150))
//!     .await?;
//! println!("drew {} layers, {} failed", report.fetched.len(), report.failed.len());
//! # Ok(()) }
//! ```

pub mod compose;
pub mod config;
pub mod errors;
pub mod map;
pub mod net;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

pub use compose::{CanvasCompositionService, ComposeOptions, CompositionReport};
pub use config::{CompositionConfig, RenderingBackend};
pub use errors::{CompositionError, FetchError, FetchFailure};
pub use render::OutputSurface;
