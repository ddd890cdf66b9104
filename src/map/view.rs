//! Read-only snapshot of an interactive map.
//!
//! The map widget owns its layer registry, viewport and coordinate systems.
//! Before a composition it hands over a [`MapView`]: the ordered layers, the
//! current extent, the pixel size and whatever it has drawn locally. The
//! composition never mutates it.
//!
//! ```rust
//! use map_canvas::map::{Extent, LayerDescriptor, MapView, SpatialReference};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let view = MapView::builder(800, 600)
//!     .extent(Extent::new(0.0, 0.0, 100.0, 75.0, SpatialReference::WEB_MERCATOR))
//!     .layer(LayerDescriptor::remote("streets", "https://maps.example.com/MapServer"))
//!     .layer(LayerDescriptor::local("sketch"))
//!     .basemap_ids(["streets"])
//!     .build()?;
//! assert!(view.layer("streets").unwrap().is_basemap());
//! # Ok(()) }
//! ```

use std::collections::HashSet;
use crate::errors::MapViewError;
use crate::map::{Extent, LayerDescriptor, LiveScene, SpatialReference};
use crate::render::SurfaceSize;

#[derive(Debug, Clone)]
pub struct MapView {
    layers: Vec<LayerDescriptor>,
    extent: Extent,
    width: u32,
    height: u32,
    basemap_ids: Vec<String>,
    scene: LiveScene,
}

impl MapView {
    pub fn builder(width: u32, height: u32) -> MapViewBuilder {
        MapViewBuilder {
            layers: Vec::new(),
            extent: Extent::new(0.0, 0.0, width as f64, height as f64, SpatialReference::WEB_MERCATOR),
            width,
            height,
            basemap_ids: Vec::new(),
            scene: LiveScene::default(),
        }
    }

    /// Layers in registration order.
    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize { width: self.width, height: self.height }
    }

    pub fn basemap_ids(&self) -> &[String] {
        &self.basemap_ids
    }

    pub fn scene(&self) -> &LiveScene {
        &self.scene
    }
}

pub struct MapViewBuilder {
    layers: Vec<LayerDescriptor>,
    extent: Extent,
    width: u32,
    height: u32,
    basemap_ids: Vec<String>,
    scene: LiveScene,
}

impl MapViewBuilder {
    pub fn extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    pub fn layer(mut self, layer: LayerDescriptor) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(mut self, layers: impl IntoIterator<Item = LayerDescriptor>) -> Self {
        self.layers.extend(layers);
        self
    }

    pub fn basemap_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.basemap_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn scene(mut self, scene: LiveScene) -> Self {
        self.scene = scene;
        self
    }

    /// Validates the snapshot and derives every layer's basemap flag.
    pub fn build(mut self) -> Result<MapView, MapViewError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapViewError::InvalidSize { width: self.width, height: self.height });
        }

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(MapViewError::DuplicateLayerId(layer.id.clone()));
            }
        }

        for layer in &mut self.layers {
            layer.basemap = self.basemap_ids.iter().any(|id| *id == layer.id);
        }

        Ok(MapView {
            layers: self.layers,
            extent: self.extent,
            width: self.width,
            height: self.height,
            basemap_ids: self.basemap_ids,
            scene: self.scene,
        })
    }
}
