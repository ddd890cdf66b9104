use crate::map::MapView;
use crate::render::{GraphicsLayers, SurfaceSize};

/// Per-call options of [`CanvasCompositionService::compose`](crate::compose::CanvasCompositionService::compose).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposeOptions {
    /// Only fetch basemap layers.
    pub base_only: bool,
    /// Has no effect. Overlays are always composited by the configured backend.
    pub include_graphics: bool,
    /// Output width; the map view's width when `None`.
    pub width: Option<u32>,
    /// Output height; the map view's height when `None`.
    pub height: Option<u32>,
    /// Graphics layers rasterized by the vector backend.
    pub graphics_layers: GraphicsLayers,
}

impl ComposeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_only(mut self, on: bool) -> Self {
        self.base_only = on;
        self
    }

    pub fn include_graphics(mut self, on: bool) -> Self {
        self.include_graphics = on;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn graphics_layers(mut self, layers: GraphicsLayers) -> Self {
        self.graphics_layers = layers;
        self
    }

    /// Output size with the map view's size filled in for missing dimensions.
    pub fn output_size(&self, view: &MapView) -> SurfaceSize {
        SurfaceSize {
            width: self.width.unwrap_or(view.width()),
            height: self.height.unwrap_or(view.height()),
        }
    }
}
