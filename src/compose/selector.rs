use log::info;
use crate::map::{LayerDescriptor, MapView};

/// Layers chosen for one composition.
#[derive(Debug, Default)]
pub struct LayerSelection<'a> {
    /// Layers whose raster will be fetched, in registration order.
    pub eligible: Vec<&'a LayerDescriptor>,
    /// Participating layers left out of the fetch (no URL, or hidden at this scale).
    pub skipped: Vec<&'a LayerDescriptor>,
}

/// Decides which layers of a map view take part in a composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerSelector {
    base_only: bool,
}

impl LayerSelector {
    pub fn new(base_only: bool) -> Self {
        Self { base_only }
    }

    /// Participating layers in registration order: basemap layers only, or every layer.
    pub fn select<'a>(&self, view: &'a MapView) -> Vec<&'a LayerDescriptor> {
        view.layers()
            .iter()
            .filter(|layer| !self.base_only || layer.is_basemap())
            .collect()
    }

    /// Splits the participating layers into those that can be fetched and those that are skipped.
    pub fn eligible<'a>(&self, view: &'a MapView) -> LayerSelection<'a> {
        let mut selection = LayerSelection::default();

        for layer in self.select(view) {
            if layer.service_url().is_none() {
                info!("No URL for layer: {}", layer.id);
                selection.skipped.push(layer);
            } else if !layer.visible_at_scale {
                info!("Layer {} is not visible at the current scale", layer.id);
                selection.skipped.push(layer);
            } else {
                selection.eligible.push(layer);
            }
        }

        selection
    }
}
