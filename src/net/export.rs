//! Export requests against remote map services.
//!
//! A map service renders one of its layers for an arbitrary extent when asked
//! through its `export` endpoint:
//!
//! ```text
//! <service>/export?f=image&size=<w>,<h>&bbox=<xmin>,<ymin>,<xmax>,<ymax>&bboxSR=<wkid>&format=png&transparent=true
//! ```

use log::info;
use crate::config::CompositionConfig;
use crate::map::{LayerDescriptor, MapView};
use crate::net::query::encode_query;
use crate::render::SurfaceSize;

const EXPORT_SEGMENT: &str = "export";

/// A fully qualified export URL for one layer, plus the pixel size it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub layer_id: String,
    pub url: String,
    pub size: SurfaceSize,
}

/// Builds [`ExportRequest`]s for the layers of a map view.
#[derive(Debug, Clone)]
pub struct ExportRequestBuilder {
    format: String,
    transparent: bool,
}

impl Default for ExportRequestBuilder {
    fn default() -> Self {
        Self { format: "png".to_string(), transparent: true }
    }
}

impl ExportRequestBuilder {
    pub fn new<S: Into<String>>(format: S, transparent: bool) -> Self {
        Self { format: format.into(), transparent }
    }

    pub fn from_config(config: &CompositionConfig) -> Self {
        Self::new(config.export_format.clone(), config.transparent)
    }

    /// Builds the export request for `layer` at the view's native size and extent.
    ///
    /// Returns `None` (and logs) when the layer has no service URL.
    pub fn build(&self, layer: &LayerDescriptor, view: &MapView) -> Option<ExportRequest> {
        let Some(service_url) = layer.service_url() else {
            info!("No URL for layer: {}", layer.id);
            return None;
        };

        let extent = view.extent();
        let params = [
            ("f", "image".to_string()),
            ("size", format!("{},{}", view.width(), view.height())),
            ("bbox", extent.to_bbox()),
            ("bboxSR", extent.spatial_reference.wkid.to_string()),
            ("format", self.format.clone()),
            ("transparent", self.transparent.to_string()),
        ];

        Some(ExportRequest {
            layer_id: layer.id.clone(),
            url: format!("{}?{}", export_endpoint(service_url), encode_query(&params)),
            size: view.size(),
        })
    }
}

/// `<service>/export`, collapsing any run of separators in front of the export segment.
fn export_endpoint(service_url: &str) -> String {
    format!("{}/{}", service_url.trim_end_matches('/'), EXPORT_SEGMENT)
}
