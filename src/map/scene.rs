use crate::render::RasterImage;

/// What the interactive map widget has already drawn locally.
///
/// A widget using the raster backend exposes its graphics as raster
/// sub-surfaces (in stacking order); one using the vector backend exposes the
/// SVG markup of its live scene, whose root `<svg>` element holds one child
/// per graphics layer with id `<name>_layer`.
#[derive(Debug, Clone, Default)]
pub struct LiveScene {
    pub raster_surfaces: Vec<RasterImage>,
    pub vector_markup: Option<String>,
}

impl LiveScene {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_raster_surfaces(raster_surfaces: Vec<RasterImage>) -> Self {
        Self { raster_surfaces, vector_markup: None }
    }

    pub fn with_vector_markup<S: Into<String>>(markup: S) -> Self {
        Self { raster_surfaces: Vec::new(), vector_markup: Some(markup.into()) }
    }
}
