//! Raster types, the output surface and the overlay compositors.

pub mod compositor;
pub mod compositors {
    /// Copies the widget's live raster sub-surfaces
    pub mod raster;
    /// Rasterizes named layers of the widget's live SVG scene
    pub mod vector;
}
mod raster;
mod surface;

pub use compositor::{compositor_for, GraphicsLayers, OverlayCompositor, OverlayContext, SurfaceSize};
pub use raster::{PixelFormat, RasterImage, RgbaImage};
pub use surface::OutputSurface;
