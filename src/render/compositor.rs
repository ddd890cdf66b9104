use crate::config::RenderingBackend;
use crate::map::LiveScene;
use crate::render::compositors::raster::RasterOverlayCompositor;
use crate::render::compositors::vector::VectorOverlayCompositor;
use crate::render::OutputSurface;

/// Size of a surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Which graphics layers of a vector scene end up in the composite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GraphicsLayers {
    /// Every graphics layer the live scene holds, in document order.
    #[default]
    All,
    /// Only these layers, in this order.
    Named(Vec<String>),
}

impl GraphicsLayers {
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Named(names.into_iter().map(Into::into).collect())
    }
}

/// Everything an overlay compositor may read while drawing.
pub struct OverlayContext<'a> {
    pub scene: &'a LiveScene,
    /// Native pixel size of the map view.
    pub native_size: SurfaceSize,
    pub graphics_layers: &'a GraphicsLayers,
}

/// Draws the map widget's locally rendered content above the remote rasters.
///
/// One implementation exists per [`RenderingBackend`]; the service picks it
/// once when it is constructed. Per-layer failures are logged and skipped by
/// the implementation; an `Err` means nothing more could be drawn at all.
pub trait OverlayCompositor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Composites the overlays onto `surface`, returning how many were drawn.
    fn composite(&self, ctx: &OverlayContext<'_>, surface: &mut OutputSurface) -> anyhow::Result<usize>;
}

/// Returns the compositor matching `backend`.
pub fn compositor_for(backend: RenderingBackend) -> Box<dyn OverlayCompositor> {
    match backend {
        RenderingBackend::Raster => Box::new(RasterOverlayCompositor::new()),
        RenderingBackend::Vector => Box::new(VectorOverlayCompositor::new()),
    }
}
