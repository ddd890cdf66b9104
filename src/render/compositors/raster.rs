use anyhow::Context;
use log::debug;
use crate::render::compositor::{OverlayCompositor, OverlayContext};
use crate::render::OutputSurface;

/// Compositor for the raster backend.
///
/// The widget's graphics are already raster sub-surfaces, so they are copied
/// onto the output in stacking order, each stretched to the output size.
#[derive(Debug, Default)]
pub struct RasterOverlayCompositor;

impl RasterOverlayCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl OverlayCompositor for RasterOverlayCompositor {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn composite(&self, ctx: &OverlayContext<'_>, surface: &mut OutputSurface) -> anyhow::Result<usize> {
        for (idx, sub_surface) in ctx.scene.raster_surfaces.iter().enumerate() {
            surface
                .draw_raster(sub_surface)
                .with_context(|| format!("drawing live sub-surface {idx}"))?;
        }

        debug!("Copied {} live sub-surfaces", ctx.scene.raster_surfaces.len());
        Ok(ctx.scene.raster_surfaces.len())
    }
}
