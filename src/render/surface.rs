//! The output surface a composition is drawn onto.
//!
//! An [`OutputSurface`] is owned by the caller but written exclusively by the
//! composition service while a `compose` call is running. The service first
//! resets it to the requested size; every later draw is rescaled to that size,
//! whatever the native size of the source raster is.
//!
//! Concurrent compositions must not target the same surface. Taking
//! `&mut OutputSurface` for the whole call makes the borrow checker enforce
//! this, so the surface holds no lock of its own.

use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};
use crate::errors::SurfaceError;
use crate::render::raster::{RasterImage, RgbaImage};

/// Mutable target raster buffer.
#[derive(Default)]
pub struct OutputSurface {
    pixmap: Option<Pixmap>,
    /// Copy of the composite taken at the last checkpoint.
    checkpoint: Option<Pixmap>,
    /// Number of draws since the last reset.
    draws: u64,
}

impl OutputSurface {
    /// Creates an unsized surface. It becomes drawable after [`reset`](Self::reset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface that is already sized and cleared.
    pub fn with_size(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let mut surface = Self::new();
        surface.reset(width, height)?;
        Ok(surface)
    }

    /// Clears all existing content and resizes the surface.
    ///
    /// The previous checkpoint is kept, so a host can still revert to it.
    pub fn reset(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        self.pixmap = Some(pixmap);
        self.draws = 0;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, |p| p.width())
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, |p| p.height())
    }

    pub fn is_sized(&self) -> bool {
        self.pixmap.is_some()
    }

    /// Number of rasters drawn since the last reset.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Draws `raster` source-over, stretched to cover the whole surface.
    pub fn draw_raster(&mut self, raster: &RasterImage) -> Result<(), SurfaceError> {
        let target = self.pixmap.as_mut().ok_or(SurfaceError::Unsized)?;

        let sx = target.width() as f32 / raster.width() as f32;
        let sy = target.height() as f32 / raster.height() as f32;

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        target.draw_pixmap(0, 0, raster.as_pixmap(), &paint, Transform::from_scale(sx, sy), None);

        self.draws = self.draws.wrapping_add(1);
        Ok(())
    }

    /// Marks the current composite as a stable state that [`revert`](Self::revert) returns to.
    pub fn checkpoint(&mut self) -> Result<(), SurfaceError> {
        let current = self.pixmap.as_ref().ok_or(SurfaceError::Unsized)?;
        self.checkpoint = Some(current.clone());
        Ok(())
    }

    pub fn has_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Restores the last checkpoint, including its size. Returns `false` when there is none.
    pub fn revert(&mut self) -> bool {
        match &self.checkpoint {
            Some(saved) => {
                self.pixmap = Some(saved.clone());
                true
            }
            None => false,
        }
    }

    /// Straight RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copies the current composite out as a raster.
    pub fn snapshot(&self) -> Result<RasterImage, SurfaceError> {
        let pixmap = self.pixmap.as_ref().ok_or(SurfaceError::Unsized)?;
        Ok(RasterImage::from_pixmap(pixmap.clone()))
    }

    /// The flat output buffer: straight RGBA8 at the surface size.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, SurfaceError> {
        Ok(self.snapshot()?.to_rgba_image())
    }
}

impl std::fmt::Debug for OutputSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("draws", &self.draws)
            .field("checkpoint", &self.checkpoint.is_some())
            .finish()
    }
}
