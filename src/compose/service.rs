use std::sync::Arc;
use log::{debug, error, warn};
use uuid::Uuid;
use crate::compose::aggregator::{FetchAggregator, FetchOutcome};
use crate::compose::options::ComposeOptions;
use crate::compose::selector::LayerSelector;
use crate::config::{CompositionConfig, RenderingBackend};
use crate::errors::{CompositionError, FetchError};
use crate::map::MapView;
use crate::net::{HttpImageFetcher, ImageFetcher};
use crate::render::{compositor_for, OutputSurface, OverlayCompositor, OverlayContext};

/// Identifies one `compose` call in the logs.
///
/// **Note:** The use of [`Uuid`] is an implementation detail; treat the id as
/// an opaque handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositionId(Uuid);

impl CompositionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What went into a finished composite.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionReport {
    pub id: CompositionId,
    /// Final size of the output surface, in pixels.
    pub width: u32,
    pub height: u32,
    /// Layers whose raster was drawn, in draw order.
    pub fetched: Vec<String>,
    /// Layers whose fetch failed; their raster is absent.
    pub failed: Vec<String>,
    /// Participating layers never fetched (no URL, or hidden at this scale).
    pub skipped: Vec<String>,
    /// Overlays drawn by the backend compositor.
    pub overlays: usize,
}

/// Composites a map view into one flat raster.
///
/// The rendering backend is fixed at construction; every composition uses
/// the same overlay compositor.
pub struct CanvasCompositionService {
    config: CompositionConfig,
    aggregator: FetchAggregator,
    overlay: Box<dyn OverlayCompositor>,
}

impl CanvasCompositionService {
    pub fn new(config: CompositionConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let aggregator = FetchAggregator::new(fetcher, &config);
        let overlay = compositor_for(config.backend);

        Self { config, aggregator, overlay }
    }

    /// Service fetching layer rasters over HTTP.
    pub fn with_http(config: CompositionConfig) -> Result<Self, FetchError> {
        let fetcher = HttpImageFetcher::from_config(&config)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    /// Replaces the overlay compositor chosen from the configured backend.
    pub fn with_overlay_compositor(mut self, overlay: Box<dyn OverlayCompositor>) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn backend(&self) -> RenderingBackend {
        self.config.backend
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Composites `view` onto `surface`.
    ///
    /// The surface is cleared and resized first. Remote rasters are drawn in
    /// layer order once every fetch has settled, then the backend's overlays
    /// go on top and the result is checkpointed. Failed fetches and broken
    /// overlays only reduce what is drawn; an `Err` means no composite could
    /// be produced.
    pub async fn compose(
        &self,
        view: &MapView,
        surface: &mut OutputSurface,
        options: ComposeOptions,
    ) -> Result<CompositionReport, CompositionError> {
        let id = CompositionId::new();
        let result = self.compose_inner(id, view, surface, &options).await;

        if let Err(e) = &result {
            error!("[{id}] Composition failed: {e}");
        }
        result
    }

    async fn compose_inner(
        &self,
        id: CompositionId,
        view: &MapView,
        surface: &mut OutputSurface,
        options: &ComposeOptions,
    ) -> Result<CompositionReport, CompositionError> {
        let size = options.output_size(view);
        surface.reset(size.width, size.height)?;

        let selection = LayerSelector::new(options.base_only).eligible(view);
        debug!(
            "[{id}] Compositing {}x{}: {} eligible, {} skipped layers",
            size.width,
            size.height,
            selection.eligible.len(),
            selection.skipped.len()
        );

        let outcomes = self.aggregator.fetch_all(&selection.eligible, view).await;

        let mut fetched = Vec::new();
        let mut failed = Vec::new();
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Loaded { layer_id, raster } => {
                    surface.draw_raster(&raster)?;
                    fetched.push(layer_id);
                }
                FetchOutcome::Failed(failure) => {
                    warn!("[{id}] Layer {} left out: {failure}", failure.request.layer_id);
                    failed.push(failure.request.layer_id);
                }
            }
        }

        let ctx = OverlayContext {
            scene: view.scene(),
            native_size: view.size(),
            graphics_layers: &options.graphics_layers,
        };
        let overlays = self
            .overlay
            .composite(&ctx, surface)
            .map_err(|e| CompositionError::Overlay(format!("{e:#}")))?;

        surface.checkpoint()?;

        debug!(
            "[{id}] Done: {} rasters, {} failed, {} {} overlays",
            fetched.len(),
            failed.len(),
            overlays,
            self.overlay.name()
        );

        Ok(CompositionReport {
            id,
            width: size.width,
            height: size.height,
            fetched,
            failed,
            skipped: selection.skipped.iter().map(|l| l.id.clone()).collect(),
            overlays,
        })
    }
}
