//! Composition configuration.
//!
//! `CompositionConfig` is handed to a
//! [`CanvasCompositionService`](crate::compose::CanvasCompositionService) when
//! it is constructed. It selects the rendering backend once (there is no
//! process-wide renderer setting) and controls how remote layer rasters are
//! fetched.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use map_canvas::config::{CompositionConfig, RenderingBackend};
//! let cfg = CompositionConfig::default();
//! assert_eq!(cfg.backend, RenderingBackend::Raster);
//! assert!(cfg.fetch_concurrency.is_none());
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use map_canvas::config::{CompositionConfig, RenderingBackend};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = CompositionConfig::builder()
//!     .backend(RenderingBackend::Vector)
//!     .fetch_concurrency(4)
//!     .fetch_timeout_ms(10_000)
//!     .build()?;
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `backend`: which overlay compositor runs after the remote rasters are drawn.
//! - `fetch_concurrency`: maximum number of in-flight fetches (default: unbounded).
//! - `fetch_timeout_ms`: per-fetch timeout (default: none, a stalled fetch waits forever).
//! - `user_agent`: UA string sent with export requests.
//! - `export_format`: image format requested from the export service (default: `png`).
//! - `transparent`: request transparent backgrounds (default: `true`).
//!
//! # Errors
//!
//! Builder validation can return [`ConfigError`] if values are invalid
//! (e.g. `fetch_concurrency == 0` or an empty `export_format`).

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "map-canvas/0.1 (+https://crates.io/crates/map-canvas)";

/// How the interactive map renders its graphics/overlay content, and therefore
/// which compositor picks that content up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingBackend {
    /// Overlays are already raster sub-surfaces; they are copied directly.
    #[default]
    Raster,
    /// Overlays live in an SVG scene; named layers are rasterized first.
    Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    pub backend: RenderingBackend,
    pub fetch_concurrency: Option<usize>,
    pub fetch_timeout_ms: Option<u64>,
    pub user_agent: String,
    pub export_format: String,
    pub transparent: bool,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            backend: RenderingBackend::Raster,
            fetch_concurrency: None,
            fetch_timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            export_format: "png".to_string(),
            transparent: true,
        }
    }
}

impl CompositionConfig {
    pub fn builder() -> CompositionConfigBuilder {
        CompositionConfigBuilder::default()
    }

    /// Parses and validates a JSON configuration document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: CompositionConfig = serde_json::from_str(json)?;
        validate(&cfg)?;
        Ok(cfg)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

/// Builder for [`CompositionConfig`].
#[derive(Debug, Clone, Default)]
pub struct CompositionConfigBuilder {
    inner: CompositionConfig,
}

impl CompositionConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut CompositionConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn backend(self, backend: RenderingBackend) -> Self { self.map(|c| c.backend = backend) }
    pub fn fetch_concurrency(self, n: usize) -> Self { self.map(|c| c.fetch_concurrency = Some(n)) }
    pub fn unbounded_fetches(self) -> Self { self.map(|c| c.fetch_concurrency = None) }
    pub fn fetch_timeout_ms(self, ms: u64) -> Self { self.map(|c| c.fetch_timeout_ms = Some(ms)) }
    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = ua.into()) }
    pub fn export_format<S: Into<String>>(self, fmt: S) -> Self { self.map(|c| c.export_format = fmt.into()) }
    pub fn transparent(self, on: bool) -> Self { self.map(|c| c.transparent = on) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut CompositionConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<CompositionConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

fn validate(cfg: &CompositionConfig) -> Result<(), ConfigError> {
    if cfg.fetch_concurrency == Some(0) {
        return Err(ConfigError::ZeroConcurrency);
    }
    if cfg.fetch_timeout_ms == Some(0) {
        return Err(ConfigError::ZeroTimeout);
    }
    if cfg.export_format.trim().is_empty() {
        return Err(ConfigError::EmptyExportFormat);
    }
    Ok(())
}
