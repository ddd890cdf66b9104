use crate::net::ExportRequest;

/// Generic message a host application shows when a composition cannot produce any output.
pub const USER_FACING_ERROR: &str = "Error creating thumbnail.";

/// Top-level failures of a composition. Only errors that prevent producing any
/// output end up here; per-layer problems are logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("Invalid output surface: {0}")]
    InvalidSurface(#[from] SurfaceError),

    #[error("Invalid map view: {0}")]
    InvalidMapView(#[from] MapViewError),

    #[error("Overlay compositor failed: {0}")]
    Overlay(String),

    #[error("Internal composition error: {0}")]
    Internal(String),
}

impl CompositionError {
    /// Message suitable for showing to an end user. The detailed error is meant for logs.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

/// Cause of a single failed raster fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Fetch timed out after {0}ms")]
    Timeout(u64),
}

/// A failed fetch: the cause paired with the request that was being loaded.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to load {}: {error}", .request.url)]
pub struct FetchFailure {
    pub request: ExportRequest,
    pub error: FetchError,
}

impl FetchFailure {
    pub fn new(request: ExportRequest, error: FetchError) -> Self {
        Self { request, error }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("Surface size {width}x{height} is not drawable")]
    InvalidSize { width: u32, height: u32 },

    #[error("Pixel buffer of {len} bytes does not match {width}x{height}")]
    BufferMismatch { width: u32, height: u32, len: usize },

    #[error("Surface has not been sized yet")]
    Unsized,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapViewError {
    #[error("Duplicate layer id: {0}")]
    DuplicateLayerId(String),

    #[error("Map view size {width}x{height} is not drawable")]
    InvalidSize { width: u32, height: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Fetch concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Fetch timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Export format must not be empty")]
    EmptyExportFormat,

    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}
