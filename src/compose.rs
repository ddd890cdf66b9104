//! The compositing pipeline: layer selection, fetch fan-out and the service tying them together.

pub mod aggregator;
pub mod options;
pub mod selector;
pub mod service;

pub use aggregator::{FetchAggregator, FetchOutcome};
pub use options::ComposeOptions;
pub use selector::{LayerSelection, LayerSelector};
pub use service::{CanvasCompositionService, CompositionId, CompositionReport};
