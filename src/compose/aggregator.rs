//! Fan-out of export fetches and the all-settle join over them.
//!
//! One fetch is issued per eligible layer. The joined future resolves only
//! after every fetch has settled, successfully or not, and yields one
//! [`FetchOutcome`] per issued fetch in issue order. A failed fetch never
//! short-circuits the others.
//!
//! By default every fetch is in flight at once. A concurrency limit admits at
//! most that many at a time without changing the outcome order. An optional
//! timeout turns a stalled fetch into a failure; without it, a stalled fetch
//! holds up the join indefinitely.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use log::debug;
use crate::config::CompositionConfig;
use crate::errors::{FetchError, FetchFailure};
use crate::map::{LayerDescriptor, MapView};
use crate::net::{ExportRequest, ExportRequestBuilder, ImageFetcher};
use crate::render::RasterImage;

/// Result of a single settled fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    Loaded { layer_id: String, raster: RasterImage },
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn layer_id(&self) -> &str {
        match self {
            FetchOutcome::Loaded { layer_id, .. } => layer_id,
            FetchOutcome::Failed(failure) => &failure.request.layer_id,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded { .. })
    }
}

pub struct FetchAggregator {
    fetcher: Arc<dyn ImageFetcher>,
    requests: ExportRequestBuilder,
    concurrency: Option<usize>,
    timeout: Option<Duration>,
}

impl FetchAggregator {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, config: &CompositionConfig) -> Self {
        Self {
            fetcher,
            requests: ExportRequestBuilder::from_config(config),
            concurrency: config.fetch_concurrency,
            timeout: config.fetch_timeout(),
        }
    }

    /// Fetches every layer's raster and waits for all of them to settle.
    pub async fn fetch_all(&self, layers: &[&LayerDescriptor], view: &MapView) -> Vec<FetchOutcome> {
        let requests: Vec<ExportRequest> = layers
            .iter()
            .filter_map(|layer| self.requests.build(layer, view))
            .collect();

        debug!("Issuing {} export fetches (limit: {:?})", requests.len(), self.concurrency);

        let fetches = requests.into_iter().map(|request| self.fetch_one(request));
        match self.concurrency {
            None => join_all(fetches).await,
            Some(limit) => stream::iter(fetches).buffered(limit.max(1)).collect().await,
        }
    }

    fn fetch_one(&self, request: ExportRequest) -> impl Future<Output = FetchOutcome> {
        let pending = self.fetcher.fetch(request.clone());
        let timeout = self.timeout;

        async move {
            let result = match timeout {
                None => pending.await,
                Some(limit) => match tokio::time::timeout(limit, pending).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchFailure::new(request.clone(), FetchError::Timeout(limit.as_millis() as u64))),
                },
            };

            match result {
                Ok(raster) => FetchOutcome::Loaded { layer_id: request.layer_id, raster },
                Err(failure) => FetchOutcome::Failed(failure),
            }
        }
    }
}
