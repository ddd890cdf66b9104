//! Deterministic helpers shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use log::{Level, LevelFilter, Log, Metadata, Record};
use crate::errors::{FetchError, FetchFailure};
use crate::net::{ExportRequest, FetchFuture, ImageFetcher};
use crate::render::RasterImage;

/// Forwards to env_logger and keeps every record so tests can assert on diagnostics.
struct CapturingLogger {
    inner: env_logger::Logger,
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

static LOGGER: OnceLock<CapturingLogger> = OnceLock::new();

pub fn init_logger() {
    let logger = LOGGER.get_or_init(|| CapturingLogger {
        inner: env_logger::builder().is_test(true).build(),
        records: Mutex::new(Vec::new()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Whether a record at `level` containing `needle` was logged by any test so far.
/// Tests run in parallel, so needles should name something unique to the test.
pub fn logged(level: Level, needle: &str) -> bool {
    LOGGER.get().is_some_and(|logger| {
        logger
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    })
}

/// What the stub answers for a layer.
#[derive(Clone)]
pub enum StubResponse {
    Raster(RasterImage),
    Fail(FetchError),
    /// Answer after the given number of milliseconds.
    Delayed(u64, Box<StubResponse>),
    /// Never settle.
    Hang,
}

/// Fetcher answering from a table keyed by layer id. Unknown layers fail.
#[derive(Clone, Default)]
pub struct StubFetcher {
    responses: Arc<HashMap<String, StubResponse>>,
    issued: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, layer_id: &str, response: StubResponse) -> Self {
        Arc::make_mut(&mut self.responses).insert(layer_id.to_string(), response);
        self
    }

    /// Number of fetches issued so far.
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Requested URLs in the order the fetches started.
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl ImageFetcher for StubFetcher {
    fn fetch(&self, request: ExportRequest) -> FetchFuture {
        self.issued.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.get(&request.layer_id).cloned();
        let this = self.clone();

        Box::pin(async move {
            this.urls.lock().unwrap().push(request.url.clone());
            let now = this.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            this.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let mut response = response.unwrap_or(StubResponse::Fail(FetchError::Network("no stub".into())));
            let result = loop {
                match response {
                    StubResponse::Raster(raster) => break Ok(raster),
                    StubResponse::Fail(error) => break Err(FetchFailure::new(request, error)),
                    StubResponse::Delayed(ms, next) => {
                        tokio::time::sleep(Duration::from_millis(ms)).await;
                        response = *next;
                    }
                    StubResponse::Hang => futures::future::pending::<()>().await,
                }
            };

            this.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        })
    }
}

pub fn encode_png(width: u32, height: u32, data: &[u8], color: png::ColorType) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// Asserts two straight RGBA pixels differ by at most 2 per channel (filtering round-off).
#[track_caller]
pub fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 2);
    assert!(close, "pixel {actual:?} is not close to {expected:?}");
}
