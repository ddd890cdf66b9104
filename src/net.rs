//! Remote layer rasters: export URLs and the fetchers that load them.

pub mod export;
pub mod fetch;
pub mod query;
mod response;

pub use export::{ExportRequest, ExportRequestBuilder};
pub use fetch::{FetchFuture, HttpImageFetcher, ImageFetcher};
pub use query::encode_query;
pub use response::Response;
