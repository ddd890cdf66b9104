use futures::future::BoxFuture;
use log::debug;
use crate::config::CompositionConfig;
use crate::errors::{FetchError, FetchFailure};
use crate::net::{ExportRequest, Response};
use crate::render::RasterImage;

/// Future returned by an [`ImageFetcher`]. Settles exactly once.
pub type FetchFuture = BoxFuture<'static, Result<RasterImage, FetchFailure>>;

/// Loads the raster behind an export request.
///
/// Implementations must not retry; a failure is reported once through the
/// returned future, paired with the request that failed.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, request: ExportRequest) -> FetchFuture;
}

/// Fetches export rasters over HTTP(S) and decodes them as PNG.
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &CompositionConfig) -> Result<Self, FetchError> {
        Self::new(&config.user_agent)
    }

    /// Uses an already configured client (proxies, certificates, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, request: ExportRequest) -> FetchFuture {
        let client = self.client.clone();

        Box::pin(async move {
            let response = match get(&client, &request.url).await {
                Ok(response) => response,
                Err(e) => return Err(FetchFailure::new(request, FetchError::Network(e.to_string()))),
            };

            if !response.is_success() {
                let error = FetchError::Status { status: response.status, reason: response.status_text };
                return Err(FetchFailure::new(request, error));
            }

            debug!(
                "Loaded {} bytes ({}) for layer {}",
                response.body.len(),
                response.content_type().unwrap_or("no content type"),
                request.layer_id
            );

            match RasterImage::decode_png(&response.body) {
                Ok(raster) => Ok(raster),
                Err(e) => Err(FetchFailure::new(request, FetchError::Decode(e.to_string()))),
            }
        })
    }
}

// Loads an URL and returns the fully buffered response
async fn get(client: &reqwest::Client, url: &str) -> Result<Response, reqwest::Error> {
    let res = client.get(url).send().await?;

    let final_url = res.url().clone();
    let status = res.status().as_u16();
    let status_text = res.status().canonical_reason().unwrap_or("Unknown").to_string();
    let headers = res.headers().clone();

    // Export images are small enough to buffer
    let body = res.bytes().await?.to_vec();

    Ok(Response {
        url: final_url,
        status,
        status_text,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SurfaceSize;
    use crate::testing::encode_png;
    use std::sync::OnceLock;
    use tiny_http::{Header, Response as HttpResponse, Server};

    fn start_server() -> String {
        static ADDR: OnceLock<String> = OnceLock::new();
        ADDR.get_or_init(|| {
            let server = Server::http("127.0.0.1:0").unwrap();
            let port = server.server_addr().to_ip().unwrap().port();

            std::thread::spawn(move || {
                let png = encode_png(2, 2, &[0, 128, 255, 255].repeat(4), png::ColorType::Rgba);
                for request in server.incoming_requests() {
                    let path = request.url().to_string();
                    let _ = if path.starts_with("/ok/MapServer/export") {
                        request.respond(
                            HttpResponse::from_data(png.clone())
                                .with_header("Content-Type: image/png".parse::<Header>().unwrap()),
                        )
                    } else if path.starts_with("/html/MapServer/export") {
                        request.respond(HttpResponse::from_string("<html>error page</html>"))
                    } else {
                        request.respond(HttpResponse::from_string("Not Found").with_status_code(404))
                    };
                }
            });

            format!("http://127.0.0.1:{port}")
        })
        .clone()
    }

    fn request(url: String) -> ExportRequest {
        ExportRequest {
            layer_id: "layer".to_string(),
            url,
            size: SurfaceSize { width: 2, height: 2 },
        }
    }

    #[tokio::test]
    async fn loads_and_decodes_png() {
        let base = start_server();
        let fetcher = HttpImageFetcher::new("map-canvas-test").unwrap();

        let raster = fetcher
            .fetch(request(format!("{base}/ok/MapServer/export?f=image")))
            .await
            .unwrap();
        assert_eq!((raster.width(), raster.height()), (2, 2));
        assert_eq!(raster.pixel(1, 1), Some([0, 128, 255, 255]));
    }

    #[tokio::test]
    async fn http_errors_keep_the_request() {
        let base = start_server();
        let fetcher = HttpImageFetcher::new("map-canvas-test").unwrap();
        let url = format!("{base}/missing/MapServer/export?f=image");

        let failure = fetcher.fetch(request(url.clone())).await.unwrap_err();
        assert_eq!(failure.request.url, url);
        assert!(matches!(failure.error, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn non_image_bodies_are_decode_failures() {
        let base = start_server();
        let fetcher = HttpImageFetcher::new("map-canvas-test").unwrap();

        let failure = fetcher
            .fetch(request(format!("{base}/html/MapServer/export?f=image")))
            .await
            .unwrap_err();
        assert!(matches!(failure.error, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_hosts_are_network_failures() {
        let fetcher = HttpImageFetcher::new("map-canvas-test").unwrap();
        let failure = fetcher
            .fetch(request("not a url/export".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(failure.error, FetchError::Network(_)));
    }
}
