pub mod image_fetcher;
pub mod url_builder;

use crate::{
    config::PollinationsConfig,
    error::Result,
    models::{FetchedImage, ImageRequest},
};
use uuid::Uuid;

pub use image_fetcher::{ImageCache, ImageFetcher};
pub use url_builder::build_url;

/// Builds request URLs and fetches them through a memoizing [`ImageFetcher`].
///
/// The cache belongs to the client, so one client per session gives
/// session-scoped memoization.
#[derive(Debug, Clone)]
pub struct PollinationsClient {
    config: PollinationsConfig,
    fetcher: ImageFetcher,
}

impl PollinationsClient {
    pub fn new(config: PollinationsConfig) -> Result<Self> {
        let fetcher = ImageFetcher::new(config.timeout)?;
        Ok(Self { config, fetcher })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(PollinationsConfig::from_env()?)
    }

    pub fn config(&self) -> &PollinationsConfig {
        &self.config
    }

    pub fn url_for(&self, request: &ImageRequest) -> String {
        request.to_url(&self.config.base_url)
    }

    /// One full build-and-fetch pass. Retrying is calling this again.
    pub async fn generate(&mut self, request: &ImageRequest) -> Result<FetchedImage> {
        let request_id = Uuid::new_v4().to_string();
        let request_id = request_id.as_str();
        let url = self.url_for(request);

        log::info!(
            request_id = request_id;
            "🎨 Generating image model={} aspect={} seed={}",
            request.model(),
            request.aspect_ratio(),
            request
                .seed()
                .map_or_else(|| "random".to_string(), |s| s.to_string())
        );
        log::debug!(request_id = request_id; "🔗 {}", url);

        match self.fetcher.fetch(&url).await {
            Ok(image) => {
                log::info!(request_id = request_id; "✅ {} bytes", image.len());
                Ok(image)
            }
            Err(e) => {
                log::error!(request_id = request_id; "❌ Generation failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn fetcher(&self) -> &ImageFetcher {
        &self.fetcher
    }

    pub fn clear_cache(&mut self) {
        self.fetcher.clear_cache();
    }
}
