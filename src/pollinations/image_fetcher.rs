use crate::{
    error::{Error, Result},
    logger,
    models::FetchedImage,
};
use reqwest::{header::CONTENT_TYPE, Client};
use std::collections::HashMap;
use std::time::Duration;

/// Results of successful fetches keyed by the exact URL string.
///
/// Unbounded with no eviction; it lives as long as its owner. Failures are
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: HashMap<String, FetchedImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&FetchedImage> {
        self.entries.get(url)
    }

    pub fn insert(&mut self, image: FetchedImage) {
        self.entries.insert(image.url.clone(), image);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
    cache: ImageCache,
}

impl ImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cache: ImageCache::new(),
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Returns the cached image for `url`, or performs a single GET.
    ///
    /// A non-2xx status becomes [`Error::Http`]; connection failures,
    /// interrupted bodies and timeouts become [`Error::Network`].
    pub async fn fetch(&mut self, url: &str) -> Result<FetchedImage> {
        if let Some(image) = self.cache.get(url) {
            log::debug!("♻️  Cache hit ({} bytes): {}", image.len(), url);
            return Ok(image.clone());
        }

        let image = self
            .fetch_uncached(url)
            .await
            .inspect_err(|e| log::warn!("⚠️  Fetch failed for {}: {}", url, e))?;
        self.cache.insert(image.clone());
        Ok(image)
    }

    async fn fetch_uncached(&self, url: &str) -> Result<FetchedImage> {
        let _timer = logger::timer("image fetch");
        log::info!("🌐 GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let bytes = response.bytes().await?;
        log::info!("📦 Received {} bytes ({})", bytes.len(), status);

        Ok(FetchedImage {
            url: url.to_string(),
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
