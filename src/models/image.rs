use super::common::{AspectRatio, ImageModel};
use crate::error::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    prompt: String,
    model: ImageModel,
    aspect_ratio: AspectRatio,
    seed: u64,
}

impl ImageRequest {
    /// Rejects prompts that are empty once trimmed; nothing else is checked.
    pub fn new(
        prompt: impl Into<String>,
        model: ImageModel,
        aspect_ratio: AspectRatio,
        seed: u64,
    ) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(Error::Validation("Please enter a prompt.".into()));
        }

        Ok(Self {
            prompt,
            model,
            aspect_ratio,
            seed,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn model(&self) -> ImageModel {
        self.model
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// `None` when the remote service should pick the seed.
    pub fn seed(&self) -> Option<u64> {
        (self.seed > 0).then_some(self.seed)
    }

    pub fn to_url(&self, base_url: &str) -> String {
        crate::pollinations::build_url(
            base_url,
            &self.prompt,
            self.model,
            self.aspect_ratio,
            self.seed,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
        }
    }
}

/// Image bytes together with the URL that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub url: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Best guess from magic bytes, for display. The body is never validated.
    pub fn format_hint(&self) -> Option<ImageFormat> {
        let b = self.bytes.as_slice();
        if b.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if b.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if b.starts_with(b"GIF87a") || b.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if b.len() >= 12 && &b[..4] == b"RIFF" && &b[8..12] == b"WEBP" {
            Some(ImageFormat::WebP)
        } else {
            None
        }
    }
}
