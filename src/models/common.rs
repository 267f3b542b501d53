use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageModel {
    #[default]
    Flux,
    Sd3,
    Sdxl,
    StableDiffusion,
}

impl ImageModel {
    pub const ALL: [ImageModel; 4] = [
        ImageModel::Flux,
        ImageModel::Sd3,
        ImageModel::Sdxl,
        ImageModel::StableDiffusion,
    ];

    /// Identifier sent as the `model=` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::Flux => "flux",
            ImageModel::Sd3 => "sd3",
            ImageModel::Sdxl => "sdxl",
            ImageModel::StableDiffusion => "stable-diffusion",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ImageModel::Flux => "FLUX",
            ImageModel::Sd3 => "Stable Diffusion 3",
            ImageModel::Sdxl => "Stable Diffusion XL",
            ImageModel::StableDiffusion => "Stable Diffusion",
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            ImageModel::Flux => "Black Forest Labs",
            ImageModel::Sd3 | ImageModel::Sdxl | ImageModel::StableDiffusion => "Stability AI",
        }
    }

    /// `(id, name, provider)` for every selectable model.
    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|m| (m.as_str(), m.display_name(), m.provider()))
            .collect()
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "unknown model '{}', expected one of: {}",
                    wanted,
                    Self::ALL.map(|m| m.as_str()).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait,
    Landscape,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "square",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Landscape => "landscape",
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (768, 768),
            AspectRatio::Portrait => (640, 896),
            AspectRatio::Landscape => (896, 640),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "unknown aspect ratio '{}', expected one of: square, portrait, landscape",
                    wanted
                ))
            })
    }
}
