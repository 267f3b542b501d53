//! Client for the Pollinations image generation API.
//!
//! The crate is split into a pure core and a thin front-end:
//! [`pollinations::build_url`] turns an [`ImageRequest`] into a request URL,
//! [`ImageFetcher`] performs the HTTP GET and memoizes results per URL, and
//! [`PollinationsClient`] ties both together for callers such as the bundled
//! command line binary.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod pollinations;

pub use config::PollinationsConfig;
pub use error::{Error, Result};
pub use models::*;
pub use pollinations::{build_url, ImageCache, ImageFetcher, PollinationsClient};
