//! `acceluav` - Back office for the AccelUAV site
//!
//! This library provides the tiered geospatial pricing engine, the in-memory
//! site catalog with its admin operations and search, and the static asset
//! server that delivers 3D models, images and streamed video.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;

pub use assets::{AssetKind, AssetServerConfig, AssetUrls};
pub use catalog::{SearchResults, Site};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use pricing::{PricingBook, PricingModel, Quote, QuoteRequest, Service};
