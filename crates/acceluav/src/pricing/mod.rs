//! Geospatial data pricing.
//!
//! Prices are quoted per hectare from tiered rate cards:
//!
//! - **Tier lookup**: the first tier whose limit is strictly above the area
//!   prices the *whole* area. Areas beyond every limit use the last tier.
//!
//! - **Single quotes**: one rate card, `area * rate`.
//!
//! - **Bundle quotes**: the four premium modules with a fixed 30% discount.
//!
//! - **Custom quotes**: any subset of modules, summed without discount.
//!
//! Nothing here fails. A non-positive area or a missing rate card prices at 0.
//!
//! # Example
//!
//! ```
//! use acceluav::pricing::{quote_bundle, quote_single, PricingModel, Service};
//!
//! let model = PricingModel::default();
//! assert_eq!(quote_single(&model, 5.0, Service::Ortho), 300.0);
//!
//! let bundle = quote_bundle(&model, 10.0);
//! assert_eq!(bundle.gross_total, 67_000.0);
//! assert_eq!(bundle.discounted_total, 46_900.0);
//! ```

mod book;
mod model;
mod quote;
mod tier;

pub use book::PricingBook;
pub use model::{PointCloudKind, PricingModel, Service, SpectralKind};
pub use quote::{
    quote_bundle, quote_custom, quote_single, BundleQuote, CustomQuote, LineItem, Module, Quote,
    QuoteRequest, ServiceSelection, BUNDLE_DISCOUNT_FACTOR,
};
pub use tier::{active_tier_index, is_active_tier, is_quotable, rate_for, PriceTier};
