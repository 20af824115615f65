//! Static asset delivery.
//!
//! Two halves:
//!
//! - [`AssetUrls`] decides where the front end fetches a model, image or
//!   video from: a path under the local `public/` directory, or a route on a
//!   remote asset server.
//!
//! - [`router`] / [`serve`] are that asset server. Every response is
//!   cacheable for a year and open to any origin. Videos honor single byte
//!   ranges so players can seek.

mod range;
mod server;
mod urls;

pub use range::{ByteRange, RangeRequest};
pub use server::{router, serve, shutdown_signal, AssetServerConfig};
pub use urls::{AssetKind, AssetUrls};
