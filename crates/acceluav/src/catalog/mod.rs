//! Site content administration.
//!
//! Ten content collections share one set of operations:
//!
//! - **Add**: validate required fields, assign a fresh `<prefix>-<millis>`
//!   identifier, then insert at the front (feeds, inboxes) or the back
//!   (rosters, catalogs) depending on the record type.
//!
//! - **Update** / **Delete**: match by identifier. A missing identifier is a
//!   no-op reported as `false`.
//!
//! - **Status**: job and hackathon applications move freely between their
//!   review states.
//!
//! # Example
//!
//! ```
//! use acceluav::catalog::{Job, Site};
//! use acceluav::pricing::PricingModel;
//!
//! let mut site = Site::seeded(PricingModel::default()).unwrap();
//! let before = site.list::<Job>().len();
//! assert!(!site.delete::<Job>("missing"));
//! assert_eq!(site.list::<Job>().len(), before);
//! ```

mod collection;
mod records;
mod search;
mod site;

pub use collection::{require, Collection, IdGenerator, Placement, Record, Reviewable};
pub use records::{
    Application, ApplicationStatus, BlogPost, Hackathon, HackathonApplication,
    HackathonApplicationStatus, HackathonStatus, Job, Leader, NewsItem, Partner, Payload,
    PayloadKind, Product, Spec,
};
pub use search::SearchResults;
pub use site::{Site, SiteRecord};
