//! The site aggregate: every content collection plus the live pricing book.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use super::collection::{Collection, IdGenerator, Record, Reviewable};
use super::records::{
    Application, BlogPost, Hackathon, HackathonApplication, Job, Leader, NewsItem, Partner,
    Payload, Product,
};
use super::search::{search, Haystack, SearchResults};
use crate::error::{Error, Result};
use crate::pricing::{PricingBook, PricingModel};

const SEED: &str = include_str!("../../data/seed.json");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SeedData {
    jobs: Vec<Job>,
    applications: Vec<Application>,
    leaders: Vec<Leader>,
    news: Vec<NewsItem>,
    partners: Vec<Partner>,
    products: Vec<Product>,
    blogs: Vec<BlogPost>,
    hackathons: Vec<Hackathon>,
    hackathon_applications: Vec<HackathonApplication>,
    payloads: Vec<Payload>,
}

/// All editable site content.
///
/// Records live only for the lifetime of the value. Every mutation goes
/// through the generic [`Site::add`], [`Site::update`], [`Site::delete`] and
/// [`Site::set_status`] operations, which dispatch on the record type.
#[derive(Debug, Default)]
pub struct Site {
    jobs: Collection<Job>,
    applications: Collection<Application>,
    leaders: Collection<Leader>,
    news: Collection<NewsItem>,
    partners: Collection<Partner>,
    products: Collection<Product>,
    blogs: Collection<BlogPost>,
    hackathons: Collection<Hackathon>,
    hackathon_applications: Collection<HackathonApplication>,
    payloads: Collection<Payload>,
    pricing: PricingBook,
    ids: IdGenerator,
}

/// A record type with a home in [`Site`].
pub trait SiteRecord: Record + Sized {
    /// The collection holding this record type.
    fn collection(site: &Site) -> &Collection<Self>;

    /// Mutable access to the collection holding this record type.
    fn collection_mut(site: &mut Site) -> &mut Collection<Self>;

    /// The collection together with the site's identifier source.
    fn entry(site: &mut Site) -> (&mut Collection<Self>, &mut IdGenerator);
}

macro_rules! impl_site_record {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl SiteRecord for $ty {
                fn collection(site: &Site) -> &Collection<Self> {
                    &site.$field
                }

                fn collection_mut(site: &mut Site) -> &mut Collection<Self> {
                    &mut site.$field
                }

                fn entry(site: &mut Site) -> (&mut Collection<Self>, &mut IdGenerator) {
                    (&mut site.$field, &mut site.ids)
                }
            }
        )+
    };
}

impl_site_record! {
    Job => jobs,
    Application => applications,
    Leader => leaders,
    NewsItem => news,
    Partner => partners,
    Product => products,
    BlogPost => blogs,
    Hackathon => hackathons,
    HackathonApplication => hackathon_applications,
    Payload => payloads,
}

impl Site {
    /// An empty site priced by `pricing`.
    #[must_use]
    pub fn new(pricing: PricingModel) -> Self {
        Self {
            pricing: PricingBook::new(pricing),
            ..Self::default()
        }
    }

    /// A site populated with the bundled seed content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Seed`] if the bundled content does not parse, or a
    /// rate card error if `pricing` is invalid.
    pub fn seeded(pricing: PricingModel) -> Result<Self> {
        pricing.validate()?;
        let seed: SeedData =
            serde_json::from_str(SEED).map_err(|e| Error::Seed(e.to_string()))?;

        let site = Self {
            jobs: Collection::new(seed.jobs),
            applications: Collection::new(seed.applications),
            leaders: Collection::new(seed.leaders),
            news: Collection::new(seed.news),
            partners: Collection::new(seed.partners),
            products: Collection::new(seed.products),
            blogs: Collection::new(seed.blogs),
            hackathons: Collection::new(seed.hackathons),
            hackathon_applications: Collection::new(seed.hackathon_applications),
            payloads: Collection::new(seed.payloads),
            pricing: PricingBook::new(pricing),
            ids: IdGenerator::new(),
        };
        info!(
            jobs = site.jobs.len(),
            products = site.products.len(),
            news = site.news.len(),
            "Loaded seed content"
        );
        Ok(site)
    }

    /// All records of type `T`, in display order.
    #[must_use]
    pub fn list<T: SiteRecord>(&self) -> &[T] {
        T::collection(self).items()
    }

    /// Find a record of type `T` by identifier.
    #[must_use]
    pub fn get<T: SiteRecord>(&self, id: &str) -> Option<&T> {
        T::collection(self).get(id)
    }

    /// Add a record, assigning a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn add<T: SiteRecord>(&mut self, record: T) -> Result<&T> {
        let (collection, ids) = T::entry(self);
        collection.add(ids, record)
    }

    /// Replace the record with the same identifier.
    ///
    /// Returns `false` if no record matched.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn update<T: SiteRecord>(&mut self, record: T) -> Result<bool> {
        T::collection_mut(self).update(record)
    }

    /// Remove the record of type `T` with identifier `id`.
    ///
    /// Returns `false` if no record matched.
    pub fn delete<T: SiteRecord>(&mut self, id: &str) -> bool {
        T::collection_mut(self).delete(id)
    }

    /// Change the review status of an application.
    ///
    /// Returns `false` if no record matched.
    pub fn set_status<T: SiteRecord + Reviewable>(&mut self, id: &str, status: T::Status) -> bool {
        T::collection_mut(self).set_status(id, status)
    }

    /// Current pricing model.
    #[must_use]
    pub fn pricing(&self) -> Arc<PricingModel> {
        self.pricing.current()
    }

    /// Swap in a new pricing model.
    ///
    /// # Errors
    ///
    /// Returns a rate card error if `model` is invalid; the previous model
    /// stays active.
    pub fn replace_pricing(&mut self, model: PricingModel) -> Result<()> {
        self.pricing.replace(model)
    }

    /// Case-insensitive search over products, jobs, leaders, blogs, news and
    /// hackathons.
    #[must_use]
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let results = search(
            &Haystack {
                products: self.products.items(),
                jobs: self.jobs.items(),
                leaders: self.leaders.items(),
                blogs: self.blogs.items(),
                news: self.news.items(),
                hackathons: self.hackathons.items(),
            },
            query,
        );
        debug!(query, hits = results.total(), "Searched site");
        results
    }
}
