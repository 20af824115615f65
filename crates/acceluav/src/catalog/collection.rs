//! Generic in-memory record collection.

use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};

/// Where newly added records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Newest first (feeds, inboxes).
    Front,
    /// Newest last (rosters, catalogs).
    Back,
}

/// A record stored in a [`Collection`].
pub trait Record: Clone {
    /// Collection name used in logs and validation errors.
    const COLLECTION: &'static str;

    /// Prefix for generated identifiers.
    const ID_PREFIX: &'static str;

    /// Where [`Collection::add`] inserts.
    const PLACEMENT: Placement;

    /// The record's identifier.
    fn id(&self) -> &str;

    /// Overwrite the identifier.
    fn set_id(&mut self, id: String);

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first empty required field.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// A record with a review status.
pub trait Reviewable: Record {
    /// The status type.
    type Status: Copy + std::fmt::Debug;

    /// Overwrite the status.
    fn set_status(&mut self, status: Self::Status);
}

/// Fail with a validation error if `value` is blank.
///
/// # Errors
///
/// Returns [`Error::Validation`] when `value` is empty or whitespace.
pub fn require(collection: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(collection, field))
    } else {
        Ok(())
    }
}

/// Time-derived identifier source.
///
/// Identifiers are `<prefix>-<unix millis>`. Two calls within the same
/// millisecond still get distinct, increasing stamps.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier for `prefix`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        let stamp = Utc::now().timestamp_millis().max(self.last + 1);
        self.last = stamp;
        format!("{prefix}-{stamp}")
    }
}

/// An ordered, in-memory list of records.
///
/// Mutations never fail on a missing identifier; they report whether anything
/// changed instead.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    /// Create a collection from existing records.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// All records in display order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a record by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Add a record under a freshly generated identifier.
    ///
    /// Any identifier already on `record` is replaced.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn add(&mut self, ids: &mut IdGenerator, mut record: T) -> Result<&T> {
        record.validate()?;
        record.set_id(ids.next_id(T::ID_PREFIX));
        debug!(collection = T::COLLECTION, id = record.id(), "Adding record");

        match T::PLACEMENT {
            Placement::Front => {
                self.items.insert(0, record);
                Ok(&self.items[0])
            }
            Placement::Back => {
                self.items.push(record);
                Ok(&self.items[self.items.len() - 1])
            }
        }
    }

    /// Replace the record with the same identifier.
    ///
    /// Returns `false` if no record matched.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is empty.
    pub fn update(&mut self, record: T) -> Result<bool> {
        record.validate()?;
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(slot) => {
                debug!(collection = T::COLLECTION, id = record.id(), "Updating record");
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the record with identifier `id`.
    ///
    /// Returns `false` if no record matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(collection = T::COLLECTION, id, "Deleted record");
        }
        removed
    }
}

impl<T: Reviewable> Collection<T> {
    /// Set the status of the record with identifier `id`.
    ///
    /// Any transition is allowed. Returns `false` if no record matched.
    pub fn set_status(&mut self, id: &str, status: T::Status) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                debug!(collection = T::COLLECTION, id, ?status, "Changing status");
                item.set_status(status);
                true
            }
            None => false,
        }
    }
}
