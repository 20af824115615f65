//! The live pricing model.

use std::sync::Arc;

use tracing::info;

use super::model::PricingModel;
use crate::error::Result;

/// Holds the current [`PricingModel`].
///
/// Readers take an `Arc` snapshot; a replace swaps the whole model, so a
/// snapshot never observes a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct PricingBook {
    current: Arc<PricingModel>,
}

impl PricingBook {
    /// Create a book holding `model`.
    #[must_use]
    pub fn new(model: PricingModel) -> Self {
        Self {
            current: Arc::new(model),
        }
    }

    /// Snapshot of the current model.
    #[must_use]
    pub fn current(&self) -> Arc<PricingModel> {
        Arc::clone(&self.current)
    }

    /// Borrow the current model.
    #[must_use]
    pub fn model(&self) -> &PricingModel {
        &self.current
    }

    /// Replace the whole model.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the current model in place, if `model` fails
    /// validation.
    pub fn replace(&mut self, model: PricingModel) -> Result<()> {
        model.validate()?;
        info!(cards = model.len(), "Replacing pricing model");
        self.current = Arc::new(model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PriceTier, Service};

    #[test]
    fn test_default_book_holds_reference_model() {
        let book = PricingBook::default();
        assert_eq!(*book.current(), PricingModel::default());
    }

    #[test]
    fn test_replace_swaps_whole_model() {
        let mut book = PricingBook::default();
        let snapshot = book.current();

        let replacement =
            PricingModel::new().with(Service::Ortho, vec![PriceTier::unbounded("flat", 1.0)]);
        book.replace(replacement.clone()).unwrap();

        assert_eq!(*book.current(), replacement);
        assert!(book.model().tiers(Service::ThreeDTwin).is_empty());
        // Earlier snapshots are untouched.
        assert_eq!(*snapshot, PricingModel::default());
    }

    #[test]
    fn test_replace_rejects_invalid_model() {
        let mut book = PricingBook::default();
        let invalid = PricingModel::new().with(
            Service::Ortho,
            vec![
                PriceTier::bounded("b", 20.0, 1.0),
                PriceTier::bounded("a", 10.0, 1.0),
            ],
        );
        assert!(book.replace(invalid).is_err());
        assert_eq!(*book.current(), PricingModel::default());
    }
}
