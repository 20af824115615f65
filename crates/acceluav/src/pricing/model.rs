//! Rate cards keyed by service.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use figment::{
    providers::{Format, Json, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use super::tier::PriceTier;
use crate::error::{Error, Result};

/// Point cloud capture variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointCloudKind {
    /// Photogrammetric, low density.
    #[default]
    Low,
    /// LiDAR.
    Lidar,
}

impl fmt::Display for PointCloudKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Lidar => write!(f, "lidar"),
        }
    }
}

/// Spectral imaging variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectralKind {
    /// Multispectral.
    #[default]
    Multi,
    /// Hyperspectral.
    Hyper,
}

impl fmt::Display for SpectralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multi => write!(f, "multi"),
            Self::Hyper => write!(f, "hyper"),
        }
    }
}

/// A concrete priced service, i.e. one rate card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// 3D digital twin.
    ThreeDTwin,
    /// Orthomosaic and report.
    Ortho,
    /// Point cloud of the given kind.
    PointCloud(PointCloudKind),
    /// Spectral imaging of the given kind.
    Spectral(SpectralKind),
}

impl Service {
    /// Every rate card in display order.
    pub const ALL: [Service; 6] = [
        Service::ThreeDTwin,
        Service::Ortho,
        Service::PointCloud(PointCloudKind::Low),
        Service::PointCloud(PointCloudKind::Lidar),
        Service::Spectral(SpectralKind::Multi),
        Service::Spectral(SpectralKind::Hyper),
    ];

    /// Rate card key in a [`PricingModel`].
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ThreeDTwin => "3d_twin",
            Self::Ortho => "ortho",
            Self::PointCloud(PointCloudKind::Low) => "point_cloud_low",
            Self::PointCloud(PointCloudKind::Lidar) => "point_cloud_lidar",
            Self::Spectral(SpectralKind::Multi) => "spectral_multi",
            Self::Spectral(SpectralKind::Hyper) => "spectral_hyper",
        }
    }

    /// Human-readable name used in rate card headers and single quotes.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::ThreeDTwin => "3D Digital Twin".to_string(),
            Self::Ortho => "Orthomosaic / Report".to_string(),
            Self::PointCloud(kind) => format!("Point Cloud ({kind})"),
            Self::Spectral(kind) => format!("Spectral ({kind})"),
        }
    }

    /// Look a service up by its rate card key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.key() == key)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rate cards for every service, keyed by service key.
///
/// A key missing from the model prices at 0. The model is treated as an
/// immutable value: an administrative change replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingModel {
    cards: BTreeMap<String, Vec<PriceTier>>,
}

impl Default for PricingModel {
    /// The reference rate cards, in ₹ per hectare.
    fn default() -> Self {
        fn card(rates: [f64; 4]) -> Vec<PriceTier> {
            vec![
                PriceTier::bounded("< 10 ha", 10.0, rates[0]),
                PriceTier::bounded("< 15 ha", 15.0, rates[1]),
                PriceTier::bounded("< 1000 ha", 1000.0, rates[2]),
                PriceTier::unbounded("> 1000 ha", rates[3]),
            ]
        }

        Self::new()
            .with(Service::ThreeDTwin, card([250.0, 400.0, 120.0, 95.0]))
            .with(Service::Ortho, card([60.0, 400.0, 120.0, 95.0]))
            .with(
                Service::PointCloud(PointCloudKind::Low),
                card([150.0, 200.0, 60.0, 45.0]),
            )
            .with(
                Service::PointCloud(PointCloudKind::Lidar),
                card([260.0, 900.0, 120.0, 90.0]),
            )
            .with(
                Service::Spectral(SpectralKind::Multi),
                card([1200.0, 2300.0, 600.0, 350.0]),
            )
            .with(
                Service::Spectral(SpectralKind::Hyper),
                card([3500.0, 5000.0, 1700.0, 1200.0]),
            )
    }
}

impl PricingModel {
    /// Create an empty model. Every service prices at 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: BTreeMap::new(),
        }
    }

    /// Builder-style insert of a service's rate card.
    #[must_use]
    pub fn with(mut self, service: Service, tiers: Vec<PriceTier>) -> Self {
        self.cards.insert(service.key().to_string(), tiers);
        self
    }

    /// Tiers for a service; empty when the model has no card for it.
    #[must_use]
    pub fn tiers(&self, service: Service) -> &[PriceTier] {
        self.tiers_for_key(service.key())
    }

    /// Tiers for a raw service key; empty when unknown.
    #[must_use]
    pub fn tiers_for_key(&self, key: &str) -> &[PriceTier] {
        self.cards.get(key).map_or(&[], Vec::as_slice)
    }

    /// Iterate over `(key, tiers)` in key order.
    pub fn cards(&self) -> impl Iterator<Item = (&str, &[PriceTier])> {
        self.cards
            .iter()
            .map(|(key, tiers)| (key.as_str(), tiers.as_slice()))
    }

    /// Number of rate cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the model has no rate cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Load a model from a TOML or JSON rate card file.
    ///
    /// The format is chosen by extension (`.json` is JSON, anything else
    /// TOML). The loaded model is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or its tiers
    /// are not ordered.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::rate_card_load(path, "file does not exist"));
        }

        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Figment::from(Json::file(path)),
            _ => Figment::from(Toml::file(path)),
        };
        let model: Self = figment
            .extract()
            .map_err(|err| Error::rate_card_load(path, err.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Check the tier ordering rules on every card.
    ///
    /// Limits must be finite, positive and non-decreasing, only the last tier
    /// may be unbounded, and rates must be finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RateCard`] naming the first offending service.
    pub fn validate(&self) -> Result<()> {
        for (key, tiers) in &self.cards {
            let mut previous: Option<f64> = None;
            for (index, tier) in tiers.iter().enumerate() {
                if !tier.rate.is_finite() || tier.rate < 0.0 {
                    return Err(Error::rate_card(
                        key,
                        format!("tier '{}' has an invalid rate {}", tier.label, tier.rate),
                    ));
                }
                match tier.limit {
                    None if index + 1 != tiers.len() => {
                        return Err(Error::rate_card(
                            key,
                            format!("unbounded tier '{}' must be last", tier.label),
                        ));
                    }
                    None => {}
                    Some(limit) if !limit.is_finite() || limit <= 0.0 => {
                        return Err(Error::rate_card(
                            key,
                            format!("tier '{}' has an invalid limit {limit}", tier.label),
                        ));
                    }
                    Some(limit) => {
                        if previous.is_some_and(|prev| limit < prev) {
                            return Err(Error::rate_card(
                                key,
                                "tiers must be sorted ascending by limit",
                            ));
                        }
                        previous = Some(limit);
                    }
                }
            }
        }
        Ok(())
    }
}
