//! Quotes for single services, the all-in-one bundle and custom builds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{PointCloudKind, PricingModel, Service, SpectralKind};
use super::tier::{is_active_tier, is_quotable, rate_for, PriceTier};

/// Multiplier applied to the bundle's gross total (30% off).
pub const BUNDLE_DISCOUNT_FACTOR: f64 = 0.7;

/// The all-in-one package. Always the premium variants.
const BUNDLE: [(Service, &str); 4] = [
    (Service::ThreeDTwin, "3D Digital Twin"),
    (Service::Ortho, "Orthomosaic / Report"),
    (Service::PointCloud(PointCloudKind::Lidar), "LiDAR Point Cloud"),
    (Service::Spectral(SpectralKind::Hyper), "Hyperspectral Imaging"),
];

/// A module that can be toggled into a custom build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// 3D digital twin.
    #[serde(rename = "3d_twin")]
    ThreeDTwin,
    /// Orthomosaic and report.
    Ortho,
    /// Point cloud, priced with the request's point cloud kind.
    PointCloud,
    /// Spectral imaging, priced with the request's spectral kind.
    Spectral,
}

impl Module {
    /// Modules in toggle order; custom line items follow this order.
    pub const ALL: [Module; 4] = [
        Module::ThreeDTwin,
        Module::Ortho,
        Module::PointCloud,
        Module::Spectral,
    ];

    /// The rate card this module prices against for the given subtypes.
    #[must_use]
    pub fn service(self, point_cloud: PointCloudKind, spectral: SpectralKind) -> Service {
        match self {
            Self::ThreeDTwin => Service::ThreeDTwin,
            Self::Ortho => Service::Ortho,
            Self::PointCloud => Service::PointCloud(point_cloud),
            Self::Spectral => Service::Spectral(spectral),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreeDTwin => write!(f, "3d_twin"),
            Self::Ortho => write!(f, "ortho"),
            Self::PointCloud => write!(f, "point_cloud"),
            Self::Spectral => write!(f, "spectral"),
        }
    }
}

/// What the calculator is pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSelection {
    /// 3D digital twin only.
    #[default]
    #[serde(rename = "3d_twin")]
    ThreeDTwin,
    /// Orthomosaic only.
    Ortho,
    /// Point cloud of the request's kind.
    PointCloud,
    /// Spectral imaging of the request's kind.
    Spectral,
    /// The discounted all-in-one bundle.
    All,
    /// A hand-picked set of modules.
    Custom,
}

/// One priced row of a bundle or custom quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display label.
    pub label: String,
    /// `area * rate` for this row.
    pub price: f64,
}

/// Result of [`quote_bundle`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BundleQuote {
    /// The four bundle modules, in fixed order. Empty when area is not quotable.
    pub line_items: Vec<LineItem>,
    /// Sum of the line items.
    pub gross_total: f64,
    /// `round(gross_total * 0.7)`.
    pub discounted_total: f64,
}

/// Result of [`quote_custom`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomQuote {
    /// Selected modules in toggle order.
    pub line_items: Vec<LineItem>,
    /// Sum of the line items. No discount.
    pub total: f64,
}

/// Any calculator result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Quote {
    /// A single rate card.
    Single {
        /// The rate card used.
        service: Service,
        /// `area * rate`.
        amount: f64,
    },
    /// The all-in-one bundle.
    Bundle(BundleQuote),
    /// A custom build.
    Custom(CustomQuote),
}

impl Quote {
    /// The amount the customer pays.
    #[must_use]
    pub fn payable(&self) -> f64 {
        match self {
            Self::Single { amount, .. } => *amount,
            Self::Bundle(bundle) => bundle.discounted_total,
            Self::Custom(custom) => custom.total,
        }
    }
}

/// Price one rate card over `area`. Zero when the area is not quotable.
#[must_use]
pub fn quote_single(model: &PricingModel, area: f64, service: Service) -> f64 {
    if !is_quotable(area) {
        return 0.0;
    }
    area * rate_for(area, model.tiers(service))
}

/// Price the all-in-one bundle over `area`.
#[must_use]
pub fn quote_bundle(model: &PricingModel, area: f64) -> BundleQuote {
    if !is_quotable(area) {
        return BundleQuote::default();
    }

    let line_items: Vec<LineItem> = BUNDLE
        .iter()
        .map(|(service, label)| LineItem {
            label: (*label).to_string(),
            price: quote_single(model, area, *service),
        })
        .collect();
    let gross_total = line_items.iter().map(|item| item.price).sum::<f64>();

    BundleQuote {
        line_items,
        gross_total,
        discounted_total: (gross_total * BUNDLE_DISCOUNT_FACTOR).round(),
    }
}

/// Price a custom build over `area`.
///
/// Line items follow [`Module::ALL`] order whatever order `selected` is in;
/// a module listed twice is priced once.
#[must_use]
pub fn quote_custom(
    model: &PricingModel,
    area: f64,
    selected: &[Module],
    point_cloud: PointCloudKind,
    spectral: SpectralKind,
) -> CustomQuote {
    if !is_quotable(area) {
        return CustomQuote::default();
    }

    let line_items: Vec<LineItem> = Module::ALL
        .into_iter()
        .filter(|module| selected.contains(module))
        .map(|module| {
            let service = module.service(point_cloud, spectral);
            LineItem {
                label: service.label(),
                price: quote_single(model, area, service),
            }
        })
        .collect();
    let total = line_items.iter().map(|item| item.price).sum::<f64>();

    CustomQuote { line_items, total }
}

/// Calculator input. Recomputed from scratch on every change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    /// Area in hectares.
    pub area: f64,
    /// What is being priced.
    pub selection: ServiceSelection,
    /// Point cloud kind, used by the point cloud selection and module.
    pub point_cloud: PointCloudKind,
    /// Spectral kind, used by the spectral selection and module.
    pub spectral: SpectralKind,
    /// Modules toggled on for a custom build.
    pub modules: Vec<Module>,
}

impl QuoteRequest {
    /// A request for `area` hectares with everything else defaulted.
    #[must_use]
    pub fn new(area: f64, selection: ServiceSelection) -> Self {
        Self {
            area,
            selection,
            ..Self::default()
        }
    }

    /// The single rate card this request prices, if it is not a bundle or
    /// custom build.
    #[must_use]
    pub fn service(&self) -> Option<Service> {
        match self.selection {
            ServiceSelection::ThreeDTwin => Some(Service::ThreeDTwin),
            ServiceSelection::Ortho => Some(Service::Ortho),
            ServiceSelection::PointCloud => Some(Service::PointCloud(self.point_cloud)),
            ServiceSelection::Spectral => Some(Service::Spectral(self.spectral)),
            ServiceSelection::All | ServiceSelection::Custom => None,
        }
    }

    /// Rate cards to display for this request, with their headers.
    ///
    /// Bundle requests show none; custom builds show one card per selected
    /// module.
    #[must_use]
    pub fn rate_cards<'m>(&self, model: &'m PricingModel) -> Vec<(Service, &'m [PriceTier])> {
        let services: Vec<Service> = match self.selection {
            ServiceSelection::All => Vec::new(),
            ServiceSelection::Custom => Module::ALL
                .into_iter()
                .filter(|module| self.modules.contains(module))
                .map(|module| module.service(self.point_cloud, self.spectral))
                .collect(),
            _ => self.service().into_iter().collect(),
        };
        services
            .into_iter()
            .map(|service| (service, model.tiers(service)))
            .collect()
    }

    /// Price this request.
    #[must_use]
    pub fn evaluate(&self, model: &PricingModel) -> Quote {
        match self.selection {
            ServiceSelection::All => Quote::Bundle(quote_bundle(model, self.area)),
            ServiceSelection::Custom => Quote::Custom(quote_custom(
                model,
                self.area,
                &self.modules,
                self.point_cloud,
                self.spectral,
            )),
            ServiceSelection::ThreeDTwin => self.single(model, Service::ThreeDTwin),
            ServiceSelection::Ortho => self.single(model, Service::Ortho),
            ServiceSelection::PointCloud => {
                self.single(model, Service::PointCloud(self.point_cloud))
            }
            ServiceSelection::Spectral => self.single(model, Service::Spectral(self.spectral)),
        }
    }

    fn single(&self, model: &PricingModel, service: Service) -> Quote {
        Quote::Single {
            service,
            amount: quote_single(model, self.area, service),
        }
    }

    /// Whether row `index` of `tiers` should be highlighted.
    ///
    /// Bundle and custom requests never highlight a row.
    #[must_use]
    pub fn is_active_tier(&self, index: usize, tiers: &[PriceTier]) -> bool {
        self.service().is_some() && is_active_tier(index, tiers, self.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model() -> PricingModel {
        PricingModel::default()
    }

    #[test]
    fn test_single_ortho_first_bracket() {
        assert_eq!(quote_single(&model(), 5.0, Service::Ortho), 300.0);
    }

    #[test]
    fn test_single_ortho_exclusive_boundary() {
        assert_eq!(quote_single(&model(), 10.0, Service::Ortho), 4000.0);
    }

    #[test]
    fn test_single_twin_catch_all() {
        assert_eq!(quote_single(&model(), 2000.0, Service::ThreeDTwin), 190_000.0);
    }

    #[test]
    fn test_single_non_positive_area() {
        for service in Service::ALL {
            assert_eq!(quote_single(&model(), 0.0, service), 0.0);
            assert_eq!(quote_single(&model(), -4.0, service), 0.0);
        }
    }

    #[test]
    fn test_single_missing_card_is_zero() {
        assert_eq!(quote_single(&PricingModel::new(), 50.0, Service::Ortho), 0.0);
    }

    #[test]
    fn test_bundle_at_ten_hectares() {
        let bundle = quote_bundle(&model(), 10.0);
        assert_eq!(bundle.line_items.len(), 4);
        assert_eq!(bundle.line_items[0].label, "3D Digital Twin");
        assert_eq!(bundle.line_items[2].label, "LiDAR Point Cloud");
        assert_eq!(bundle.line_items[2].price, 9000.0);
        assert_eq!(bundle.line_items[3].price, 50_000.0);
        assert_eq!(bundle.gross_total, 67_000.0);
        assert_eq!(bundle.discounted_total, 46_900.0);
    }

    #[test]
    fn test_bundle_zero_area() {
        let bundle = quote_bundle(&model(), 0.0);
        assert!(bundle.line_items.is_empty());
        assert_eq!(bundle.gross_total, 0.0);
        assert_eq!(bundle.discounted_total, 0.0);
    }

    #[test]
    fn test_bundle_rounds_discount() {
        // 1.5 ha: 1.5 * (250 + 60 + 260 + 3500) = 6105, * 0.7 = 4273.5
        let bundle = quote_bundle(&model(), 1.5);
        assert_eq!(bundle.gross_total, 6105.0);
        assert_eq!(bundle.discounted_total, 4274.0);
    }

    #[test]
    fn test_custom_point_cloud_lidar_only() {
        let custom = quote_custom(
            &model(),
            1.0,
            &[Module::PointCloud],
            PointCloudKind::Lidar,
            SpectralKind::Multi,
        );
        assert_eq!(
            custom.line_items,
            vec![LineItem {
                label: "Point Cloud (lidar)".to_string(),
                price: 260.0,
            }]
        );
        assert_eq!(custom.total, 260.0);
    }

    #[test]
    fn test_custom_empty_selection() {
        let custom = quote_custom(
            &model(),
            25.0,
            &[],
            PointCloudKind::Low,
            SpectralKind::Multi,
        );
        assert!(custom.line_items.is_empty());
        assert_eq!(custom.total, 0.0);
    }

    #[test]
    fn test_custom_uses_toggle_order_and_dedups() {
        let custom = quote_custom(
            &model(),
            20.0,
            &[Module::Spectral, Module::ThreeDTwin, Module::Spectral],
            PointCloudKind::Low,
            SpectralKind::Hyper,
        );
        let labels: Vec<&str> = custom.line_items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["3D Digital Twin", "Spectral (hyper)"]);
        assert_eq!(custom.total, 20.0 * 120.0 + 20.0 * 1700.0);
    }

    #[test]
    fn test_custom_has_no_discount() {
        let all: Vec<Module> = Module::ALL.to_vec();
        let custom = quote_custom(
            &model(),
            10.0,
            &all,
            PointCloudKind::Lidar,
            SpectralKind::Hyper,
        );
        let bundle = quote_bundle(&model(), 10.0);
        assert_eq!(custom.total, bundle.gross_total);
        assert!(custom.total > bundle.discounted_total);
    }

    #[test]
    fn test_request_evaluate_single() {
        let mut request = QuoteRequest::new(5.0, ServiceSelection::PointCloud);
        request.point_cloud = PointCloudKind::Lidar;
        let quote = request.evaluate(&model());
        assert_eq!(
            quote,
            Quote::Single {
                service: Service::PointCloud(PointCloudKind::Lidar),
                amount: 1300.0,
            }
        );
        assert_eq!(quote.payable(), 1300.0);
    }

    #[test]
    fn test_request_evaluate_prices_each_selected_card() {
        let model = model();
        let cases = [
            (ServiceSelection::ThreeDTwin, Service::ThreeDTwin),
            (ServiceSelection::Ortho, Service::Ortho),
            (
                ServiceSelection::PointCloud,
                Service::PointCloud(PointCloudKind::Lidar),
            ),
            (
                ServiceSelection::Spectral,
                Service::Spectral(SpectralKind::Hyper),
            ),
        ];

        for (selection, service) in cases {
            let mut request = QuoteRequest::new(12.0, selection);
            request.point_cloud = PointCloudKind::Lidar;
            request.spectral = SpectralKind::Hyper;

            assert_eq!(request.service(), Some(service));
            assert_eq!(
                request.evaluate(&model),
                Quote::Single {
                    service,
                    amount: quote_single(&model, 12.0, service),
                }
            );
        }
    }

    #[test]
    fn test_request_evaluate_bundle_payable_is_discounted() {
        let quote = QuoteRequest::new(10.0, ServiceSelection::All).evaluate(&model());
        assert_eq!(quote.payable(), 46_900.0);
    }

    #[test]
    fn test_request_active_tier() {
        let model = model();
        let request = QuoteRequest::new(12.0, ServiceSelection::Ortho);
        let tiers = model.tiers(Service::Ortho);
        assert!(request.is_active_tier(1, tiers));
        assert!(!request.is_active_tier(0, tiers));
    }

    #[test]
    fn test_request_active_tier_never_for_bundle_or_custom() {
        let model = model();
        let tiers = model.tiers(Service::Ortho);
        for selection in [ServiceSelection::All, ServiceSelection::Custom] {
            let request = QuoteRequest::new(12.0, selection);
            assert!((0..tiers.len()).all(|index| !request.is_active_tier(index, tiers)));
        }
    }

    #[test]
    fn test_request_active_tier_never_for_zero_area() {
        let model = model();
        let tiers = model.tiers(Service::Ortho);
        let request = QuoteRequest::new(0.0, ServiceSelection::Ortho);
        assert!((0..tiers.len()).all(|index| !request.is_active_tier(index, tiers)));
    }

    #[test]
    fn test_request_rate_cards() {
        let model = model();
        assert!(QuoteRequest::new(5.0, ServiceSelection::All)
            .rate_cards(&model)
            .is_empty());

        let mut custom = QuoteRequest::new(5.0, ServiceSelection::Custom);
        custom.modules = vec![Module::Spectral, Module::Ortho];
        custom.spectral = SpectralKind::Hyper;
        let cards: Vec<Service> = custom.rate_cards(&model).into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            cards,
            vec![Service::Ortho, Service::Spectral(SpectralKind::Hyper)]
        );
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: QuoteRequest =
            serde_json::from_str(r#"{"area": 3, "selection": "custom", "modules": ["3d_twin", "point_cloud"]}"#)
                .unwrap();
        assert_eq!(request.selection, ServiceSelection::Custom);
        assert_eq!(request.point_cloud, PointCloudKind::Low);
        assert_eq!(request.modules, vec![Module::ThreeDTwin, Module::PointCloud]);
    }

    fn any_service() -> impl Strategy<Value = Service> {
        prop::sample::select(Service::ALL.to_vec())
    }

    fn any_modules() -> impl Strategy<Value = Vec<Module>> {
        prop::collection::vec(prop::sample::select(Module::ALL.to_vec()), 0..6)
    }

    proptest! {
        #[test]
        fn prop_zero_area_quotes_zero(service in any_service()) {
            prop_assert_eq!(quote_single(&model(), 0.0, service), 0.0);
        }

        #[test]
        fn prop_bundle_discount_identity(area in 0.01f64..50_000.0) {
            let bundle = quote_bundle(&model(), area);
            prop_assert_eq!(
                bundle.discounted_total,
                (bundle.gross_total * BUNDLE_DISCOUNT_FACTOR).round()
            );
        }

        #[test]
        fn prop_custom_total_is_sum_of_singles(
            area in 0.01f64..50_000.0,
            modules in any_modules(),
            lidar in any::<bool>(),
            hyper in any::<bool>(),
        ) {
            let point_cloud = if lidar { PointCloudKind::Lidar } else { PointCloudKind::Low };
            let spectral = if hyper { SpectralKind::Hyper } else { SpectralKind::Multi };
            let model = model();

            let custom = quote_custom(&model, area, &modules, point_cloud, spectral);
            let expected: f64 = Module::ALL
                .into_iter()
                .filter(|module| modules.contains(module))
                .map(|module| quote_single(&model, area, module.service(point_cloud, spectral)))
                .sum();
            prop_assert_eq!(custom.total, expected);
        }
    }
}
