//! Price tiers and the tier lookup.
//!
//! A tier's limit is an exclusive upper bound in hectares. The first tier
//! whose limit is strictly greater than the area wins, and its rate applies to
//! the whole area. When no tier admits the area the last tier is used.

use serde::{Deserialize, Serialize};

/// One bracket of a rate card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    /// Display label, e.g. `"< 10 ha"`.
    pub label: String,

    /// Exclusive upper bound in hectares. `None` is unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,

    /// Currency units per hectare.
    pub rate: f64,
}

impl PriceTier {
    /// Create a tier with a finite upper bound.
    #[must_use]
    pub fn bounded(label: impl Into<String>, limit: f64, rate: f64) -> Self {
        Self {
            label: label.into(),
            limit: Some(limit),
            rate,
        }
    }

    /// Create a catch-all tier with no upper bound.
    #[must_use]
    pub fn unbounded(label: impl Into<String>, rate: f64) -> Self {
        Self {
            label: label.into(),
            limit: None,
            rate,
        }
    }

    /// Whether `area` falls strictly below this tier's limit.
    #[must_use]
    pub fn admits(&self, area: f64) -> bool {
        self.limit.map_or(true, |limit| area < limit)
    }

    /// Whether this tier has no upper bound.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.limit.is_none()
    }
}

/// Whether an area produces a quote at all.
///
/// Zero, negative and non-finite areas are "no quote".
#[must_use]
pub fn is_quotable(area: f64) -> bool {
    area.is_finite() && area > 0.0
}

/// Index of the tier that prices `area`.
///
/// Returns `None` only for an empty tier list.
#[must_use]
pub fn active_tier_index(area: f64, tiers: &[PriceTier]) -> Option<usize> {
    if tiers.is_empty() {
        return None;
    }
    Some(
        tiers
            .iter()
            .position(|tier| tier.admits(area))
            .unwrap_or(tiers.len() - 1),
    )
}

/// Per-hectare rate applied to `area`.
///
/// Total over its domain: an empty tier list yields 0.
#[must_use]
pub fn rate_for(area: f64, tiers: &[PriceTier]) -> f64 {
    active_tier_index(area, tiers).map_or(0.0, |index| tiers[index].rate)
}

/// Whether the tier at `index` is the one `rate_for` would select.
///
/// Always false for an area that does not produce a quote.
#[must_use]
pub fn is_active_tier(index: usize, tiers: &[PriceTier], area: f64) -> bool {
    is_quotable(area) && active_tier_index(area, tiers) == Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ortho() -> Vec<PriceTier> {
        vec![
            PriceTier::bounded("< 10 ha", 10.0, 60.0),
            PriceTier::bounded("< 15 ha", 15.0, 400.0),
            PriceTier::bounded("< 1000 ha", 1000.0, 120.0),
            PriceTier::unbounded("> 1000 ha", 95.0),
        ]
    }

    #[test]
    fn test_rate_for_first_bracket() {
        assert_eq!(rate_for(5.0, &ortho()), 60.0);
    }

    #[test]
    fn test_rate_for_boundary_is_exclusive() {
        assert_eq!(rate_for(10.0, &ortho()), 400.0);
        assert_eq!(rate_for(15.0, &ortho()), 120.0);
    }

    #[test]
    fn test_rate_for_catch_all() {
        assert_eq!(rate_for(1000.0, &ortho()), 95.0);
        assert_eq!(rate_for(2000.0, &ortho()), 95.0);
    }

    #[test]
    fn test_rate_for_falls_back_to_last_bounded_tier() {
        let tiers = vec![
            PriceTier::bounded("< 10 ha", 10.0, 50.0),
            PriceTier::bounded("< 20 ha", 20.0, 40.0),
        ];
        assert_eq!(rate_for(25.0, &tiers), 40.0);
    }

    #[test]
    fn test_rate_for_empty_tiers() {
        assert_eq!(rate_for(5.0, &[]), 0.0);
        assert_eq!(active_tier_index(5.0, &[]), None);
    }

    #[test]
    fn test_active_tier_index() {
        let tiers = ortho();
        assert_eq!(active_tier_index(0.5, &tiers), Some(0));
        assert_eq!(active_tier_index(12.0, &tiers), Some(1));
        assert_eq!(active_tier_index(999.0, &tiers), Some(2));
        assert_eq!(active_tier_index(5000.0, &tiers), Some(3));
    }

    #[test]
    fn test_is_active_tier() {
        let tiers = ortho();
        assert!(is_active_tier(1, &tiers, 10.0));
        assert!(!is_active_tier(0, &tiers, 10.0));
        assert!(is_active_tier(3, &tiers, 1500.0));
    }

    #[test]
    fn test_is_active_tier_false_for_no_quote() {
        let tiers = ortho();
        for index in 0..tiers.len() {
            assert!(!is_active_tier(index, &tiers, 0.0));
            assert!(!is_active_tier(index, &tiers, -3.0));
            assert!(!is_active_tier(index, &tiers, f64::NAN));
        }
    }

    #[test]
    fn test_is_quotable() {
        assert!(is_quotable(0.1));
        assert!(!is_quotable(0.0));
        assert!(!is_quotable(-1.0));
        assert!(!is_quotable(f64::INFINITY));
        assert!(!is_quotable(f64::NAN));
    }

    #[test]
    fn test_unbounded_tier_serializes_without_limit() {
        let json = serde_json::to_string(&PriceTier::unbounded("> 1000 ha", 95.0)).unwrap();
        assert!(!json.contains("limit"));

        let tier: PriceTier = serde_json::from_str(r#"{"label": "> 1 ha", "rate": 7}"#).unwrap();
        assert!(tier.is_unbounded());
        assert_eq!(tier.rate, 7.0);
    }

    fn sorted_tiers() -> impl Strategy<Value = Vec<PriceTier>> {
        (
            prop::collection::vec((1u32..5_000, 1u32..10_000), 1..6),
            any::<bool>(),
        )
            .prop_map(|(mut raw, catch_all)| {
                raw.sort_by_key(|(limit, _)| *limit);
                let mut tiers: Vec<PriceTier> = raw
                    .into_iter()
                    .map(|(limit, rate)| {
                        PriceTier::bounded(format!("< {limit} ha"), f64::from(limit), f64::from(rate))
                    })
                    .collect();
                if catch_all {
                    tiers.push(PriceTier::unbounded("catch-all", 1.0));
                }
                tiers
            })
    }

    proptest! {
        #[test]
        fn prop_rate_is_first_admitting_tier_or_last(
            tiers in sorted_tiers(),
            area in 0.0f64..10_000.0,
        ) {
            let expected = tiers
                .iter()
                .find(|tier| tier.limit.map_or(true, |limit| limit > area))
                .unwrap_or_else(|| tiers.last().unwrap())
                .rate;
            prop_assert_eq!(rate_for(area, &tiers), expected);
        }

        #[test]
        fn prop_rate_constant_within_bracket(
            tiers in sorted_tiers(),
            a in 0.0f64..10_000.0,
            b in 0.0f64..10_000.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            if active_tier_index(lo, &tiers) == active_tier_index(hi, &tiers) {
                prop_assert_eq!(rate_for(lo, &tiers), rate_for(hi, &tiers));
            }
        }

        #[test]
        fn prop_exactly_one_active_tier(
            tiers in sorted_tiers(),
            area in 0.001f64..10_000.0,
        ) {
            let active = (0..tiers.len())
                .filter(|index| is_active_tier(*index, &tiers, area))
                .count();
            prop_assert_eq!(active, 1);
        }
    }
}
