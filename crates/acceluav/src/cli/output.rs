//! Plain-text rendering for command output.

use std::fmt::Write as _;

use serde::Serialize;

use crate::catalog::SearchResults;
use crate::config::Config;
use crate::pricing::{is_active_tier, PriceTier, Quote, QuoteRequest};

/// Rupee amount with thousands separators and at most two decimals.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}₹{grouped}"),
        f if f % 10 == 0 => format!("{sign}₹{grouped}.{}", f / 10),
        f => format!("{sign}₹{grouped}.{f:02}"),
    }
}

/// One rate card ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct RateCardView<'a> {
    /// Rate card key, e.g. `point_cloud_lidar`.
    pub key: String,
    /// Heading, e.g. `Point Cloud (lidar)`.
    pub label: String,
    /// The tiers.
    pub tiers: &'a [PriceTier],
    /// Index of the tier that applies to the requested area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
}

impl<'a> RateCardView<'a> {
    /// Build a view, marking the tier for `area` if given.
    #[must_use]
    pub fn new(key: String, label: String, tiers: &'a [PriceTier], area: Option<f64>) -> Self {
        let active =
            area.and_then(|area| (0..tiers.len()).find(|&i| is_active_tier(i, tiers, area)));
        Self {
            key,
            label,
            tiers,
            active,
        }
    }
}

/// Render a quote for the terminal.
#[must_use]
pub fn render_quote(request: &QuoteRequest, quote: &Quote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Area: {} ha", request.area);

    match quote {
        Quote::Single { service, amount } => {
            let _ = writeln!(out, "{}: {}", service.label(), format_amount(*amount));
        }
        Quote::Bundle(bundle) => {
            let _ = writeln!(out, "All-in-one bundle (30% off)");
            for item in &bundle.line_items {
                let _ = writeln!(out, "  {:<24} {}", item.label, format_amount(item.price));
            }
            let _ = writeln!(out, "  {:<24} {}", "Gross", format_amount(bundle.gross_total));
            let _ = writeln!(
                out,
                "  {:<24} {}",
                "Total",
                format_amount(bundle.discounted_total)
            );
        }
        Quote::Custom(custom) => {
            if custom.line_items.is_empty() {
                let _ = writeln!(out, "Custom build: no modules selected");
            } else {
                let _ = writeln!(out, "Custom build");
            }
            for item in &custom.line_items {
                let _ = writeln!(out, "  {:<24} {}", item.label, format_amount(item.price));
            }
            let _ = writeln!(out, "  {:<24} {}", "Total", format_amount(custom.total));
        }
    }
    out
}

/// Render rate cards as tables, marking the active tier with `>`.
#[must_use]
pub fn render_rates(cards: &[RateCardView<'_>]) -> String {
    let mut out = String::new();
    for (n, card) in cards.iter().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} [{}]", card.label, card.key);
        for (i, tier) in card.tiers.iter().enumerate() {
            let marker = if card.active == Some(i) { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {:<12} {}/ha",
                tier.label,
                format_amount(tier.rate)
            );
        }
    }
    out
}

/// Render search hits grouped by collection.
#[must_use]
pub fn render_search(query: &str, results: &SearchResults<'_>) -> String {
    let mut out = String::new();
    if results.is_empty() {
        let _ = writeln!(out, "No results for \"{query}\"");
        return out;
    }

    let _ = writeln!(out, "{} results for \"{query}\"", results.total());
    let mut section = |heading: &str, lines: Vec<String>| {
        if !lines.is_empty() {
            let _ = writeln!(out, "\n{heading}");
            for line in lines {
                let _ = writeln!(out, "  {line}");
            }
        }
    };

    section(
        "Products",
        results
            .products
            .iter()
            .map(|p| format!("{} ({})", p.title, p.category))
            .collect(),
    );
    section(
        "Careers",
        results
            .jobs
            .iter()
            .map(|j| format!("{} - {}", j.title, j.department))
            .collect(),
    );
    section(
        "Leadership",
        results
            .leaders
            .iter()
            .map(|l| format!("{}, {}", l.name, l.role))
            .collect(),
    );
    section(
        "Blog",
        results.blogs.iter().map(|b| b.title.clone()).collect(),
    );
    section(
        "News",
        results
            .news
            .iter()
            .map(|n| format!("{} ({})", n.title, n.date))
            .collect(),
    );
    section(
        "Hackathons",
        results
            .hackathons
            .iter()
            .map(|h| format!("{} @ {}", h.title, h.venue))
            .collect(),
    );
    if results.software {
        section("Software", vec!["RLTM: Rapid Live Tactical Mapping".to_string()]);
    }
    out
}

/// Render the effective configuration.
#[must_use]
pub fn render_config(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Configuration");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out);
    let _ = writeln!(out, "[Server]");
    let _ = writeln!(out, "  Listen:             {}", config.listen_addr());
    let _ = writeln!(
        out,
        "  Public dir:         {}",
        config.server.public_dir.display()
    );
    let _ = writeln!(
        out,
        "  Cache max-age (s):  {}",
        config.server.cache_max_age_secs
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "[Assets]");
    let _ = writeln!(
        out,
        "  API base URL:       {}",
        config.assets.api_base_url.as_deref().unwrap_or("(local)")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "[Pricing]");
    let _ = writeln!(
        out,
        "  Rate card:          {}",
        config
            .pricing
            .rate_card
            .as_ref()
            .map_or_else(|| "(built-in)".to_string(), |p| p.display().to_string())
    );
    out
}
