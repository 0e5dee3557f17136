//! The marketplace listings source: search URL construction and the layered
//! extraction chain. Network handling and the synthetic fallback decision
//! live in the gateway itself.

use super::{mapping, parser, ProfileQuery};
use crate::domain::CandidateRecord;

/// A page yielding fewer extracted listings than this is treated the same as
/// a failed fetch.
pub(super) const MIN_USABLE_RESULTS: usize = 3;

/// Search ceiling margin over the buyer's budget: listed prices are openers,
/// not final prices.
const BUDGET_MARGIN_PERCENT: u32 = 130;

type ExtractionLayer = fn(&str) -> Option<Vec<CandidateRecord>>;

/// Tried in order until one layer yields a usable result count. Adding or
/// removing a layer is a one-line change here.
const EXTRACTION_LAYERS: &[ExtractionLayer] =
    &[parser::extract_structured, parser::extract_heuristic];

pub(super) fn build_search_url(base: &str, query: &ProfileQuery) -> String {
    // Multiply before dividing so budgets below a round hundred keep their
    // full value in the ceiling. Widen to u64 to survive the margin factor.
    let price_ceiling = u64::from(query.budget) * u64::from(BUDGET_MARGIN_PERCENT) / 100;
    let price_ceiling = u32::try_from(price_ceiling).unwrap_or(u32::MAX);
    let mut url = format!("{base}?price_max={price_ceiling}");

    if query.min_power_kw > 0 {
        url.push_str(&format!("&power_min_kw={}", query.min_power_kw));
    }
    if let Some(category) = query
        .segments
        .iter()
        .find_map(|segment| mapping::classifieds_category(*segment))
    {
        url.push_str(&format!("&category={category}"));
    }
    url
}

pub(super) fn extract_listings(body: &str) -> Option<Vec<CandidateRecord>> {
    for layer in EXTRACTION_LAYERS {
        if let Some(records) = layer(body) {
            if records.len() >= MIN_USABLE_RESULTS {
                return Some(records);
            }
        }
    }
    None
}
