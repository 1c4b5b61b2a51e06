//! The extraction engine.
//!
//! One algorithm for every field on every site: try the profile's
//! structural selectors in order, fall back to scanning the page text
//! with the profile's regex patterns, and accept the first candidate
//! that survives the field's plausibility filter. Misses are silent —
//! the field is simply absent from the result.

use common::money::parse_currency;
use common::{ScrapedFacts, SiteId};
use regex::Regex;
use tracing::debug;

use crate::page::ListingPage;
use crate::profile::{FieldRule, SiteProfile, ValueBounds};

/// Extract whatever facts the page yields. Never fails; anything that
/// cannot be found or believed is left out of the result.
pub fn extract(site: SiteId, page: &dyn ListingPage) -> ScrapedFacts {
    extract_with_profile(&SiteProfile::for_site(site), page)
}

pub fn extract_with_profile(profile: &SiteProfile, page: &dyn ListingPage) -> ScrapedFacts {
    let text = page.body_text();
    let mut facts = ScrapedFacts {
        list_price: currency_field(&profile.price, page, text, profile.site, "price"),
        days_on_market: integer_field(&profile.days_on_market, text),
        annual_taxes: currency_field(&profile.taxes, page, text, profile.site, "taxes"),
        annual_insurance: currency_field(&profile.insurance, page, text, profile.site, "insurance"),
        monthly_hoa: currency_field(&profile.hoa, page, text, profile.site, "hoa"),
        estimate: None,
        estimate_source: None,
    };

    if let Some(rule) = &profile.estimate {
        if let Some(value) = first_plausible(&rule.patterns, text, &rule.bounds) {
            debug!("{}: {} {}", profile.site, rule.source, value);
            facts.estimate = Some(value);
            facts.estimate_source = Some(rule.source.to_string());
        }
    }

    if facts.is_empty() {
        debug!("{}: nothing extracted from page", profile.site);
    }
    facts
}

/// Selector list first, regex fallback second. The plausibility bounds
/// apply to the raw matched value; unit normalization happens after.
fn currency_field(
    rule: &FieldRule,
    page: &dyn ListingPage,
    text: &str,
    site: SiteId,
    field: &str,
) -> Option<f64> {
    for selector in &rule.selectors {
        let Some(raw) = page.select_text(selector) else {
            continue;
        };
        match parse_currency(&raw) {
            Some(value) if rule.bounds.contains(value) => {
                debug!("{}: {} from selector {:?}: {}", site, field, selector, value);
                return Some(rule.unit.normalize(value));
            }
            _ => {
                debug!(
                    "{}: {} selector {:?} matched implausible text {:?}",
                    site, field, selector, raw
                );
            }
        }
    }

    let value = first_plausible(&rule.patterns, text, &rule.bounds)?;
    debug!("{}: {} from page text: {}", site, field, value);
    Some(rule.unit.normalize(value))
}

/// First regex candidate (across patterns, in order) whose parsed value
/// falls inside the bounds.
fn first_plausible(patterns: &[Regex], text: &str, bounds: &ValueBounds) -> Option<f64> {
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let matched = caps.get(1).or_else(|| caps.get(0))?;
            if let Some(value) = parse_currency(matched.as_str()) {
                if bounds.contains(value) {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn integer_field(patterns: &[Regex], text: &str) -> Option<u32> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                return Some(value);
            }
        }
    }
    None
}
