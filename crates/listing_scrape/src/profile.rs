//! Per-site extraction rules, expressed as data.
//!
//! Both sites run through one engine (`extract`); everything
//! site-specific — selector lists, regex patterns, plausibility bounds,
//! and how a raw tax/insurance figure becomes an annual dollar amount —
//! lives in a `SiteProfile` value. The unit rules differ per site on
//! purpose: Redfin always displays monthly carrying costs, while Zillow
//! mixes monthly and annual figures and we infer by magnitude.

use common::SiteId;
use regex::Regex;

/// Open interval a candidate value must fall in to be believed.
#[derive(Debug, Clone, Copy)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Anything positive.
    pub const fn positive() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }
}

/// How a matched carrying-cost figure is normalized to annual dollars.
#[derive(Debug, Clone, Copy)]
pub enum UnitRule {
    /// Keep the figure as matched (prices, monthly HOA dues).
    AsIs,
    /// The site always displays the monthly figure.
    MonthlyTimes12,
    /// Figures under the threshold are taken as monthly, others as
    /// already-annual.
    InferMonthlyBelow(f64),
}

impl UnitRule {
    pub fn normalize(&self, value: f64) -> f64 {
        match self {
            UnitRule::AsIs => value,
            UnitRule::MonthlyTimes12 => value * 12.0,
            UnitRule::InferMonthlyBelow(threshold) => {
                if value < *threshold {
                    value * 12.0
                } else {
                    value
                }
            }
        }
    }
}

/// Extraction rules for one currency-valued field: structural selectors
/// first, regex patterns over the page text as fallback, a plausibility
/// filter, and a unit rule.
pub struct FieldRule {
    pub selectors: Vec<&'static str>,
    pub patterns: Vec<Regex>,
    pub bounds: ValueBounds,
    pub unit: UnitRule,
}

/// Rules for a site's own value estimate, when it publishes one.
pub struct EstimateRule {
    pub patterns: Vec<Regex>,
    pub bounds: ValueBounds,
    pub source: &'static str,
}

/// Everything the extraction engine needs to know about one site.
pub struct SiteProfile {
    pub site: SiteId,
    pub price: FieldRule,
    pub days_on_market: Vec<Regex>,
    pub taxes: FieldRule,
    pub hoa: FieldRule,
    pub insurance: FieldRule,
    pub estimate: Option<EstimateRule>,
}

const PRICE_BOUNDS: ValueBounds = ValueBounds::new(50_000.0, 50_000_000.0);

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

impl SiteProfile {
    pub fn for_site(site: SiteId) -> Self {
        match site {
            SiteId::Zillow => Self::zillow(),
            SiteId::Redfin => Self::redfin(),
        }
    }

    pub fn zillow() -> Self {
        Self {
            site: SiteId::Zillow,
            price: FieldRule {
                selectors: vec![
                    r#"[data-testid="price"] span"#,
                    r#"[data-testid="price"]"#,
                    r#".summary-container [data-testid="price"]"#,
                    r#".ds-summary-row span[data-testid="price"]"#,
                    ".price",
                    r#"span[data-test="property-card-price"]"#,
                    "h3.ds-price",
                ],
                // Fallback: any comma-grouped dollar figure in the page text.
                patterns: vec![rx(r"\$\d{1,3}(?:,\d{3})+")],
                bounds: PRICE_BOUNDS,
                unit: UnitRule::AsIs,
            },
            days_on_market: vec![rx(r"(?i)(\d+)\s*days?\s*on\s*zillow")],
            taxes: FieldRule {
                selectors: vec![],
                patterns: vec![
                    rx(r"(?i)property\s*tax[:\s]*\$?([\d,]+)"),
                    rx(r"(?i)tax[:\s]*\$?([\d,]+)\s*/?\s*(?:mo|month)"),
                ],
                bounds: ValueBounds::new(0.0, 10_000.0),
                unit: UnitRule::InferMonthlyBelow(1_000.0),
            },
            hoa: FieldRule {
                selectors: vec![],
                patterns: vec![
                    rx(r"(?i)\$([\d,]+)/mo\s*hoa"),
                    rx(r"(?i)hoa[:\s]*\$([\d,]+)"),
                    rx(r"(?i)hoa[:\s]*([\d,]+)\s*/?\s*(?:mo|month)"),
                ],
                bounds: ValueBounds::new(0.0, 2_000.0),
                unit: UnitRule::AsIs,
            },
            insurance: FieldRule {
                selectors: vec![],
                patterns: vec![rx(r"(?i)insurance[:\s]*\$?([\d,]+)\s*/?\s*(?:mo|month)?")],
                bounds: ValueBounds::new(0.0, 2_000.0),
                unit: UnitRule::MonthlyTimes12,
            },
            estimate: Some(EstimateRule {
                patterns: vec![
                    rx(r"(?i)\$([\d,]+)\s*Zestimate"),
                    rx(r"(?i)Zestimate[®:\s]*\$([\d,]+)"),
                ],
                bounds: PRICE_BOUNDS,
                source: "Zestimate",
            }),
        }
    }

    pub fn redfin() -> Self {
        Self {
            site: SiteId::Redfin,
            price: FieldRule {
                selectors: vec![
                    r#".statsValue [data-rf-test-id="abp-price"]"#,
                    r#"[data-rf-test-id="abp-price"]"#,
                    ".price-section .statsValue",
                    ".HomeInfoV2 .price",
                    ".price",
                ],
                patterns: vec![rx(r"\$([\d,]+)(?:\s|\z)")],
                bounds: PRICE_BOUNDS,
                unit: UnitRule::AsIs,
            },
            days_on_market: vec![
                rx(r"(?i)(\d+)\s*days?\s*on\s*redfin"),
                rx(r"(?i)listed\s*(\d+)\s*days?\s*ago"),
            ],
            // Redfin's cost breakdown is always monthly.
            taxes: FieldRule {
                selectors: vec![],
                patterns: vec![rx(r"(?i)property\s*tax(?:es)?\s*\$?([\d,]+)")],
                bounds: ValueBounds::positive(),
                unit: UnitRule::MonthlyTimes12,
            },
            hoa: FieldRule {
                selectors: vec![],
                patterns: vec![
                    rx(r"(?i)association\s*fee[:\s]*\$\s*([\d,]+)"),
                    rx(r"(?i)hoa\s*dues?\s*\$\s*([\d,]+)"),
                    rx(r"(?i)hoa\s*dues?\s*([\d,]+)"),
                    rx(r"(?i)hoa\s*\$\s*([\d,]+)"),
                    rx(r"(?i)hoa\s*fees?\s*\$?\s*([\d,]+)"),
                ],
                bounds: ValueBounds::new(0.0, 2_000.0),
                unit: UnitRule::AsIs,
            },
            insurance: FieldRule {
                selectors: vec![],
                patterns: vec![rx(r"(?i)(?:home\s*)?insurance\s*\$?([\d,]+)")],
                bounds: ValueBounds::new(0.0, 1_000.0),
                unit: UnitRule::MonthlyTimes12,
            },
            estimate: None,
        }
    }
}
