//! Policy configuration — motivation thresholds, per-tier recommended
//! terms, and the fixed rates behind cost estimation and the commission
//! comparison. All overridable from `config.toml`.

use serde::{Deserialize, Serialize};

/// Days-on-market thresholds separating motivation tiers. A listing
/// must exceed a threshold (strictly) to reach the tier above it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotivationThresholds {
    #[serde(default = "default_moderate_days")]
    pub moderate_days: u32,

    #[serde(default = "default_high_days")]
    pub high_days: u32,

    #[serde(default = "default_very_high_days")]
    pub very_high_days: u32,
}

/// The offer-term bundle recommended for one motivation tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTerms {
    pub offer_price_percent: f64,
    pub down_payment_percent: f64,
    pub interest_rate: f64,
    pub balloon_years: u32,
}

/// Recommended terms per motivation tier. More motivated sellers get a
/// lower price, less down, a lower rate, and a longer balloon runway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsTable {
    #[serde(default = "default_very_high_terms")]
    pub very_high: RecommendedTerms,

    #[serde(default = "default_high_terms")]
    pub high: RecommendedTerms,

    #[serde(default = "default_moderate_terms")]
    pub moderate: RecommendedTerms,

    #[serde(default = "default_low_terms")]
    pub low: RecommendedTerms,
}

/// Fixed rates for the traditional-sale comparison and for estimating
/// carrying costs when the listing didn't yield them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostModel {
    /// Traditional sale commission, as a fraction of list price.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,

    /// Annual property tax estimate, as a fraction of list price.
    #[serde(default = "default_tax_rate")]
    pub tax_estimate_rate: f64,

    /// Annual insurance estimate, as a fraction of list price.
    #[serde(default = "default_insurance_rate")]
    pub insurance_estimate_rate: f64,
}

/// Everything the recommendation and calculation engines need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferPolicy {
    #[serde(default)]
    pub thresholds: MotivationThresholds,

    #[serde(default)]
    pub terms: TermsTable,

    #[serde(default)]
    pub costs: CostModel,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_moderate_days() -> u32 {
    30
}
fn default_high_days() -> u32 {
    60
}
fn default_very_high_days() -> u32 {
    90
}
fn default_commission_rate() -> f64 {
    0.06
}
fn default_tax_rate() -> f64 {
    0.012
}
fn default_insurance_rate() -> f64 {
    0.005
}

fn default_very_high_terms() -> RecommendedTerms {
    RecommendedTerms {
        offer_price_percent: 95.0,
        down_payment_percent: 5.0,
        interest_rate: 4.0,
        balloon_years: 7,
    }
}
fn default_high_terms() -> RecommendedTerms {
    RecommendedTerms {
        offer_price_percent: 97.0,
        down_payment_percent: 7.0,
        interest_rate: 4.5,
        balloon_years: 5,
    }
}
fn default_moderate_terms() -> RecommendedTerms {
    RecommendedTerms {
        offer_price_percent: 100.0,
        down_payment_percent: 8.0,
        interest_rate: 5.0,
        balloon_years: 5,
    }
}
fn default_low_terms() -> RecommendedTerms {
    RecommendedTerms {
        offer_price_percent: 100.0,
        down_payment_percent: 10.0,
        interest_rate: 5.5,
        balloon_years: 5,
    }
}

impl Default for MotivationThresholds {
    fn default() -> Self {
        Self {
            moderate_days: default_moderate_days(),
            high_days: default_high_days(),
            very_high_days: default_very_high_days(),
        }
    }
}

impl Default for TermsTable {
    fn default() -> Self {
        Self {
            very_high: default_very_high_terms(),
            high: default_high_terms(),
            moderate: default_moderate_terms(),
            low: default_low_terms(),
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            commission_rate: default_commission_rate(),
            tax_estimate_rate: default_tax_rate(),
            insurance_estimate_rate: default_insurance_rate(),
        }
    }
}
