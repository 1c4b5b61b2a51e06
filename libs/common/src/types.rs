//! Core domain types shared across the scraper, strategy, and CLI crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognized listing site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Zillow,
    Redfin,
}

impl SiteId {
    /// Lowercase key used in logs and journal events.
    pub fn as_str(self) -> &'static str {
        match self {
            SiteId::Zillow => "zillow",
            SiteId::Redfin => "redfin",
        }
    }

    /// Human-readable site name.
    pub fn display_name(self) -> &'static str {
        match self {
            SiteId::Zillow => "Zillow",
            SiteId::Redfin => "Redfin",
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts pulled off a listing page. Every field is optional — a miss is
/// silence, not an error; reconciliation fills the gaps from the price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedFacts {
    pub list_price: Option<f64>,
    pub days_on_market: Option<u32>,
    /// Annual dollars, regardless of how the site displayed the figure.
    pub annual_taxes: Option<f64>,
    /// Annual dollars.
    pub annual_insurance: Option<f64>,
    pub monthly_hoa: Option<f64>,
    /// Site value estimate (e.g. Zestimate), when the site publishes one.
    pub estimate: Option<f64>,
    pub estimate_source: Option<String>,
}

impl ScrapedFacts {
    /// True when no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.list_price.is_none()
            && self.days_on_market.is_none()
            && self.annual_taxes.is_none()
            && self.annual_insurance.is_none()
            && self.monthly_hoa.is_none()
            && self.estimate.is_none()
    }
}

/// The single per-session deal record. Owned by the caller, mutated in
/// place by reconciliation, recommendation, and user edits.
///
/// `annual_taxes` / `annual_insurance` use zero as "not yet known";
/// reconciliation synthesizes estimates from the list price in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealState {
    pub list_price: f64,
    pub days_on_market: u32,
    pub annual_taxes: f64,
    pub annual_insurance: f64,
    pub monthly_hoa: f64,
    pub estimate: Option<f64>,
    pub estimate_source: Option<String>,
    /// Percent of list price offered, [85, 105].
    pub offer_price_percent: f64,
    /// Percent of offer price down, [3, 30].
    pub down_payment_percent: f64,
    /// Annual nominal rate in percent, [2, 10].
    pub interest_rate: f64,
    /// Amortization horizon, one of {15, 20, 25, 30}.
    pub loan_term_years: u32,
    /// Balloon horizon in years, one of {0, 3, 5, 7, 10}; 0 = none.
    pub balloon_years: u32,
}

impl Default for DealState {
    fn default() -> Self {
        Self {
            list_price: 350_000.0,
            days_on_market: 30,
            annual_taxes: 4_200.0,
            annual_insurance: 1_750.0,
            monthly_hoa: 0.0,
            estimate: None,
            estimate_source: None,
            offer_price_percent: 100.0,
            down_payment_percent: 10.0,
            interest_rate: 5.0,
            loan_term_years: 30,
            balloon_years: 5,
        }
    }
}
