//! Deal-state reconciliation and boundary validation.

use common::{DealState, Error, Result, ScrapedFacts};
use tracing::debug;

use crate::config::CostModel;

/// Merge freshly scraped facts into the state. Present fields
/// overwrite, absent fields leave prior values untouched; missing
/// carrying costs are then estimated from the list price so the PITI
/// breakdown is always computable. Safe to call repeatedly with the
/// same facts.
pub fn reconcile(state: &mut DealState, facts: &ScrapedFacts, costs: &CostModel) {
    if let Some(price) = facts.list_price {
        state.list_price = price;
    }
    if let Some(days) = facts.days_on_market {
        state.days_on_market = days;
    }
    if let Some(taxes) = facts.annual_taxes {
        state.annual_taxes = taxes;
    }
    if let Some(insurance) = facts.annual_insurance {
        state.annual_insurance = insurance;
    }
    if let Some(hoa) = facts.monthly_hoa {
        state.monthly_hoa = hoa;
    }
    if let Some(estimate) = facts.estimate {
        state.estimate = Some(estimate);
        state.estimate_source = facts.estimate_source.clone();
    }

    estimate_missing_costs(state, costs);
}

/// Fill still-unknown (zero) cost fields from the price-based model
/// rates, rounded to whole dollars.
pub fn estimate_missing_costs(state: &mut DealState, costs: &CostModel) {
    if state.list_price <= 0.0 {
        return;
    }
    if state.annual_taxes == 0.0 {
        state.annual_taxes = (state.list_price * costs.tax_estimate_rate).round();
        debug!("estimated annual taxes: {}", state.annual_taxes);
    }
    if state.annual_insurance == 0.0 {
        state.annual_insurance = (state.list_price * costs.insurance_estimate_rate).round();
        debug!("estimated annual insurance: {}", state.annual_insurance);
    }
}

/// Check the documented field ranges. Callers validate user-supplied
/// edits before they reach the state; a violation here is a programming
/// error, not a data-quality miss.
pub fn validate(state: &DealState) -> Result<()> {
    if !(state.list_price.is_finite() && state.list_price > 0.0) {
        return Err(Error::InvalidState(format!(
            "list price must be positive, got {}",
            state.list_price
        )));
    }
    for (name, value) in [
        ("annual taxes", state.annual_taxes),
        ("annual insurance", state.annual_insurance),
        ("monthly HOA", state.monthly_hoa),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(Error::InvalidState(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
    }
    if !(85.0..=105.0).contains(&state.offer_price_percent) {
        return Err(Error::InvalidState(format!(
            "offer price percent must be in [85, 105], got {}",
            state.offer_price_percent
        )));
    }
    if !(3.0..=30.0).contains(&state.down_payment_percent) {
        return Err(Error::InvalidState(format!(
            "down payment percent must be in [3, 30], got {}",
            state.down_payment_percent
        )));
    }
    if !(2.0..=10.0).contains(&state.interest_rate) || (state.interest_rate * 4.0).fract() != 0.0 {
        return Err(Error::InvalidState(format!(
            "interest rate must be in [2, 10] in 0.25 steps, got {}",
            state.interest_rate
        )));
    }
    if ![15, 20, 25, 30].contains(&state.loan_term_years) {
        return Err(Error::InvalidState(format!(
            "loan term must be one of 15/20/25/30 years, got {}",
            state.loan_term_years
        )));
    }
    if ![0, 3, 5, 7, 10].contains(&state.balloon_years) {
        return Err(Error::InvalidState(format!(
            "balloon horizon must be one of 0/3/5/7/10 years, got {}",
            state.balloon_years
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs() -> CostModel {
        CostModel::default()
    }

    #[test]
    fn test_present_fields_overwrite() {
        let mut state = DealState::default();
        let facts = ScrapedFacts {
            list_price: Some(500_000.0),
            days_on_market: Some(75),
            annual_taxes: Some(6_000.0),
            monthly_hoa: Some(150.0),
            ..ScrapedFacts::default()
        };
        reconcile(&mut state, &facts, &costs());

        assert_eq!(state.list_price, 500_000.0);
        assert_eq!(state.days_on_market, 75);
        assert_eq!(state.annual_taxes, 6_000.0);
        assert_eq!(state.monthly_hoa, 150.0);
        // Absent field keeps its prior value.
        assert_eq!(state.annual_insurance, 1_750.0);
        // Offer terms are not reconciliation's business.
        assert_eq!(state.offer_price_percent, 100.0);
    }

    #[test]
    fn test_missing_costs_estimated_from_price() {
        let mut state = DealState {
            annual_taxes: 0.0,
            annual_insurance: 0.0,
            ..DealState::default()
        };
        let facts = ScrapedFacts {
            list_price: Some(300_000.0),
            ..ScrapedFacts::default()
        };
        reconcile(&mut state, &facts, &costs());

        // 1.2% and 0.5% of price.
        assert_eq!(state.annual_taxes, 3_600.0);
        assert_eq!(state.annual_insurance, 1_500.0);
    }

    #[test]
    fn test_scraped_costs_not_overwritten_by_estimates() {
        let mut state = DealState::default();
        let facts = ScrapedFacts {
            list_price: Some(300_000.0),
            annual_taxes: Some(4_944.0),
            ..ScrapedFacts::default()
        };
        reconcile(&mut state, &facts, &costs());
        assert_eq!(state.annual_taxes, 4_944.0);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let facts = ScrapedFacts {
            list_price: Some(425_000.0),
            days_on_market: Some(40),
            monthly_hoa: Some(95.0),
            estimate: Some(410_000.0),
            estimate_source: Some("Zestimate".into()),
            ..ScrapedFacts::default()
        };

        let mut once = DealState {
            annual_taxes: 0.0,
            annual_insurance: 0.0,
            ..DealState::default()
        };
        reconcile(&mut once, &facts, &costs());

        let mut twice = once.clone();
        reconcile(&mut twice, &facts, &costs());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_estimate_carried_with_source() {
        let mut state = DealState::default();
        let facts = ScrapedFacts {
            estimate: Some(380_800.0),
            estimate_source: Some("Zestimate".into()),
            ..ScrapedFacts::default()
        };
        reconcile(&mut state, &facts, &costs());
        assert_eq!(state.estimate, Some(380_800.0));
        assert_eq!(state.estimate_source.as_deref(), Some("Zestimate"));
    }

    #[test]
    fn test_validate_accepts_defaults_and_rejects_range_violations() {
        assert!(validate(&DealState::default()).is_ok());

        let too_low_offer = DealState {
            offer_price_percent: 80.0,
            ..DealState::default()
        };
        assert!(validate(&too_low_offer).is_err());

        let off_step_rate = DealState {
            interest_rate: 5.3,
            ..DealState::default()
        };
        assert!(validate(&off_step_rate).is_err());

        let odd_term = DealState {
            loan_term_years: 17,
            ..DealState::default()
        };
        assert!(validate(&odd_term).is_err());

        let odd_balloon = DealState {
            balloon_years: 4,
            ..DealState::default()
        };
        assert!(validate(&odd_balloon).is_err());
    }
}
