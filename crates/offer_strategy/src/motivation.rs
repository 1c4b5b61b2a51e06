//! Seller-motivation classification and term recommendation.
//!
//! A single discrete variable — the motivation tier — is derived from
//! days on market and drives how aggressive the recommended offer terms
//! are.

use common::DealState;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{MotivationThresholds, OfferPolicy, RecommendedTerms, TermsTable};

/// Seller motivation tier, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Motivation {
    /// Classify days on market against the tier thresholds. Each test
    /// is strictly greater-than, so every non-negative count maps to
    /// exactly one tier.
    pub fn classify(days_on_market: u32, thresholds: &MotivationThresholds) -> Self {
        if days_on_market > thresholds.very_high_days {
            Motivation::VeryHigh
        } else if days_on_market > thresholds.high_days {
            Motivation::High
        } else if days_on_market > thresholds.moderate_days {
            Motivation::Moderate
        } else {
            Motivation::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Motivation::VeryHigh => "Very High",
            Motivation::High => "High",
            Motivation::Moderate => "Moderate",
            Motivation::Low => "Low",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Motivation::VeryHigh => "#e74c3c",
            Motivation::High => "#e67e22",
            Motivation::Moderate => "#f1c40f",
            Motivation::Low => "#888",
        }
    }

    /// Lowercase key used in logs and journal events.
    pub fn as_str(self) -> &'static str {
        match self {
            Motivation::VeryHigh => "very_high",
            Motivation::High => "high",
            Motivation::Moderate => "moderate",
            Motivation::Low => "low",
        }
    }
}

/// The term bundle recommended for a tier.
pub fn recommended_terms(motivation: Motivation, terms: &TermsTable) -> &RecommendedTerms {
    match motivation {
        Motivation::VeryHigh => &terms.very_high,
        Motivation::High => &terms.high,
        Motivation::Moderate => &terms.moderate,
        Motivation::Low => &terms.low,
    }
}

/// Overwrite the four offer-term fields with the bundle for the state's
/// current motivation tier. Runs after reconciliation and after a
/// committed days-on-market edit.
pub fn apply_recommended_terms(state: &mut DealState, policy: &OfferPolicy) {
    let motivation = Motivation::classify(state.days_on_market, &policy.thresholds);
    let terms = recommended_terms(motivation, &policy.terms);

    debug!(
        "days_on_market={} → {} terms: {}% price, {}% down, {}% rate, {}y balloon",
        state.days_on_market,
        motivation.as_str(),
        terms.offer_price_percent,
        terms.down_payment_percent,
        terms.interest_rate,
        terms.balloon_years
    );

    state.offer_price_percent = terms.offer_price_percent;
    state.down_payment_percent = terms.down_payment_percent;
    state.interest_rate = terms.interest_rate;
    state.balloon_years = terms.balloon_years;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> MotivationThresholds {
        MotivationThresholds::default()
    }

    #[test]
    fn test_tier_boundaries() {
        let t = thresholds();
        assert_eq!(Motivation::classify(0, &t), Motivation::Low);
        assert_eq!(Motivation::classify(30, &t), Motivation::Low);
        assert_eq!(Motivation::classify(31, &t), Motivation::Moderate);
        assert_eq!(Motivation::classify(60, &t), Motivation::Moderate);
        assert_eq!(Motivation::classify(61, &t), Motivation::High);
        assert_eq!(Motivation::classify(90, &t), Motivation::High);
        assert_eq!(Motivation::classify(91, &t), Motivation::VeryHigh);
        assert_eq!(Motivation::classify(10_000, &t), Motivation::VeryHigh);
    }

    #[test]
    fn test_tiers_monotonic_in_days() {
        let t = thresholds();
        let mut previous = Motivation::Low;
        for days in 0..200 {
            let tier = Motivation::classify(days, &t);
            assert!(
                tier >= previous,
                "tier dropped from {:?} to {:?} at {} days",
                previous,
                tier,
                days
            );
            previous = tier;
        }
    }

    #[test]
    fn test_very_high_terms_applied() {
        let policy = OfferPolicy::default();
        let mut state = DealState {
            days_on_market: 95,
            ..DealState::default()
        };
        apply_recommended_terms(&mut state, &policy);

        assert_eq!(state.offer_price_percent, 95.0);
        assert_eq!(state.down_payment_percent, 5.0);
        assert_eq!(state.interest_rate, 4.0);
        assert_eq!(state.balloon_years, 7);
    }

    #[test]
    fn test_low_terms_applied() {
        let policy = OfferPolicy::default();
        let mut state = DealState {
            days_on_market: 7,
            // Previously-recommended aggressive terms get overwritten.
            offer_price_percent: 95.0,
            ..DealState::default()
        };
        apply_recommended_terms(&mut state, &policy);

        assert_eq!(state.offer_price_percent, 100.0);
        assert_eq!(state.down_payment_percent, 10.0);
        assert_eq!(state.interest_rate, 5.5);
        assert_eq!(state.balloon_years, 5);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(Motivation::VeryHigh.label(), "Very High");
        assert_eq!(Motivation::VeryHigh.color(), "#e74c3c");
        assert_eq!(Motivation::Low.label(), "Low");
        assert_eq!(Motivation::Low.as_str(), "low");
    }
}
