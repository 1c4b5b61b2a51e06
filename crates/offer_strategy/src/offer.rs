//! Offer mathematics — annuity payment, amortization balance, and the
//! full offer summary with the traditional-sale comparison.

use common::DealState;
use serde::Serialize;

use crate::config::OfferPolicy;
use crate::motivation::Motivation;

/// Everything the caller renders for one deal. Recomputed from the
/// state on every read; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct OfferSummary {
    pub offer_price: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_pi: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    pub monthly_hoa: f64,
    pub total_piti: f64,
    /// Remaining balance due at the balloon horizon; zero when the
    /// state has no balloon clause.
    pub balloon_payment: f64,
    pub traditional_commission: f64,
    pub traditional_net: f64,
    /// Down payment minus commission. Negative is a valid, displayed
    /// outcome: the down payment doesn't cover the commission.
    pub seller_net_at_close: f64,
    pub motivation: Motivation,
    pub motivation_label: &'static str,
    pub motivation_color: &'static str,
}

/// Monthly principal-and-interest payment for an amortizing loan.
///
/// `annual_rate_pct` is the nominal annual rate in percent (5.0 = 5%).
/// A zero rate degrades to straight-line principal repayment.
pub fn monthly_principal_interest(principal: f64, annual_rate_pct: f64, term_years: u32) -> f64 {
    let months = f64::from(term_years * 12);
    if annual_rate_pct == 0.0 {
        return principal / months;
    }
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powf(months);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Remaining loan balance after `months_elapsed` payments, via the
/// closed-form amortization balance. Clamped at zero so float drift
/// near full payoff can't produce a negative balloon.
pub fn remaining_balance(
    principal: f64,
    annual_rate_pct: f64,
    term_years: u32,
    months_elapsed: u32,
) -> f64 {
    if annual_rate_pct == 0.0 {
        let monthly = principal / f64::from(term_years * 12);
        return (principal - monthly * f64::from(months_elapsed)).max(0.0);
    }
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let payment = monthly_principal_interest(principal, annual_rate_pct, term_years);
    let growth = (1.0 + monthly_rate).powf(f64::from(months_elapsed));
    (principal * growth - payment * ((growth - 1.0) / monthly_rate)).max(0.0)
}

/// Compute the full offer economics for the current state. Pure — the
/// motivation tier is re-derived from days on market, not read back
/// from anywhere.
pub fn compute_offer(state: &DealState, policy: &OfferPolicy) -> OfferSummary {
    let offer_price = state.list_price * (state.offer_price_percent / 100.0);
    let down_payment = offer_price * (state.down_payment_percent / 100.0);
    let loan_amount = offer_price - down_payment;

    let monthly_pi =
        monthly_principal_interest(loan_amount, state.interest_rate, state.loan_term_years);
    let monthly_taxes = state.annual_taxes / 12.0;
    let monthly_insurance = state.annual_insurance / 12.0;
    let monthly_hoa = state.monthly_hoa;
    let total_piti = monthly_pi + monthly_taxes + monthly_insurance + monthly_hoa;

    let balloon_payment = if state.balloon_years > 0 {
        remaining_balance(
            loan_amount,
            state.interest_rate,
            state.loan_term_years,
            state.balloon_years * 12,
        )
    } else {
        0.0
    };

    let traditional_commission = state.list_price * policy.costs.commission_rate;
    let traditional_net = state.list_price - traditional_commission;
    let seller_net_at_close = down_payment - traditional_commission;

    let motivation = Motivation::classify(state.days_on_market, &policy.thresholds);

    OfferSummary {
        offer_price,
        down_payment,
        loan_amount,
        monthly_pi,
        monthly_taxes,
        monthly_insurance,
        monthly_hoa,
        total_piti,
        balloon_payment,
        traditional_commission,
        traditional_net,
        seller_net_at_close,
        motivation,
        motivation_label: motivation.label(),
        motivation_color: motivation.color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DealState {
        DealState::default()
    }

    // ── Payment math ──────────────────────────────────────────────────

    #[test]
    fn test_monthly_pi_reference_case() {
        // $350k list, 100% offer, 10% down, 5%, 30y → $315k loan.
        let pi = monthly_principal_interest(315_000.0, 5.0, 30);
        assert!(
            (pi - 1_690.9).abs() < 0.5,
            "monthly P&I = {pi}, expected ≈ 1690.90"
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pi = monthly_principal_interest(240_000.0, 0.0, 30);
        assert_eq!(pi, 240_000.0 / 360.0);

        // Balance declines linearly and hits exactly zero at term end.
        let half = remaining_balance(240_000.0, 0.0, 30, 180);
        assert_eq!(half, 120_000.0);
        assert_eq!(remaining_balance(240_000.0, 0.0, 30, 360), 0.0);
    }

    #[test]
    fn test_loan_fully_amortizes_at_term_end() {
        for rate in [2.0, 4.5, 5.0, 10.0] {
            let balance = remaining_balance(315_000.0, rate, 30, 360);
            assert!(
                balance.abs() < 1e-4,
                "balance at term end = {balance} for rate {rate}"
            );
        }
    }

    #[test]
    fn test_remaining_balance_never_negative() {
        // Past the term end the closed form drifts negative; the clamp
        // holds it at zero.
        assert_eq!(remaining_balance(100_000.0, 5.0, 15, 200), 0.0);
        assert_eq!(remaining_balance(100_000.0, 0.0, 15, 200), 0.0);
    }

    #[test]
    fn test_balance_decreases_over_time() {
        let early = remaining_balance(315_000.0, 5.0, 30, 12);
        let late = remaining_balance(315_000.0, 5.0, 30, 120);
        assert!(early < 315_000.0);
        assert!(late < early);
    }

    // ── Offer summary ─────────────────────────────────────────────────

    #[test]
    fn test_offer_breakdown_reference_case() {
        let policy = OfferPolicy::default();
        let summary = compute_offer(&state(), &policy);

        assert_eq!(summary.offer_price, 350_000.0);
        assert_eq!(summary.down_payment, 35_000.0);
        assert_eq!(summary.loan_amount, 315_000.0);
        assert!((summary.monthly_pi - 1_690.9).abs() < 0.5);
        assert_eq!(summary.monthly_taxes, 350.0);
        assert!((summary.monthly_insurance - 145.83).abs() < 0.01);
        assert_eq!(summary.monthly_hoa, 0.0);
        let piti = summary.monthly_pi
            + summary.monthly_taxes
            + summary.monthly_insurance
            + summary.monthly_hoa;
        assert_eq!(summary.total_piti, piti);
    }

    #[test]
    fn test_balloon_payment_present_only_with_clause() {
        let policy = OfferPolicy::default();
        let with_balloon = compute_offer(&state(), &policy);
        assert!(with_balloon.balloon_payment > 0.0);
        // 5 years in, most of a 30-year loan is still outstanding.
        assert!(with_balloon.balloon_payment < with_balloon.loan_amount);
        assert!(with_balloon.balloon_payment > with_balloon.loan_amount * 0.8);

        let no_balloon = DealState {
            balloon_years: 0,
            ..state()
        };
        assert_eq!(compute_offer(&no_balloon, &policy).balloon_payment, 0.0);
    }

    #[test]
    fn test_commission_identity() {
        let policy = OfferPolicy::default();
        for price in [350_000.0, 400_000.0, 1_250_000.0] {
            let s = DealState {
                list_price: price,
                ..state()
            };
            let summary = compute_offer(&s, &policy);
            assert_eq!(summary.traditional_net + summary.traditional_commission, price);
        }
    }

    #[test]
    fn test_seller_net_can_be_negative() {
        // 5% down on $350k = $17.5k, commission = $21k.
        let s = DealState {
            down_payment_percent: 5.0,
            ..state()
        };
        let summary = compute_offer(&s, &OfferPolicy::default());
        assert!(summary.seller_net_at_close < 0.0);
        assert!((summary.seller_net_at_close + 3_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_motivation_attached_to_summary() {
        let s = DealState {
            days_on_market: 95,
            ..state()
        };
        let summary = compute_offer(&s, &OfferPolicy::default());
        assert_eq!(summary.motivation, Motivation::VeryHigh);
        assert_eq!(summary.motivation_label, "Very High");
        assert_eq!(summary.motivation_color, "#e74c3c");
    }
}
