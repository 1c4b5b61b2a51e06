//! Offer message rendering.
//!
//! This text is the system's primary deliverable — it gets copied
//! verbatim into outbound correspondence, so wording and field order
//! are fixed.

use common::money::{format_currency, format_monthly};
use common::DealState;

use crate::offer::OfferSummary;

pub fn generate_offer_message(state: &DealState, summary: &OfferSummary) -> String {
    let balloon_text = if state.balloon_years > 0 {
        format!("with a balloon payment due in {} years", state.balloon_years)
    } else {
        "with no balloon payment".to_string()
    };

    format!(
        "Hi there,\n\
         \n\
         I'm interested in the property listed at {list_price} and wanted to reach out about a potential seller financing arrangement.\n\
         \n\
         Here's what I had in mind:\n\
         \n\
         - Purchase Price: {offer_price}\n\
         - Down Payment: {down_payment} ({down_percent}%)\n\
         - Interest Rate: {rate}%\n\
         - Loan Term: {term} years {balloon_text}\n\
         - Monthly P&I: {monthly_pi}\n\
         \n\
         The down payment would cover the typical commission costs, so the seller wouldn't have those out-of-pocket expenses at closing. Plus, they'd receive steady monthly income at {rate}% interest, which is a nice return in today's environment.\n\
         \n\
         I'm flexible on terms and happy to discuss what works best for the seller. Would they be open to exploring this option?\n\
         \n\
         Thanks!",
        list_price = format_currency(state.list_price),
        offer_price = format_currency(summary.offer_price),
        down_payment = format_currency(summary.down_payment),
        down_percent = state.down_payment_percent,
        rate = state.interest_rate,
        term = state.loan_term_years,
        balloon_text = balloon_text,
        monthly_pi = format_monthly(summary.monthly_pi),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OfferPolicy;
    use crate::offer::compute_offer;

    fn render(state: &DealState) -> String {
        let summary = compute_offer(state, &OfferPolicy::default());
        generate_offer_message(state, &summary)
    }

    #[test]
    fn test_message_fields_and_order() {
        let message = render(&DealState::default());

        assert!(message.starts_with("Hi there,\n"));
        assert!(message.contains("property listed at $350,000"));
        assert!(message.contains("- Purchase Price: $350,000\n"));
        assert!(message.contains("- Down Payment: $35,000 (10%)\n"));
        assert!(message.contains("- Interest Rate: 5%\n"));
        assert!(message
            .contains("- Loan Term: 30 years with a balloon payment due in 5 years\n"));
        assert!(message.contains("- Monthly P&I: $1,690.99\n"));
        assert!(message.ends_with("Thanks!"));

        // Bullets appear in the fixed order.
        let purchase = message.find("- Purchase Price").unwrap();
        let down = message.find("- Down Payment").unwrap();
        let rate = message.find("- Interest Rate").unwrap();
        let term = message.find("- Loan Term").unwrap();
        let pi = message.find("- Monthly P&I").unwrap();
        assert!(purchase < down && down < rate && rate < term && term < pi);
    }

    #[test]
    fn test_no_balloon_sentence() {
        let state = DealState {
            balloon_years: 0,
            ..DealState::default()
        };
        let message = render(&state);
        assert!(message.contains("- Loan Term: 30 years with no balloon payment\n"));
        assert!(!message.contains("balloon payment due"));
    }

    #[test]
    fn test_fractional_rate_renders_bare() {
        let state = DealState {
            interest_rate: 4.5,
            ..DealState::default()
        };
        let message = render(&state);
        assert!(message.contains("- Interest Rate: 4.5%\n"));
        assert!(message.contains("at 4.5% interest"));
    }
}
