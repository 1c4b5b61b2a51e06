//! Appraisal risk — how likely a lender's valuation falls short of the
//! contract price, judged from the gap between list price and the
//! site's own value estimate. Independent of the rest of the pipeline.

use serde::Serialize;

/// Appraisal risk tier, descending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppraisalRisk {
    High,
    Moderate,
    Low,
    None,
}

impl AppraisalRisk {
    /// One-line advisory shown alongside the assessment.
    pub fn note(self) -> &'static str {
        match self {
            AppraisalRisk::High => {
                "Properties listed >20% above estimate often fail to appraise at contract price."
            }
            AppraisalRisk::Moderate => {
                "This property may face appraisal challenges. Consider negotiating."
            }
            AppraisalRisk::Low => "Slight premium over estimate, but should appraise.",
            AppraisalRisk::None => "Listed at or below estimate - appraisal should not be an issue.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppraisalAssessment {
    pub risk: AppraisalRisk,
    pub status: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub estimate: f64,
    pub list_price: f64,
    /// `list_price - estimate`, dollars.
    pub difference: f64,
    /// Difference as a percent of the estimate. Unrounded; one-decimal
    /// rounding is a rendering concern.
    pub percent_diff: f64,
}

/// Assess appraisal risk. Returns `None` when no usable estimate
/// exists — the caller simply omits the assessment from its display.
///
/// Tier edges are exclusive at the top: a listing priced exactly 20%
/// over the estimate is Moderate, not High. At or below the estimate
/// the risk is `None`-tier ("Should Appraise").
pub fn assess_appraisal(list_price: f64, estimate: Option<f64>) -> Option<AppraisalAssessment> {
    let estimate = estimate?;
    if estimate <= 0.0 || list_price <= 0.0 {
        return None;
    }

    let difference = list_price - estimate;
    let percent_diff = difference / estimate * 100.0;

    let (risk, status, color, icon) = if percent_diff > 20.0 {
        (AppraisalRisk::High, "Unlikely to Appraise", "#e74c3c", "⚠️")
    } else if percent_diff > 10.0 {
        (AppraisalRisk::Moderate, "May Have Issues", "#e67e22", "⚡")
    } else if percent_diff > 0.0 {
        (AppraisalRisk::Low, "Likely to Appraise", "#f1c40f", "✓")
    } else {
        (AppraisalRisk::None, "Should Appraise", "#27ae60", "✓")
    };

    Some(AppraisalAssessment {
        risk,
        status,
        color,
        icon,
        estimate,
        list_price,
        difference,
        percent_diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_estimate_no_assessment() {
        assert!(assess_appraisal(400_000.0, None).is_none());
        assert!(assess_appraisal(400_000.0, Some(0.0)).is_none());
        assert!(assess_appraisal(0.0, Some(320_000.0)).is_none());
    }

    #[test]
    fn test_high_risk_reference_case() {
        // $400k list vs $320k estimate → priced 25% over.
        let a = assess_appraisal(400_000.0, Some(320_000.0)).unwrap();
        assert_eq!(a.risk, AppraisalRisk::High);
        assert_eq!(a.status, "Unlikely to Appraise");
        assert_eq!(a.color, "#e74c3c");
        assert_eq!(a.difference, 80_000.0);
        assert!((a.percent_diff - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_tier_edges_exclusive_at_top() {
        // Exactly +20% → Moderate, exactly +10% → Low, exactly 0% → None.
        let at_20 = assess_appraisal(360_000.0, Some(300_000.0)).unwrap();
        assert_eq!(at_20.risk, AppraisalRisk::Moderate);

        let at_10 = assess_appraisal(330_000.0, Some(300_000.0)).unwrap();
        assert_eq!(at_10.risk, AppraisalRisk::Low);

        let at_0 = assess_appraisal(300_000.0, Some(300_000.0)).unwrap();
        assert_eq!(at_0.risk, AppraisalRisk::None);
        assert_eq!(at_0.status, "Should Appraise");
    }

    #[test]
    fn test_priced_under_estimate_is_no_risk() {
        let a = assess_appraisal(280_000.0, Some(300_000.0)).unwrap();
        assert_eq!(a.risk, AppraisalRisk::None);
        assert_eq!(a.color, "#27ae60");
        assert!(a.difference < 0.0);
        assert!(a.percent_diff < 0.0);
    }

    #[test]
    fn test_notes_per_tier() {
        assert!(AppraisalRisk::High.note().contains(">20%"));
        assert!(AppraisalRisk::Moderate.note().contains("negotiating"));
        assert!(AppraisalRisk::None.note().contains("at or below estimate"));
    }

    #[test]
    fn test_moderate_and_low_bands() {
        let moderate = assess_appraisal(345_000.0, Some(300_000.0)).unwrap();
        assert_eq!(moderate.risk, AppraisalRisk::Moderate);
        assert_eq!(moderate.status, "May Have Issues");

        let low = assess_appraisal(315_000.0, Some(300_000.0)).unwrap();
        assert_eq!(low.risk, AppraisalRisk::Low);
        assert_eq!(low.status, "Likely to Appraise");
    }
}
