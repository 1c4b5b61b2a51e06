//! Offer strategy crate.
//!
//! Turns scraped listing facts into a seller-financing offer proposal:
//! reconciles facts into the deal state, classifies seller motivation,
//! computes the amortized offer economics, assesses appraisal risk, and
//! renders the outbound offer message.

pub mod appraisal;
pub mod config;
pub mod message;
pub mod motivation;
pub mod offer;
pub mod state;

pub use appraisal::{assess_appraisal, AppraisalAssessment, AppraisalRisk};
pub use config::{CostModel, MotivationThresholds, OfferPolicy, RecommendedTerms, TermsTable};
pub use message::generate_offer_message;
pub use motivation::{apply_recommended_terms, recommended_terms, Motivation};
pub use offer::{compute_offer, monthly_principal_interest, remaining_balance, OfferSummary};
pub use state::{reconcile, validate};
