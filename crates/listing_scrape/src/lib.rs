//! Listing scrape crate.
//!
//! Identifies which listing site a page belongs to and pulls structured
//! financial facts (price, days on market, carrying costs, value
//! estimate) out of its markup and rendered text.

pub mod extract;
pub mod page;
pub mod profile;
pub mod site;

pub use extract::extract;
pub use page::{HtmlPage, ListingPage, TextPage};
pub use profile::SiteProfile;
pub use site::{identify_site, is_listing_page};
