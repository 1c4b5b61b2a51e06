//! Site identification and listing-page gating.
//!
//! The engine only activates on a recognized site AND a listing detail
//! page; search results and browse pages are ignored.

use common::SiteId;

/// Identify the listing site from a hostname. Substring match, so
/// subdomains like `www.zillow.com` are covered.
pub fn identify_site(hostname: &str) -> Option<SiteId> {
    if hostname.contains("zillow.com") {
        Some(SiteId::Zillow)
    } else if hostname.contains("redfin.com") {
        Some(SiteId::Redfin)
    } else {
        None
    }
}

/// Pull the hostname out of a URL, tolerating a missing scheme.
pub fn hostname_of(url: &str) -> &str {
    let rest = url.split("://").nth(1).unwrap_or(url);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// Whether the URL points at a listing detail page.
///
/// Zillow detail URLs contain `/homedetails/` or a `_zpid` suffix;
/// Redfin detail URLs contain a `/home/` segment followed by digits.
pub fn is_listing_page(site: SiteId, url: &str) -> bool {
    match site {
        SiteId::Zillow => url.contains("/homedetails/") || url.contains("_zpid"),
        SiteId::Redfin => has_numeric_home_segment(url),
    }
}

fn has_numeric_home_segment(url: &str) -> bool {
    url.match_indices("/home/").any(|(i, _)| {
        url[i + "/home/".len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}
