//! Page abstraction over captured listing content.
//!
//! The extraction engine needs two views of a page: its full rendered
//! text (for regex scanning) and a CSS-selector lookup (for structural
//! extraction). `HtmlPage` provides both from saved HTML; `TextPage`
//! wraps a plain text capture, where every selector lookup misses and
//! the engine falls through to its regex patterns.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Read-only view of a captured listing page.
pub trait ListingPage {
    /// Full rendered text of the page.
    fn body_text(&self) -> &str;

    /// Text of the first element matching a CSS selector. `None` when
    /// nothing matches or the match has no visible text.
    fn select_text(&self, selector: &str) -> Option<String>;
}

/// A plain-text page capture (e.g. copied page text).
pub struct TextPage {
    text: String,
}

impl TextPage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ListingPage for TextPage {
    fn body_text(&self) -> &str {
        &self.text
    }

    fn select_text(&self, _selector: &str) -> Option<String> {
        None
    }
}

/// A saved HTML page, parsed once up front.
pub struct HtmlPage {
    document: Html,
    text: String,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let text = rendered_text(&document);
        Self { document, text }
    }
}

impl ListingPage for HtmlPage {
    fn body_text(&self) -> &str {
        &self.text
    }

    fn select_text(&self, selector: &str) -> Option<String> {
        let parsed = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                debug!("unparseable selector {:?}: {:?}", selector, e);
                return None;
            }
        };
        let element = self.document.select(&parsed).next()?;
        let text = element.text().collect::<String>();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Approximate the browser's rendered text: all text nodes outside
/// script/style, one line per node.
fn rendered_text(document: &Html) -> String {
    let mut out = String::new();
    push_text(document.root_element(), &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    let tag = element.value().name();
    if tag == "script" || tag == "style" {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(trimmed);
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            push_text(child_element, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><head><style>.x { color: red }</style>
        <script>var price = 1;</script></head>
        <body>
          <span data-testid="price">$350,000</span>
          <div class="stats">21 days on Zillow</div>
          <span class="empty">   </span>
        </body></html>
    "#;

    #[test]
    fn test_select_text_first_match() {
        let page = HtmlPage::parse(SAMPLE);
        assert_eq!(
            page.select_text(r#"[data-testid="price"]"#),
            Some("$350,000".to_string())
        );
        assert_eq!(page.select_text(".missing"), None);
    }

    #[test]
    fn test_select_text_skips_empty_elements() {
        let page = HtmlPage::parse(SAMPLE);
        assert_eq!(page.select_text(".empty"), None);
    }

    #[test]
    fn test_body_text_excludes_script_and_style() {
        let page = HtmlPage::parse(SAMPLE);
        let text = page.body_text();
        assert!(text.contains("$350,000"));
        assert!(text.contains("21 days on Zillow"));
        assert!(!text.contains("var price"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_text_page_never_selects() {
        let page = TextPage::new("$350,000\n21 days on Zillow");
        assert_eq!(page.select_text(".price"), None);
        assert!(page.body_text().contains("$350,000"));
    }
}
