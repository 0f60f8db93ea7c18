use scraper::{Html, Selector};
use std::collections::HashSet;

/// Hrefs this short (`#`, `/`, `./`) never lead anywhere new.
const MIN_HREF_LEN: usize = 3;

/// Extract the distinct `a[href]` values of a page, in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    let Ok(link_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href")
            && href.chars().count() >= MIN_HREF_LEN
            && seen.insert(href)
        {
            links.push(href.to_string());
        }
    }

    links
}
