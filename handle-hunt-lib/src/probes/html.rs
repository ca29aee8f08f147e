//! Text extraction for page-scrape probes.

use scraper::{Html, Selector};

/// Concatenated text content of the document's `<body>`.
///
/// Script and style contents are included: the markers scrape probes look
/// for live in JSON embedded in `<script>` tags. Text is joined without
/// separators or whitespace normalization, so substrings spanning element
/// boundaries still match.
pub fn extract_body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    // html5ever always synthesizes a body, so this only fails on a bad selector
    match Selector::parse("body") {
        Ok(selector) => document
            .select(&selector)
            .flat_map(|body| body.text())
            .collect(),
        Err(_) => document.root_element().text().collect(),
    }
}
