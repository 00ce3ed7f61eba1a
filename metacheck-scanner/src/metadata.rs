use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Metadata scraped from a single page.
///
/// `url` is always the URL that was requested, even when the server
/// redirected elsewhere. A failed fetch sets `fetch_error` and leaves the
/// extracted fields empty; it never aborts the surrounding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetadata {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub fetch_error: Option<String>,
}

impl PageMetadata {
    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            title: None,
            description: None,
            canonical: None,
            fetch_error: Some(error),
        }
    }

    pub fn fetch_failed(&self) -> bool {
        self.fetch_error.is_some()
    }
}

/// Fetch a page and extract its metadata.
///
/// Infallible by contract: transport errors, timeouts, and non-2xx
/// responses all come back as a `PageMetadata` carrying `fetch_error`.
pub async fn fetch_metadata(client: &reqwest::Client, url: &str) -> PageMetadata {
    debug!("Fetching page {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Request to {} failed: {}", url, e);
            return PageMetadata::with_error(url.to_string(), e.to_string());
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!("Page {} returned status {}", url, status);
        return PageMetadata::with_error(url.to_string(), format!("HTTP status {}", status.as_u16()));
    }

    match response.text().await {
        Ok(body) => extract_metadata(url, &body),
        Err(e) => {
            warn!("Failed to read body of {}: {}", url, e);
            PageMetadata::with_error(url.to_string(), e.to_string())
        }
    }
}

/// Extract title, meta description, and canonical link from an HTML body.
///
/// The parse is best-effort: malformed HTML is repaired by the parser the
/// way browsers do it, and missing elements just leave fields at `None`.
pub fn extract_metadata(url: &str, html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string());

    // Attribute values are matched case-insensitively; pages disagree on
    // NAME="Description" vs name="description" more often than you'd hope.
    let meta_selector = Selector::parse("meta[name]").unwrap();
    let description = document
        .select(&meta_selector)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string());

    // rel is a space-separated token list, so rel="canonical alternate"
    // still counts.
    let link_selector = Selector::parse("link[rel]").unwrap();
    let canonical = document
        .select(&link_selector)
        .find(|el| {
            el.value().attr("rel").is_some_and(|rel| {
                rel.split_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string);

    PageMetadata {
        url: url.to_string(),
        title,
        description,
        canonical,
        fetch_error: None,
    }
}
