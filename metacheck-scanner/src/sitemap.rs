use crate::error::{Result, ScanError};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info};

/// Fetch a sitemap document and return the page URLs it lists.
///
/// Fails on transport errors, non-2xx responses, and malformed XML.
/// URLs come back in document order and duplicates are preserved;
/// truncation to the requested page count is the caller's job.
pub async fn fetch_sitemap(client: &reqwest::Client, sitemap_url: &str) -> Result<Vec<String>> {
    debug!("Fetching sitemap {}", sitemap_url);

    let response = client.get(sitemap_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScanError::SitemapStatus {
            url: sitemap_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let urls = parse_sitemap(&body)?;
    info!("Sitemap {} lists {} URLs", sitemap_url, urls.len());
    Ok(urls)
}

/// Parse sitemap XML and extract the text of every `<url><loc>` entry.
///
/// Matching is done on local element names, so documents with the standard
/// sitemap namespace, a prefixed namespace, or no namespace at all are all
/// handled the same way. A `<sitemapindex>` root is rejected explicitly
/// rather than yielding an empty list.
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut in_url = false;
    let mut in_loc = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sitemapindex" => return Err(ScanError::SitemapIndex),
                b"url" => in_url = true,
                b"loc" if in_url => in_loc = true,
                _ => {}
            },
            Event::Text(t) if in_loc => {
                let loc = t.unescape()?.trim().to_string();
                if !loc.is_empty() {
                    urls.push(loc);
                }
            }
            Event::CData(t) if in_loc => {
                let loc = String::from_utf8_lossy(&t.into_inner())
                    .trim()
                    .to_string();
                if !loc.is_empty() {
                    urls.push(loc);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"url" => in_url = false,
                b"loc" => in_loc = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(urls)
}
