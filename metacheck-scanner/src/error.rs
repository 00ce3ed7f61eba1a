use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sitemap request for {url} returned status {status}")]
    SitemapStatus { url: String, status: u16 },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(
        "sitemap is an index of nested sitemaps, which is not supported; \
         pass one of its child sitemaps instead"
    )]
    SitemapIndex,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
