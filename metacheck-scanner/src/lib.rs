pub mod domain;
pub mod error;
pub mod metadata;
pub mod report;
pub mod sitemap;

pub use domain::{MatchResult, check_canonical};
pub use error::ScanError;
pub use metadata::PageMetadata;
pub use report::ReportWriter;

use std::time::Duration;

/// User-Agent sent on every outbound request.
pub const USER_AGENT: &str = "Metacheck/0.1 (https://github.com/trapdoorsec/metacheck)";

/// Build the HTTP client shared by the sitemap and page fetchers.
///
/// One client per run: fixed User-Agent, bounded timeouts, and standard
/// redirect following. Redirects are transparent to callers; the original
/// request URL is what gets reported, never the post-redirect one.
pub fn build_client(timeout: Duration) -> error::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout / 2)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;
    Ok(client)
}
