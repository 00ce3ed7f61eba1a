use crate::metadata::PageMetadata;
use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome of comparing a page's canonical URL against its own URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Canonical host equals the source host.
    Matched,
    /// Canonical present but pointing at a different host.
    NotMatched,
    /// Page declared no canonical URL (includes failed fetches).
    NoCanonical,
}

impl MatchResult {
    pub fn is_matched(self) -> bool {
        matches!(self, MatchResult::Matched)
    }
}

/// Compare the canonical URL's host against the source URL's host.
///
/// Pure function, no I/O. Relative canonicals are resolved against the
/// source URL first, so `/blog-page` on `https://testsite.com/blog-page`
/// counts as a match. Only hosts are compared; scheme, port, path, query,
/// and fragment are ignored. Anything unparseable is a mismatch.
pub fn check_canonical(metadata: &PageMetadata) -> MatchResult {
    let Some(canonical) = metadata.canonical.as_deref() else {
        return MatchResult::NoCanonical;
    };

    let Ok(source) = Url::parse(&metadata.url) else {
        return MatchResult::NotMatched;
    };
    let Ok(resolved) = source.join(canonical) else {
        return MatchResult::NotMatched;
    };

    match (source.host_str(), resolved.host_str()) {
        (Some(source_host), Some(canonical_host))
            if source_host.eq_ignore_ascii_case(canonical_host) =>
        {
            MatchResult::Matched
        }
        _ => MatchResult::NotMatched,
    }
}
