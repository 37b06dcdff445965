//! Building a page context from a raw URL.

use mimic_core::pattern::PageContext;
use url::Url;

/// Derive the context fingerprint for the page at `raw`. The structure hash
/// is not derivable from a URL; callers add one when they have scanned the
/// page.
pub fn context_from_url(raw: &str, now: u64) -> Result<PageContext, url::ParseError> {
    let parsed = Url::parse(raw)?;
    Ok(PageContext::new(
        parsed.host_str().unwrap_or_default(),
        parsed.path(),
        now,
    ))
}
