use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Fallback host matcher for strings `Url` rejects, e.g. scheme-less links.
static RE_HOST_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://)?([^/\s?#]+\.[^/\s?#]+)(?:[/?#]\S*)?$")
        .expect("valid host regex")
});

fn strip_www(host: &str) -> String {
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Host of `raw` without a leading `www.`, or [`UNKNOWN_DOMAIN`].
pub fn to_domain(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(parsed) = Url::parse(trimmed) {
        if let Some(host) = parsed.host_str().filter(|h| !h.is_empty()) {
            return strip_www(host);
        }
    }

    match RE_HOST_FALLBACK
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
    {
        Some(host) => strip_www(&host.as_str().to_lowercase()),
        None => UNKNOWN_DOMAIN.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
