// Locating the declaration link among a page's anchors
use shared_types::DeclarationLink;
use url::Url;

use crate::document::Anchor;
use crate::matcher;
use crate::patterns::FRAGMENT_PLACEHOLDER;

/// Find the declaration link for a detected phrase.
///
/// Anchors matching `phrase` are tried first; if none of them yields a URL,
/// anchors matching `generic_needle` are tried. The generic pass only
/// replaces the first result when it matched at least one anchor, so an
/// explicit "no target" from the first pass survives an empty second pass.
pub fn find_declaration_link(
    anchors: &[Anchor],
    phrase: &str,
    generic_needle: &str,
    page_url: &str,
    threshold: f64,
) -> DeclarationLink {
    let specific = scan_anchors(anchors, phrase, page_url, threshold);
    if specific.as_url().is_some() {
        return specific;
    }

    match scan_anchors(anchors, generic_needle, page_url, threshold) {
        DeclarationLink::NotFound => specific,
        generic => generic,
    }
}

/// Resolve the target of every anchor whose text matches `needle`.
///
/// Each match overwrites the previous one, so the last matching anchor in
/// document order wins regardless of how well earlier anchors scored.
pub fn scan_anchors(
    anchors: &[Anchor],
    needle: &str,
    page_url: &str,
    threshold: f64,
) -> DeclarationLink {
    anchors
        .iter()
        .filter(|anchor| matcher::score(needle, &anchor.text) > threshold)
        .fold(DeclarationLink::NotFound, |_, anchor| {
            resolve_link(anchor.href.as_deref(), page_url)
        })
}

/// Turn a raw `href` into an absolute URL relative to `page_url`
///
/// - missing or `#`: [`DeclarationLink::Missing`]
/// - `http(s)://…`: kept verbatim
/// - `//host/path`: given the scheme of `page_url`
/// - `/path`: appended to the origin of `page_url`
/// - anything else: appended to `page_url` after a `/`
///
/// An empty `page_url` (local file without a base) leaves relative links
/// unchanged.
pub fn resolve_link(href: Option<&str>, page_url: &str) -> DeclarationLink {
    let link = match href.map(str::trim) {
        None => return DeclarationLink::Missing,
        Some(link) if link.is_empty() || link == FRAGMENT_PLACEHOLDER => {
            return DeclarationLink::Missing
        }
        Some(link) => link,
    };

    if has_http_scheme(link) {
        return DeclarationLink::Url(link.to_string());
    }

    let page_url = page_url.trim();
    if page_url.is_empty() {
        return DeclarationLink::Url(link.to_string());
    }

    let resolved = if link.starts_with("//") {
        format!("{}:{}", scheme_of(page_url), link)
    } else if link.starts_with('/') {
        format!("{}{}", origin_of(page_url), link)
    } else {
        format!("{}/{}", page_url.trim_end_matches('/'), link)
    };
    DeclarationLink::Url(resolved)
}

fn has_http_scheme(link: &str) -> bool {
    let lower = link.get(..8).unwrap_or(link).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Scheme of the page, `https` when it cannot be parsed
fn scheme_of(page_url: &str) -> String {
    Url::parse(page_url)
        .map(|url| url.scheme().to_string())
        .unwrap_or_else(|_| "https".to_string())
}

/// `scheme://host[:port]` of a URL. Unparsable or opaque URLs fall back to
/// the raw string without its trailing slash.
fn origin_of(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(url) if url.origin().is_tuple() => url.origin().ascii_serialization(),
        _ => page_url.trim_end_matches('/').to_string(),
    }
}
