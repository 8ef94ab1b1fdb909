// Matching a site URL to its registered monitor
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref HTTP_SCHEME: Regex = Regex::new(r"^https?://").unwrap();
}

/// Entry of `GET /Monitor`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Monitor {
    pub monitor_guid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Drop a leading `http://` or `https://`
pub fn strip_scheme(url: &str) -> &str {
    match HTTP_SCHEME.find(url) {
        Some(scheme) => &url[scheme.end()..],
        None => url,
    }
}

/// GUID of the first monitor whose URL contains the scheme-less site URL
pub fn find_monitor_guid<'a>(url: &str, monitors: &'a [Monitor]) -> Option<&'a str> {
    let needle = strip_scheme(url);
    monitors
        .iter()
        .find(|monitor| {
            monitor
                .url
                .as_deref()
                .is_some_and(|monitor_url| monitor_url.contains(needle))
        })
        .map(|monitor| monitor.monitor_guid.as_str())
}
