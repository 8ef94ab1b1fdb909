//! Page loading: local files and live URLs parsed into visible text and anchors

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use lazy_static::lazy_static;
use scraper::{Html, Node, Selector};
use tracing::debug;

use crate::error::LoadError;
use crate::patterns::{CHARSET_SNIFF_LIMIT, HIDDEN_ELEMENTS, META_CHARSET};

lazy_static! {
    static ref BODY_SELECTOR: Selector = Selector::parse("body").expect("valid selector");
    static ref ANCHOR_SELECTOR: Selector = Selector::parse("a").expect("valid selector");
}

/// An `<a>` element as seen by the link resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

impl Anchor {
    pub fn new(text: &str, href: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            href: href.map(str::to_string),
        }
    }
}

/// The parts of a page the analysis needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// URL relative links are resolved against; empty for local files
    pub url: String,
    /// Concatenated text nodes of `<body>`, hidden elements excluded
    pub body_text: String,
    /// Every anchor in document order
    pub anchors: Vec<Anchor>,
}

impl PageDocument {
    /// Parse markup. HTML parsing is error-tolerant, so this never fails.
    pub fn parse(html: &str, url: &str) -> Self {
        let document = Html::parse_document(html);

        let body_text = document
            .select(&BODY_SELECTOR)
            .next()
            .map(|body| {
                let mut text = String::new();
                for node in body.descendants() {
                    if let Node::Text(chunk) = node.value() {
                        let hidden = node.ancestors().any(|ancestor| {
                            matches!(ancestor.value(), Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()))
                        });
                        if !hidden {
                            text.push_str(chunk);
                        }
                    }
                }
                text
            })
            .unwrap_or_default();

        let anchors = document
            .select(&ANCHOR_SELECTOR)
            .map(|a| Anchor {
                text: a.text().collect(),
                href: a.value().attr("href").map(str::to_string),
            })
            .collect();

        Self {
            url: url.to_string(),
            body_text,
            anchors,
        }
    }

    /// Load a page from disk. `base_url` is used for link resolution only.
    pub async fn from_file(path: &Path, base_url: Option<&str>) -> Result<Self, LoadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let encoding = sniff_encoding(&bytes);
        let html = decode_markup(&bytes, encoding).ok_or_else(|| {
            LoadError::Malformed(format!(
                "{} is not valid {}",
                path.display(),
                encoding.name()
            ))
        })?;

        debug!(
            path = %path.display(),
            encoding = encoding.name(),
            bytes = html.len(),
            "Loaded local document"
        );
        Ok(Self::parse(&html, base_url.unwrap_or_default()))
    }

    /// Load a page over HTTP as static markup. Client-side rendering is not
    /// executed, so single-page applications come back mostly empty.
    pub async fn from_url(client: &reqwest::Client, url: &str) -> Result<Self, LoadError> {
        let network = |source: reqwest::Error| LoadError::Network {
            url: url.to_string(),
            source,
        };

        let response = client.get(url).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_markup_content_type(content_type) {
                return Err(LoadError::Malformed(format!(
                    "{} served {} instead of markup",
                    url, content_type
                )));
            }
        }

        let html = response.text().await.map_err(network)?;
        debug!(url, bytes = html.len(), "Loaded live document");
        Ok(Self::parse(&html, url))
    }
}

/// Character encoding of saved markup, in the order a browser decides it:
/// byte order mark, then a `<meta charset>` near the top of the file, then
/// UTF-8 if the bytes are valid UTF-8, else windows-1252.
pub fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(CHARSET_SNIFF_LIMIT)]);
    let declared = META_CHARSET
        .captures(&head)
        .and_then(|caps| Encoding::for_label(caps["label"].as_bytes()));
    if let Some(encoding) = declared {
        // a meta tag cannot switch to UTF-16
        return encoding.output_encoding();
    }

    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Decode with `encoding`, or `None` when the bytes are not valid in it
pub fn decode_markup(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (bom_encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((encoding, 0));
    bom_encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(|text| text.into_owned())
}

fn is_markup_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.contains("html") || lower.contains("xml") || lower.starts_with("text/")
}
