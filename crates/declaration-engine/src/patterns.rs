//! Constants and regex patterns shared by the detection rules and extractors

use lazy_static::lazy_static;
use regex::Regex;

/// Minimum similarity for an approximate match to count. Scores must be
/// strictly greater than this value.
pub const CONFIDENCE_THRESHOLD: f64 = 0.9;

/// Fallback reference used when no anchor carries the detected phrase
pub const GENERIC_NEEDLE: &str = "Accessibilité";

/// Placeholder href that points nowhere
pub const FRAGMENT_PLACEHOLDER: &str = "#";

/// Elements whose text content is never rendered
pub const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Keyword marking the sentence that states the audited rate ("pour rendre
/// le site accessible à 87%"), matched against the uppercased page
pub const TARGET_KEYWORD: &str = "RENDRE";

/// How far into a saved page a `<meta charset>` is looked for
pub const CHARSET_SNIFF_LIMIT: usize = 1024;

/// Entity and characters standing for a space once the page is uppercased
pub const SPACE_ENTITIES: &[&str] = &["&NBSP;", "\u{a0}", "\u{202f}"];

lazy_static! {
    /// Any markup tag
    pub static ref TAG_PATTERN: Regex = Regex::new(r"<[^>]+>").unwrap();

    /// Opening or closing tag of an element that starts a new line of text
    pub static ref BLOCK_TAG_PATTERN: Regex = Regex::new(
        r"(?i)</?(?:P|LI|DIV|TD|TH|H[1-6]|BR|TR|UL|OL)\b[^>]*>"
    )
    .unwrap();

    /// Charset declared by `<meta charset=..>` or `<meta http-equiv .. content="..; charset=..">`
    pub static ref META_CHARSET: Regex = Regex::new(
        r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?\s*(?P<label>[a-z0-9_:.\-]+)"#
    )
    .unwrap();

    /// A word, one space, then a number with an optional `.`/`,` fraction
    /// and a percent sign. When `RENDRE` opens the clause that the number
    /// closes, the clause is captured as well so it can win the tie-break.
    /// The clause never spans a line break.
    pub static ref PERCENT_PATTERN: Regex = Regex::new(
        r"(?:\b(?P<keyword>RENDRE)\b[^.%\n]*?[^\S\n])?(?P<lead>[A-ZÀÂÄÆÇÉÈÊËÎÏÔÖŒÙÛÜŸ]+) (?P<value>\d+(?:[.,]\d+)? ?%)"
    )
    .unwrap();
}
