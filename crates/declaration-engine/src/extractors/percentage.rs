// Conformance rate extraction from the rendered declaration page
use tracing::{debug, warn};

use crate::fetch::RenderedTextFetcher;
use crate::patterns::{
    BLOCK_TAG_PATTERN, PERCENT_PATTERN, SPACE_ENTITIES, TAG_PATTERN, TARGET_KEYWORD,
};

/// Declarations published as PDF are not parsed
pub fn is_pdf(url: &str) -> bool {
    url.to_lowercase().ends_with(".pdf")
}

/// Uppercase, strip tags and turn non-breaking spaces into plain spaces.
/// Block-level tags become line breaks so a clause cannot run from one
/// paragraph or list item into the next; inline tags vanish.
pub fn normalize_markup(html: &str) -> String {
    let upper = html.to_uppercase();
    let lines = BLOCK_TAG_PATTERN.replace_all(&upper, "\n");
    let mut text = TAG_PATTERN.replace_all(&lines, "").into_owned();
    for entity in SPACE_ENTITIES {
        text = text.replace(entity, " ");
    }
    text
}

/// One percentage mention found in normalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentMention {
    /// Word right before the number
    pub lead: String,
    /// Number and percent sign, spaces removed
    pub value: String,
    /// Whether the clause stating it opens with the target keyword
    pub targeted: bool,
}

/// Every non-overlapping percentage mention, in text order
pub fn find_mentions(normalized: &str) -> Vec<PercentMention> {
    PERCENT_PATTERN
        .captures_iter(normalized)
        .map(|caps| {
            let lead = caps["lead"].to_string();
            let targeted = caps.name("keyword").is_some() || lead == TARGET_KEYWORD;
            PercentMention {
                value: caps["value"].replace(' ', ""),
                lead,
                targeted,
            }
        })
        .collect()
}

/// Pick the mention that states the site's conformance rate: the first one
/// by default, or the first one introduced by the target keyword.
pub fn select_mention(mentions: &[PercentMention]) -> Option<&PercentMention> {
    mentions
        .iter()
        .find(|mention| mention.targeted)
        .or_else(|| mentions.first())
}

/// Conformance rate stated in raw declaration markup, e.g. `"87%"`.
/// The decimal separator is kept as written (`.` or `,`).
pub fn extract_percentage(html: &str) -> Option<String> {
    let normalized = normalize_markup(html);
    let mentions = find_mentions(&normalized);
    debug!(count = mentions.len(), "Percentage mentions found");
    select_mention(&mentions).map(|mention| mention.value.clone())
}

/// Fetch the declaration page and extract its conformance rate.
///
/// PDF declarations are skipped. Fetch failures are logged and yield `None`.
pub async fn fetch_percentage(fetcher: &dyn RenderedTextFetcher, url: &str) -> Option<String> {
    if is_pdf(url) {
        debug!(url, "Skipping PDF declaration");
        return None;
    }

    match fetcher.fetch_rendered_text(url).await {
        Ok(html) => extract_percentage(&html),
        Err(e) => {
            warn!(url, kind = e.kind(), "Failed to fetch declaration page: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_detection_ignores_case() {
        assert!(is_pdf("https://example.fr/declaration.pdf"));
        assert!(is_pdf("https://example.fr/DECLARATION.PDF"));
        assert!(!is_pdf("https://example.fr/declaration.pdf.html"));
        assert!(!is_pdf("https://example.fr/accessibilite"));
    }

    #[test]
    fn test_normalize_strips_tags_and_nbsp() {
        assert_eq!(
            normalize_markup("<p>Taux de conformité&nbsp;: <strong>87&nbsp;%</strong></p>"),
            "\nTAUX DE CONFORMITÉ : 87 %\n"
        );
        assert_eq!(normalize_markup("<li>a</li><li>b<br/>c</li>"), "\nA\n\nB\nC\n");
        assert_eq!(normalize_markup("atteint\u{a0}92\u{202f}%"), "ATTEINT 92 %");
    }

    #[test]
    fn test_single_mention_is_used() {
        let html = "<p>Le site est conforme à 75% aux critères du RGAA.</p>";
        assert_eq!(extract_percentage(html), Some("75%".to_string()));
    }

    #[test]
    fn test_decimal_separator_is_preserved() {
        assert_eq!(
            extract_percentage("<p>conforme à 92,5 %</p>"),
            Some("92,5%".to_string())
        );
        assert_eq!(
            extract_percentage("<p>conforme à 92.5%</p>"),
            Some("92.5%".to_string())
        );
    }

    #[test]
    fn test_first_mention_is_default() {
        let html = "<p>conforme à 50%</p><p>Sur les pages testées, 30 critères, soit 60%</p>";
        assert_eq!(extract_percentage(html), Some("50%".to_string()));
    }

    #[test]
    fn test_keyword_clause_overrides_first_mention() {
        let html = "<p>Le site est conforme à 50% des critères.</p>\
                    <p>Des travaux sont menés pour rendre le site accessible à 87% d'ici la fin de l'année.</p>";
        assert_eq!(extract_percentage(html), Some("87%".to_string()));
    }

    #[test]
    fn test_keyword_as_leading_word() {
        let mentions = find_mentions("CONFORME À 40% ... RENDRE 90%");
        assert_eq!(mentions.len(), 2);
        assert!(!mentions[0].targeted);
        assert!(mentions[1].targeted);
        assert_eq!(select_mention(&mentions).unwrap().value, "90%");
    }

    #[test]
    fn test_keyword_clause_does_not_cross_sentences() {
        let html = "<p>Nous voulons rendre service. Le site est conforme à 50%.</p><p>Il reste 20% de critères.</p>";
        assert_eq!(extract_percentage(html), Some("50%".to_string()));
    }

    #[test]
    fn test_keyword_in_another_list_item_does_not_claim_the_rate() {
        let html = "<p>Le site est conforme à 50% des critères</p>\n\
                    <ul> <li>Rendre les formulaires accessibles</li> <li>Taux visé : atteindre 70%</li></ul>";
        let mentions = find_mentions(&normalize_markup(html));
        assert_eq!(mentions.len(), 2);
        assert!(mentions.iter().all(|mention| !mention.targeted));
        assert_eq!(extract_percentage(html), Some("50%".to_string()));
    }

    #[test]
    fn test_inline_markup_inside_a_clause_is_kept_together() {
        let html = "<p>Pour <em>rendre</em> le site accessible à <b>87%</b>.</p><p>conforme à 40%</p>";
        assert_eq!(extract_percentage(html), Some("87%".to_string()));
    }

    #[test]
    fn test_no_mention_yields_none() {
        assert_eq!(extract_percentage("<p>Aucun audit n'a été réalisé.</p>"), None);
        assert_eq!(extract_percentage("<p>100%</p>"), None);
    }
}
