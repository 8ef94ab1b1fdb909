// Conformance level detection over a page's visible text
use shared_types::{ConformanceLevel, MatchCandidate};

use crate::matcher;

/// Score every canonical phrase against the page text, in declaration order
pub fn score_levels(text: &str) -> Vec<MatchCandidate> {
    ConformanceLevel::ALL
        .iter()
        .map(|&level| MatchCandidate {
            level,
            score: matcher::score(level.phrase(), text),
        })
        .collect()
}

/// Highest-scoring candidate
///
/// Equal scores resolve to the least compliant level (declaration order),
/// whatever order the candidates arrive in.
pub fn select_best(candidates: &[MatchCandidate]) -> Option<MatchCandidate> {
    candidates.iter().copied().reduce(|best, candidate| {
        if candidate.score > best.score
            || (candidate.score == best.score && candidate.level < best.level)
        {
            candidate
        } else {
            best
        }
    })
}

/// Conformance level the page declares, if one clears `threshold`
pub fn detect_conformance(text: &str, threshold: f64) -> Option<MatchCandidate> {
    select_best(&score_levels(text)).filter(|best| best.score > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::CONFIDENCE_THRESHOLD;

    fn candidate(level: ConformanceLevel, score: f64) -> MatchCandidate {
        MatchCandidate { level, score }
    }

    #[test]
    fn test_detects_each_level_verbatim() {
        for level in ConformanceLevel::ALL {
            let text = format!("Plan du site | {} | Mentions légales", level.phrase());
            let best = detect_conformance(&text, CONFIDENCE_THRESHOLD).unwrap();
            assert_eq!(best.level, level);
            assert!(best.score > 0.9);
        }
    }

    #[test]
    fn test_page_without_statement_yields_nothing() {
        let text = "Bienvenue sur le site de la mairie. Horaires d'ouverture et démarches.";
        assert!(detect_conformance(text, CONFIDENCE_THRESHOLD).is_none());
    }

    #[test]
    fn test_score_must_be_strictly_above_threshold() {
        let text = "Accessibilité : totalement conforme";
        assert!(detect_conformance(text, 1.0).is_none());
        assert!(detect_conformance(text, 0.99).is_some());
    }

    #[test]
    fn test_tolerates_minor_typos() {
        let text = "Accessibilite : partielement conforme";
        let best = detect_conformance(text, CONFIDENCE_THRESHOLD).unwrap();
        assert_eq!(best.level, ConformanceLevel::PartiallyCompliant);
    }

    #[test]
    fn test_tie_prefers_first_declared_level_in_both_orders() {
        let forward = [
            candidate(ConformanceLevel::NonCompliant, 0.95),
            candidate(ConformanceLevel::PartiallyCompliant, 0.95),
        ];
        let reversed = [
            candidate(ConformanceLevel::PartiallyCompliant, 0.95),
            candidate(ConformanceLevel::NonCompliant, 0.95),
        ];
        assert_eq!(select_best(&forward).unwrap().level, ConformanceLevel::NonCompliant);
        assert_eq!(select_best(&reversed).unwrap().level, ConformanceLevel::NonCompliant);
    }

    #[test]
    fn test_tie_between_two_verbatim_phrases_in_a_page() {
        let fully_first = "Accessibilité : totalement conforme. Ancienne mention : Accessibilité : partiellement conforme";
        let partial_first = "Accessibilité : partiellement conforme. Nouvelle mention : Accessibilité : totalement conforme";

        for text in [fully_first, partial_first] {
            let scores = score_levels(text);
            assert_eq!(scores[1].score, scores[2].score);
            let best = detect_conformance(text, CONFIDENCE_THRESHOLD).unwrap();
            assert_eq!(best.level, ConformanceLevel::PartiallyCompliant);
        }
    }

    #[test]
    fn test_higher_score_beats_declaration_order() {
        let candidates = [
            candidate(ConformanceLevel::NonCompliant, 0.5),
            candidate(ConformanceLevel::FullyCompliant, 0.97),
        ];
        assert_eq!(
            select_best(&candidates).unwrap().level,
            ConformanceLevel::FullyCompliant
        );
        assert!(select_best(&[]).is_none());
    }
}
