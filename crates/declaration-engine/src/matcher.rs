//! Approximate phrase matching
//!
//! Scores how well a reference phrase occurs *somewhere* inside a candidate
//! text. Both strings are normalized first (case, diacritics, symbols and
//! whitespace runs), then the reference is aligned against the best-matching
//! substring of the candidate with a restricted Damerau-Levenshtein distance.
//! The score is `1 - distance / reference_length`, so a verbatim occurrence
//! scores `1.0` no matter how long the surrounding text is.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Similarity of `reference` to its best approximate occurrence in `candidate`
///
/// Always in `0.0..=1.0`. Pure and deterministic.
pub fn score(reference: &str, candidate: &str) -> f64 {
    let term = normalize(reference);
    if term.is_empty() {
        return 1.0;
    }
    let text = normalize(candidate);
    if text.is_empty() {
        return 0.0;
    }

    let distance = substring_distance(&term, &text);
    (1.0 - distance as f64 / term.len() as f64).clamp(0.0, 1.0)
}

/// Lowercase, strip diacritics, drop symbols and collapse whitespace
pub fn normalize(input: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.nfd().flat_map(char::to_lowercase) {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        // ligatures have no canonical decomposition
        match c {
            'œ' => out.extend(['o', 'e']),
            'æ' => out.extend(['a', 'e']),
            other => out.push(other),
        }
    }
    out
}

/// Smallest edit distance between `term` and any substring of `text`
///
/// Column-wise dynamic programming over `text` keeping three columns, so
/// memory stays proportional to the term.
fn substring_distance(term: &[char], text: &[char]) -> usize {
    let m = term.len();

    // Column for the empty text prefix: matching i term chars costs i deletions.
    let mut before_prev: Vec<usize> = (0..=m).collect();
    let mut prev: Vec<usize> = before_prev.clone();
    let mut current: Vec<usize> = vec![0; m + 1];
    let mut best = m;

    for j in 1..=text.len() {
        // A match may start anywhere in the text.
        current[0] = 0;
        for i in 1..=m {
            let cost = usize::from(term[i - 1] != text[j - 1]);
            let mut value = (prev[i - 1] + cost)
                .min(prev[i] + 1)
                .min(current[i - 1] + 1);

            if i > 1 && j > 1 && term[i - 1] == text[j - 2] && term[i - 2] == text[j - 1] {
                value = value.min(before_prev[i - 2] + 1);
            }
            current[i] = value;
        }

        best = best.min(current[m]);
        if best == 0 {
            break;
        }

        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut current);
    }

    best
}
