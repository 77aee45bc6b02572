use super::text::normalize;
use crate::model::{ErrorKind, ErrorRecord};

/// Characters of the error sentence a raw guess may contain verbatim.
const SENTENCE_PREFIX_CHARS: usize = 20;

/// Outcome of one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// `planted → original` pairs, only present when the guess was correct.
    pub explanation: Option<String>,
    /// Selected tokens matching a planted value.
    pub matched: usize,
    /// Selected tokens matching an original value, plus unrelated extras.
    pub penalized: usize,
}

impl Verdict {
    fn miss(matched: usize, penalized: usize) -> Self {
        Self { correct: false, explanation: None, matched, penalized }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenMatch {
    Planted,
    Original,
    Unrelated,
}

/// Exact, or one contains the other with at most one character of
/// difference in length.
fn fuzzy_eq(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b
        || ((a.contains(b) || b.contains(a))
            && a.chars().count().abs_diff(b.chars().count()) <= 1)
}

/// Normalized forms a selected word may match for one recorded value: the
/// whole value and each of its words. Quantities contribute only their
/// numeric words so the unit alone never counts.
fn terms(value: &str, kind: ErrorKind) -> Vec<String> {
    let mut out = vec![normalize(value)];
    out.extend(
        value
            .split_whitespace()
            .filter(|w| kind != ErrorKind::Quantity || w.chars().any(|c| c.is_ascii_digit()))
            .map(normalize),
    );
    out.retain(|t| !t.is_empty());
    out.dedup();
    out
}

fn classify(token: &str, planted: &[String], original: &[String]) -> TokenMatch {
    if planted.iter().any(|p| p == token) {
        TokenMatch::Planted
    } else if original.iter().any(|o| o == token) {
        TokenMatch::Original
    } else if planted.iter().any(|p| fuzzy_eq(token, p)) {
        TokenMatch::Planted
    } else if original.iter().any(|o| fuzzy_eq(token, o)) {
        TokenMatch::Original
    } else {
        TokenMatch::Unrelated
    }
}

/// `(matched, penalized)` for `tokens` against the given errors.
fn tally<'e>(
    tokens: &[String],
    errors: impl Iterator<Item = &'e ErrorRecord> + Clone,
) -> (usize, usize) {
    let planted: Vec<String> = errors
        .clone()
        .flat_map(|e| terms(&e.planted_value, e.kind))
        .collect();
    let original: Vec<String> = errors
        .flat_map(|e| terms(&e.original_value, e.kind))
        .collect();
    tokens.iter().fold((0, 0), |(hit, miss), t| {
        match classify(t, &planted, &original) {
            TokenMatch::Planted => (hit + 1, miss),
            TokenMatch::Original | TokenMatch::Unrelated => (hit, miss + 1),
        }
    })
}

/// Lenient sentence rule: two long words of the error sentence overlap the
/// selection, or three or more words were selected, or the raw guess quotes
/// the start of the sentence.
fn sentence_rule(record: &ErrorRecord, tokens: &[String], raw_guess: &str) -> bool {
    let overlaps = record
        .sentence
        .split_whitespace()
        .map(normalize)
        .filter(|w| w.chars().count() > 3)
        .filter(|w| tokens.iter().any(|t| w.contains(t.as_str()) || t.contains(w.as_str())))
        .count();
    if overlaps >= 2 || tokens.len() >= 3 {
        return true;
    }
    let prefix: String = record.sentence.chars().take(SENTENCE_PREFIX_CHARS).collect();
    !prefix.is_empty() && raw_guess.contains(&prefix)
}

/// Decide whether the selected words identify the planted error(s).
///
/// Word-level errors need at least one planted hit and no penalized
/// selections. Sentence-level errors use the lenient sentence rule. A single
/// selected word that matches a planted value is always accepted.
pub fn verify<S: AsRef<str>>(selected: &[S], errors: &[ErrorRecord]) -> Verdict {
    let tokens: Vec<String> = selected
        .iter()
        .map(|s| normalize(s.as_ref()))
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() || errors.is_empty() {
        return Verdict::miss(0, 0);
    }

    let (matched, penalized) = tally(&tokens, errors.iter());

    let single_hit = tokens.len() == 1 && {
        let planted: Vec<String> = errors
            .iter()
            .flat_map(|e| terms(&e.planted_value, e.kind))
            .collect();
        planted.iter().any(|p| fuzzy_eq(&tokens[0], p))
    };

    let word_errors = errors.iter().filter(|e| !e.kind.is_sentence_level());
    let word_ok = word_errors.clone().next().is_some() && {
        let (hit, miss) = tally(&tokens, word_errors);
        hit > 0 && miss == 0
    };

    let raw_guess = selected
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    let sentence_ok = errors
        .iter()
        .filter(|e| e.kind.is_sentence_level())
        .any(|e| sentence_rule(e, &tokens, &raw_guess));

    let correct = single_hit || word_ok || sentence_ok;
    tracing::debug!(
        matched,
        penalized,
        single_hit,
        word_ok,
        sentence_ok,
        correct,
        "verified guess"
    );
    if !correct {
        return Verdict::miss(matched, penalized);
    }

    let explanation = errors
        .iter()
        .map(ErrorRecord::explanation)
        .collect::<Vec<_>>()
        .join(", ");
    Verdict { correct, explanation: Some(explanation), matched, penalized }
}
