use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("valid pattern"));

/// A run of text up to and including a run of terminators, or a trailing
/// run without one.
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]*[.!?]+|[^.!?]+$").expect("valid pattern"));

/// A number (optionally `,`-grouped) followed by a unit word.
/// Groups: 1 = number, 2 = separating whitespace, 3 = unit.
pub static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d{1,3}(?:,\d{3})+|\d+)(\s*)(million|thousand|hundred|km|miles?|meters?|foot|feet|people|residents?|inhabitants?)\b",
    )
    .expect("valid pattern")
});

/// Four-digit tokens in the 1000–2099 range.
pub static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:1\d{3}|20\d{2})\b").expect("valid pattern"));

/// Strip every non-word character and lowercase.
pub fn normalize(token: &str) -> String {
    NON_WORD.replace_all(token, "").to_lowercase()
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split prose into sentences, keeping terminal punctuation.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// First sentence containing `value` (case-insensitive), or an empty string.
pub fn sentence_containing(text: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let needle = value.to_lowercase();
    split_sentences(text)
        .into_iter()
        .find(|s| s.to_lowercase().contains(&needle))
        .unwrap_or_default()
}

/// Case-insensitive whole-word pattern for `value`.
///
/// Word boundaries are only asserted on edges that are word characters, so
/// values such as `U.S.` or `-40` still match where they appear.
pub fn word_pattern(value: &str) -> Option<Regex> {
    let first = value.chars().next()?;
    let last = value.chars().last()?;
    let pattern = format!(
        "(?i){}{}{}",
        if is_word_char(first) { r"\b" } else { "" },
        regex::escape(value),
        if is_word_char(last) { r"\b" } else { "" },
    );
    Regex::new(&pattern)
        .map_err(|e| tracing::warn!(value, "cannot build word pattern: {e}"))
        .ok()
}

pub fn contains_word(text: &str, value: &str) -> bool {
    word_pattern(value).is_some_and(|re| re.is_match(text))
}

/// Carry the capitalization of `occurrence` over to `replacement`.
///
/// A capitalized occurrence capitalizes the replacement's first letter; the
/// rest of the replacement is left as given.
pub fn apply_case_pattern(occurrence: &str, replacement: &str) -> String {
    let starts_upper = occurrence.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace the first whole-word occurrence of `original` in place.
///
/// Returns `(original_as_written, replacement_as_written)`, or `None` when
/// `original` does not occur.
pub fn replace_first_word(
    text: &mut String,
    original: &str,
    replacement: &str,
) -> Option<(String, String)> {
    let re = word_pattern(original)?;
    let (range, found) = {
        let m = re.find(text)?;
        (m.range(), m.as_str().to_string())
    };
    let written = apply_case_pattern(&found, replacement);
    text.replace_range(range, &written);
    Some((found, written))
}

/// Replace every whole-word occurrence of `original` in place, returning how
/// many were replaced.
pub fn replace_all_words(text: &mut String, original: &str, replacement: &str) -> usize {
    let Some(re) = word_pattern(original) else {
        return 0;
    };
    let count = re.find_iter(text).count();
    if count > 0 {
        let replaced = re
            .replace_all(text, |caps: &regex::Captures| apply_case_pattern(&caps[0], replacement))
            .into_owned();
        *text = replaced;
    }
    count
}

/// Parse a number that may carry `,` thousands separators.
pub fn parse_number(token: &str) -> Option<i64> {
    token.replace(',', "").parse().ok()
}

/// Format with `,` thousands separators when the magnitude is at least 1000.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// True when the match starting at `start` continues a decimal or grouped
/// number (e.g. the `5` in `2.5`).
pub fn continues_number(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    matches!(
        (before.next(), before.next()),
        (Some('.' | ','), Some(d)) if d.is_ascii_digit()
    ) || text[..start].chars().next_back().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Largest,"), "largest");
        assert_eq!(normalize("2,165,423"), "2165423");
        assert_eq!(normalize("\"(Paris)\""), "paris");
        assert_eq!(normalize("—"), "");
    }

    #[test]
    fn sentences_keep_punctuation() {
        let s = split_sentences("Paris is big. Is it old?! Yes");
        assert_eq!(s, vec!["Paris is big.", "Is it old?!", "Yes"]);
    }

    #[test]
    fn sentence_lookup_misses_cleanly() {
        assert_eq!(sentence_containing("One. Two.", "three"), "");
        assert_eq!(sentence_containing("One. Two three.", "THREE"), "Two three.");
        assert_eq!(sentence_containing("One.", ""), "");
    }

    #[test]
    fn whole_word_only() {
        assert!(contains_word("the capital city", "capital"));
        assert!(!contains_word("capitalism rose", "capital"));
        assert!(contains_word("the U.S. army", "U.S."));
    }

    #[test]
    fn first_replacement_transfers_case() {
        let mut text = "Capital cities: the capital.".to_string();
        let (found, written) = replace_first_word(&mut text, "capital", "largest").unwrap();
        assert_eq!(found, "Capital");
        assert_eq!(written, "Largest");
        assert_eq!(text, "Largest cities: the capital.");
    }

    #[test]
    fn replace_all_counts_occurrences() {
        let mut text = "North wind, north sea, northern lights".to_string();
        let n = replace_all_words(&mut text, "north", "south");
        assert_eq!(n, 2);
        assert_eq!(text, "South wind, south sea, northern lights");
    }

    #[test]
    fn replace_missing_word_is_noop() {
        let mut text = "nothing here".to_string();
        assert!(replace_first_word(&mut text, "capital", "largest").is_none());
        assert_eq!(replace_all_words(&mut text, "capital", "largest"), 0);
        assert_eq!(text, "nothing here");
    }

    #[test]
    fn thousands_formatting() {
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(2165423), "2,165,423");
        assert_eq!(format_thousands(-12345), "-12,345");
    }

    #[test]
    fn parses_grouped_numbers() {
        assert_eq!(parse_number("2,165,423"), Some(2165423));
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn detects_decimal_continuation() {
        let text = "about 2.5 million";
        assert!(continues_number(text, 8));
        assert!(!continues_number(text, 6));
    }
}
