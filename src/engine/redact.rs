use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::text::{QUANTITY, word_pattern};
use crate::config::EngineConfig;
use crate::model::{ErrorRecord, MutatedArticle};

/// Comma-grouped numbers as one token, or bare 3–4 digit numbers.
static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,3}(?:,\d{3})+|\d{3,4})\b").expect("valid pattern")
});

/// Produces display copies with planted values partially masked.
///
/// Masking is stable: running it again over its own output changes nothing.
#[derive(Debug, Clone, Copy)]
pub struct Redactor {
    glyph: char,
}

impl Redactor {
    pub fn new(config: &EngineConfig) -> Self {
        Self { glyph: config.mask_glyph }
    }

    /// Keep edge letters as a hint: `≤3` chars keep the first letter, `4–6`
    /// keep first and last, longer words keep the first two and the last.
    pub fn mask_word(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        let (head, tail) = match n {
            0 => return String::new(),
            1..=3 => (1, 0),
            4..=6 => (1, 1),
            _ => (2, 1),
        };
        chars[..head]
            .iter()
            .copied()
            .chain(std::iter::repeat_n(self.glyph, n - head - tail))
            .chain(chars[n - tail..].iter().copied())
            .collect()
    }

    fn glyphs(&self, n: usize) -> String {
        std::iter::repeat_n(self.glyph, n).collect()
    }

    /// Hide numbers in a sentence: quantities keep their unit, year-like
    /// numbers become four glyphs, grouped and other 3–4 digit numbers one
    /// glyph per digit.
    pub fn mask_numbers(&self, sentence: &str) -> String {
        let quantities_hidden = QUANTITY.replace_all(sentence, |caps: &Captures| {
            let digits = caps[1].chars().filter(char::is_ascii_digit).count();
            format!("{}{}{}", self.glyphs(digits), &caps[2], &caps[3])
        });
        BARE_NUMBER
            .replace_all(&quantities_hidden, |caps: &Captures| {
                let token = &caps[0];
                let year_like = token.parse::<u32>().is_ok_and(|n| (1000..=2099).contains(&n));
                let digits = token.chars().filter(char::is_ascii_digit).count();
                self.glyphs(if year_like { 4 } else { digits })
            })
            .into_owned()
    }

    /// A planted number masked in full, including short numbers that
    /// [`mask_numbers`](Self::mask_numbers) leaves alone in running prose.
    fn mask_planted_number(&self, value: &str) -> String {
        self.mask_numbers(value)
            .chars()
            .map(|c| if c.is_ascii_digit() { self.glyph } else { c })
            .collect()
    }

    /// Display copy of `text` with every planted value of `errors` masked.
    ///
    /// Sentence-level errors additionally have every number in their sentence
    /// hidden. `text` itself is never modified.
    pub fn mask(&self, text: &str, errors: &[ErrorRecord]) -> String {
        let mut display = text.to_string();

        for e in errors.iter().filter(|e| e.kind.is_sentence_level()) {
            if !e.sentence.is_empty() && display.contains(&e.sentence) {
                let masked = self.mask_numbers(&e.sentence);
                display = display.replacen(&e.sentence, &masked, 1);
            }
        }

        for e in errors {
            let Some(re) = word_pattern(&e.planted_value) else {
                continue;
            };
            let sentence_level = e.kind.is_sentence_level();
            display = re
                .replace_all(&display, |caps: &Captures| {
                    if sentence_level {
                        self.mask_planted_number(&caps[0])
                    } else {
                        caps[0]
                            .split(' ')
                            .map(|w| self.mask_word(w))
                            .collect::<Vec<_>>()
                            .join(" ")
                    }
                })
                .into_owned();
        }
        display
    }

    pub fn mask_article(&self, article: &MutatedArticle) -> String {
        self.mask(&article.text, &article.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ErrorInjector;
    use crate::model::{ErrorKind, SourceText};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn redactor() -> Redactor {
        Redactor::new(&EngineConfig::default())
    }

    #[test]
    fn mask_word_length_bands() {
        let r = redactor();
        assert_eq!(r.mask_word("sea"), "s██");
        assert_eq!(r.mask_word("a"), "a");
        assert_eq!(r.mask_word("city"), "c██y");
        assert_eq!(r.mask_word("larges"), "l████s");
        assert_eq!(r.mask_word("largest"), "la████t");
        assert_eq!(r.mask_word(""), "");
    }

    #[test]
    fn mask_word_is_stable() {
        let r = redactor();
        for w in ["sea", "city", "largest", "extraordinary"] {
            let once = r.mask_word(w);
            assert_eq!(r.mask_word(&once), once);
        }
    }

    #[test]
    fn numbers_in_sentence_are_hidden() {
        let r = redactor();
        assert_eq!(
            r.mask_numbers("In 1984 it had 2,165,423 residents and 450 shops."),
            "In ████ it had ███████ residents and ███ shops."
        );
    }

    #[test]
    fn grouped_number_without_unit_is_one_token() {
        let r = redactor();
        assert_eq!(
            r.mask_numbers("Around 2,165,423 live there, 12 of them in 1984."),
            "Around ███████ live there, 12 of them in ████."
        );
    }

    #[test]
    fn short_planted_number_is_masked() {
        let r = redactor();
        let text = "a 32 of 7";
        let errors = vec![ErrorRecord::locate(ErrorKind::Quantity, "42", "32", text)];
        let masked = r.mask(text, &errors);
        assert_eq!(masked, "a ██ of 7");
        assert_eq!(r.mask(&masked, &errors), masked);
    }

    #[test]
    fn bare_number_fallback_article_hides_its_answer() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "a 42 of 7");
        let article = injector
            .inject(&source, &mut SmallRng::seed_from_u64(6))
            .into_article();
        let planted = &article.errors[0].planted_value;
        let masked = Redactor::new(&config).mask_article(&article);
        assert!(!masked.contains(planted.as_str()), "{masked}");
        assert_eq!(masked, "a ██ of 7");
    }

    #[test]
    fn lexical_planted_value_is_masked() {
        let r = redactor();
        let text = "Paris is the largest city. Largest indeed.";
        let errors = vec![ErrorRecord::locate(ErrorKind::Lexical, "capital", "largest", text)];
        assert_eq!(
            r.mask(text, &errors),
            "Paris is the la████t city. La████t indeed."
        );
    }

    #[test]
    fn sentence_level_masks_whole_sentence_numbers() {
        let r = redactor();
        let text = "Founded in 1850. Landed in 1975 with 300 crew. Closed in 2001.";
        let errors = vec![ErrorRecord::locate(ErrorKind::Date, "1969", "1975", text)];
        assert_eq!(
            r.mask(text, &errors),
            "Founded in 1850. Landed in ████ with ███ crew. Closed in 2001."
        );
    }

    #[test]
    fn stale_sentence_still_masks_planted_value() {
        let r = redactor();
        let text = "It has 2,400,000 residents.";
        let errors = vec![ErrorRecord {
            kind: ErrorKind::Quantity,
            original_value: "2,165,423 residents".to_string(),
            planted_value: "2,400,000 residents".to_string(),
            sentence: "something else".to_string(),
        }];
        assert_eq!(r.mask(text, &errors), "It has ███████ residents.");
    }

    #[test]
    fn masking_is_idempotent() {
        let r = redactor();
        let text = "Paris is the largest city. It had 2,400,000 residents in 1984.";
        let errors = vec![
            ErrorRecord::locate(ErrorKind::Lexical, "capital", "largest", text),
            ErrorRecord::locate(
                ErrorKind::Quantity,
                "2,165,423 residents",
                "2,400,000 residents",
                text,
            ),
        ];
        let once = r.mask(text, &errors);
        assert_eq!(r.mask(&once, &errors), once);
    }

    #[test]
    fn canonical_text_is_untouched() {
        let r = redactor();
        let text = String::from("The largest city.");
        let errors = vec![ErrorRecord::locate(ErrorKind::Lexical, "capital", "largest", &text)];
        let _ = r.mask(&text, &errors);
        assert_eq!(text, "The largest city.");
    }
}
