use std::collections::HashSet;
use std::sync::LazyLock;

use rand::{Rng, RngCore};
use regex::Regex;

use super::perturb::{MagnitudeClass, NumericPerturber};
use super::substitute::LexicalSubstituter;
use super::text::{
    QUANTITY, YEAR, continues_number, format_thousands, normalize, parse_number,
    replace_first_word,
};
use crate::config::EngineConfig;
use crate::dictionary::defaults::is_stopword;
use crate::dictionary::{NumberModifiers, SubstitutionDictionary};
use crate::error::IntegrityWarning;
use crate::model::{ErrorKind, ErrorRecord, MutatedArticle, SourceText};

/// Capitalized words and lowercase words of four or more letters.
static CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[A-Z][a-zA-Z]+|[a-z]{4,})\b").expect("valid pattern"));

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2,3}\b").expect("valid pattern"));

/// Result of one injection attempt.
#[derive(Debug, Clone)]
pub enum Injection {
    /// At least one error was planted. `warnings` lists integrity problems
    /// found afterwards; they have already been logged.
    Planted {
        article: MutatedArticle,
        warnings: Vec<IntegrityWarning>,
    },
    /// Nothing in the text could be altered; the article is error-free.
    NothingPlanted(MutatedArticle),
}

impl Injection {
    pub fn is_planted(&self) -> bool {
        matches!(self, Injection::Planted { .. })
    }

    pub fn article(&self) -> &MutatedArticle {
        match self {
            Injection::Planted { article, .. } | Injection::NothingPlanted(article) => article,
        }
    }

    pub fn into_article(self) -> MutatedArticle {
        match self {
            Injection::Planted { article, .. } | Injection::NothingPlanted(article) => article,
        }
    }

    pub fn warnings(&self) -> &[IntegrityWarning] {
        match self {
            Injection::Planted { warnings, .. } => warnings,
            Injection::NothingPlanted(_) => &[],
        }
    }

    /// Wrap a mutated copy of `source` holding `record`, running the
    /// post-injection integrity check.
    pub(crate) fn planted(source: &SourceText, text: String, record: ErrorRecord) -> Self {
        let article = MutatedArticle {
            errors: vec![record],
            text,
            ..MutatedArticle::unmodified(source)
        };
        let warnings = article.check_integrity();
        for w in &warnings {
            w.log(&article.title);
        }
        Injection::Planted { article, warnings }
    }
}

/// Value swapped into the working text by one strategy.
struct Swap {
    kind: ErrorKind,
    original: String,
    planted: String,
    strategy: &'static str,
}

/// Plants one factual error into an article.
///
/// Strategies run in priority order (date, quantity, lexical) and the first
/// that alters the text wins.
pub struct ErrorInjector<'a> {
    dictionary: Option<&'a SubstitutionDictionary>,
    modifiers: NumberModifiers,
    config: &'a EngineConfig,
}

impl<'a> ErrorInjector<'a> {
    /// With `dictionary == None` lexical swaps draw from the built-in
    /// fallback words and numbers use the default change ranges.
    pub fn new(dictionary: Option<&'a SubstitutionDictionary>, config: &'a EngineConfig) -> Self {
        let modifiers = dictionary.map(|d| d.number_modifiers).unwrap_or_default();
        Self { dictionary, modifiers, config }
    }

    pub fn inject(&self, source: &SourceText, rng: &mut dyn RngCore) -> Injection {
        let mut text = source.text.clone();

        let mut swap = self.inject_date(&mut text, rng);
        if swap.is_none() {
            swap = self.inject_quantity(&mut text, rng);
        }
        if swap.is_none() {
            swap = self.inject_lexical(&mut text, &source.title, rng);
        }

        let Some(swap) = swap else {
            tracing::debug!(article = source.title.as_str(), "no injection candidate");
            return Injection::NothingPlanted(MutatedArticle::unmodified(source));
        };

        tracing::debug!(
            article = source.title.as_str(),
            strategy = swap.strategy,
            original = swap.original.as_str(),
            planted = swap.planted.as_str(),
            "planted error"
        );
        let record = ErrorRecord::locate(swap.kind, swap.original, swap.planted, &text);
        Injection::planted(source, text, record)
    }

    fn perturber(&self) -> NumericPerturber<'_> {
        NumericPerturber::new(&self.modifiers, self.config)
    }

    fn inject_date(&self, text: &mut String, rng: &mut dyn RngCore) -> Option<Swap> {
        let haystack = text.as_str();
        let quantities: Vec<_> = QUANTITY.find_iter(haystack).map(|m| m.range()).collect();
        let years: Vec<String> = YEAR
            .find_iter(haystack)
            .filter(|m| !continues_number(haystack, m.start()))
            .filter(|m| !quantities.iter().any(|q| q.contains(&m.start())))
            .filter(|m| {
                m.as_str()
                    .parse::<i64>()
                    .is_ok_and(|y| y <= self.config.year_ceiling)
            })
            .map(|m| m.as_str().to_string())
            .collect();
        if years.is_empty() {
            return None;
        }

        let token = &years[rng.random_range(0..years.len())];
        let year: i64 = token.parse().ok()?;
        let new_year = self.perturber().perturb_year(year, rng).to_string();
        let (original, planted) = replace_first_word(text, token, &new_year)?;
        Some(Swap { kind: ErrorKind::Date, original, planted, strategy: "date" })
    }

    fn inject_quantity(&self, text: &mut String, rng: &mut dyn RngCore) -> Option<Swap> {
        let haystack = text.as_str();
        let (token, number, space, unit) = QUANTITY
            .captures_iter(haystack)
            .find(|caps| !continues_number(haystack, caps.get(0).map_or(0, |m| m.start())))
            .map(|caps| {
                (
                    caps[0].to_string(),
                    caps[1].to_string(),
                    caps[2].to_string(),
                    caps[3].to_string(),
                )
            })?;

        let value = parse_number(&number)?;
        let new_value = self
            .perturber()
            .perturb_quantity(value, MagnitudeClass::of(value), rng);
        let new_token = format!("{}{space}{unit}", format_thousands(new_value));
        let (original, planted) = replace_first_word(text, &token, &new_token)?;
        Some(Swap { kind: ErrorKind::Quantity, original, planted, strategy: "quantity" })
    }

    fn inject_lexical(
        &self,
        text: &mut String,
        title: &str,
        rng: &mut dyn RngCore,
    ) -> Option<Swap> {
        let title_words: HashSet<String> = title
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .map(normalize)
            .filter(|w| !w.is_empty())
            .collect();

        let mut seen = HashSet::new();
        let candidates: Vec<String> = CANDIDATE
            .find_iter(text.as_str())
            .map(|m| m.as_str())
            .filter(|w| !is_stopword(w))
            .filter(|w| !title_words.contains(&w.to_lowercase()))
            .filter(|w| seen.insert(w.to_lowercase()))
            .map(String::from)
            .collect();

        if candidates.is_empty() {
            return self.inject_bare_number(text, rng);
        }

        // Start at a random candidate and move on to the next one whenever a
        // word keeps substituting to itself.
        let start = rng.random_range(0..candidates.len());
        let substituter = LexicalSubstituter::new(self.dictionary);
        for i in 0..candidates.len() {
            let word = &candidates[(start + i) % candidates.len()];
            let replacement = (0..self.config.max_substitution_attempts.max(1))
                .map(|_| substituter.substitute(word, rng))
                .find(|r| !r.eq_ignore_ascii_case(word));
            let Some(replacement) = replacement else {
                tracing::debug!(word = word.as_str(), "no distinct substitute");
                continue;
            };
            if let Some((original, planted)) = replace_first_word(text, word, &replacement) {
                return Some(Swap {
                    kind: ErrorKind::Lexical,
                    original,
                    planted,
                    strategy: "lexical",
                });
            }
        }
        self.inject_bare_number(text, rng)
    }

    /// Last resort: nudge the first bare 2–3 digit number.
    fn inject_bare_number(&self, text: &mut String, rng: &mut dyn RngCore) -> Option<Swap> {
        let haystack = text.as_str();
        let token = BARE_NUMBER
            .find_iter(haystack)
            .find(|m| !continues_number(haystack, m.start()))?
            .as_str()
            .to_string();
        let value: i64 = token.parse().ok()?;
        let offset = self.config.fallback_number_offset.max(1);
        let new_value = if rng.random_bool(0.5) || value - offset < 1 {
            value + offset
        } else {
            value - offset
        };
        let (original, planted) = replace_first_word(text, &token, &new_value.to_string())?;
        Some(Swap { kind: ErrorKind::Quantity, original, planted, strategy: "bare-number" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn capital_dict() -> SubstitutionDictionary {
        SubstitutionDictionary::from_json_str(
            r#"{ "categories": { "geographic": { "capital": ["largest"] } } }"#,
        )
        .unwrap()
    }

    #[test]
    fn date_has_priority() {
        let dict = capital_dict();
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(Some(&dict), &config);
        let source = SourceText::new(
            "Moon landing",
            "History",
            "Apollo 11 landed in 1969 with 3 people aboard the capital ship.",
        );
        let mut rng = SmallRng::seed_from_u64(1);
        let injection = injector.inject(&source, &mut rng);
        let article = injection.article();
        assert_eq!(article.errors.len(), 1);
        let rec = &article.errors[0];
        assert_eq!(rec.kind, ErrorKind::Date);
        assert_eq!(rec.original_value, "1969");
        assert_ne!(rec.planted_value, "1969");
        assert!(article.text.contains(&rec.planted_value));
        assert!(!article.text.contains("1969"));
        assert!(injection.warnings().is_empty());
    }

    #[test]
    fn only_first_year_occurrence_replaced() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "Founded in 1850. Rebuilt after 1850.");
        let mut rng = SmallRng::seed_from_u64(2);
        let article = injector.inject(&source, &mut rng).into_article();
        assert_eq!(article.text.matches("1850").count(), 1);
        assert!(article.text.ends_with("Rebuilt after 1850."));
        assert!(article.errors[0].sentence.starts_with("Founded in"));
    }

    #[test]
    fn unit_bearing_years_are_quantities() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "The wall is 1500 km long.");
        let mut rng = SmallRng::seed_from_u64(3);
        let article = injector.inject(&source, &mut rng).into_article();
        assert_eq!(article.errors[0].kind, ErrorKind::Quantity);
        assert_eq!(article.errors[0].original_value, "1500 km");
        assert!(article.errors[0].planted_value.ends_with(" km"));
    }

    #[test]
    fn future_years_are_skipped() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "Planned for 2090.");
        let mut rng = SmallRng::seed_from_u64(4);
        let article = injector.inject(&source, &mut rng).into_article();
        assert_ne!(article.errors.first().map(|e| e.kind), Some(ErrorKind::Date));
    }

    #[test]
    fn quantity_is_reformatted_with_separators() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "Home to 5000 people.");
        let mut rng = SmallRng::seed_from_u64(5);
        let article = injector.inject(&source, &mut rng).into_article();
        let planted = &article.errors[0].planted_value;
        assert!(planted.contains(','), "expected separators in {planted}");
        assert!(planted.ends_with(" people"));
    }

    #[test]
    fn lexical_preserves_capitalization() {
        let dict = capital_dict();
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(Some(&dict), &config);
        let source = SourceText::new("Paris", "Geography", "Capital of France is Paris.");
        // "Capital", "France" are candidates; seed until "Capital" is picked.
        let injection = (0..64)
            .map(|seed| injector.inject(&source, &mut SmallRng::seed_from_u64(seed)))
            .find(|inj| inj.article().errors[0].original_value == "Capital")
            .unwrap();
        let rec = &injection.article().errors[0];
        assert_eq!(rec.kind, ErrorKind::Lexical);
        assert_eq!(rec.planted_value, "Largest");
        assert!(injection.article().text.starts_with("Largest of France"));
    }

    #[test]
    fn title_words_are_never_candidates() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("Eiffel Tower", "Landmark", "The Eiffel Tower stands tall.");
        for seed in 0..32 {
            let article = injector
                .inject(&source, &mut SmallRng::seed_from_u64(seed))
                .into_article();
            let original = &article.errors[0].original_value;
            assert_ne!(original.to_lowercase(), "eiffel");
            assert_ne!(original.to_lowercase(), "tower");
        }
    }

    #[test]
    fn self_mapping_word_moves_on_to_next_candidate() {
        let dict = SubstitutionDictionary::from_json_str(
            r#"{ "categories": { "size": { "tall": ["tall"] } } }"#,
        )
        .unwrap();
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(Some(&dict), &config);
        let source = SourceText::new("T", "C", "tall and wide.");
        for seed in 0..16 {
            let injection = injector.inject(&source, &mut SmallRng::seed_from_u64(seed));
            assert!(injection.is_planted());
            assert_eq!(injection.article().errors[0].original_value, "wide");
        }
    }

    #[test]
    fn self_mapping_only_word_falls_back_to_numbers() {
        let dict = SubstitutionDictionary::from_json_str(
            r#"{ "categories": { "size": { "tall": ["tall"] } } }"#,
        )
        .unwrap();
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(Some(&dict), &config);
        let source = SourceText::new("T", "C", "tall at 42");
        let article = injector
            .inject(&source, &mut SmallRng::seed_from_u64(5))
            .into_article();
        assert_eq!(article.errors[0].kind, ErrorKind::Quantity);
        assert_eq!(article.errors[0].original_value, "42");
    }

    #[test]
    fn huge_count_does_not_overflow() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "It has 9223372036854775807 people.");
        for seed in 0..8 {
            let article = injector
                .inject(&source, &mut SmallRng::seed_from_u64(seed))
                .into_article();
            let rec = &article.errors[0];
            assert_eq!(rec.kind, ErrorKind::Quantity);
            assert!(rec.planted_value.ends_with(" people"));
            assert!(article.text.contains(&rec.planted_value));
        }
    }

    #[test]
    fn bare_number_fallback() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "a 42 of 7");
        let mut rng = SmallRng::seed_from_u64(6);
        let article = injector.inject(&source, &mut rng).into_article();
        let rec = &article.errors[0];
        assert_eq!(rec.original_value, "42");
        assert!(rec.planted_value == "32" || rec.planted_value == "52");
    }

    #[test]
    fn nothing_to_alter_leaves_article_untouched() {
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(None, &config);
        let source = SourceText::new("T", "C", "it is a 7 of the 9.");
        let mut rng = SmallRng::seed_from_u64(7);
        let injection = injector.inject(&source, &mut rng);
        assert!(!injection.is_planted());
        assert_eq!(injection.article().text, source.text);
        assert!(!injection.article().has_errors());
    }

    #[test]
    fn same_seed_same_injection() {
        let dict = SubstitutionDictionary::default();
        let config = EngineConfig::default();
        let injector = ErrorInjector::new(Some(&dict), &config);
        let source = SourceText::new("T", "C", "The northern river flows past an ancient city.");
        let a = injector.inject(&source, &mut SmallRng::seed_from_u64(9)).into_article();
        let b = injector.inject(&source, &mut SmallRng::seed_from_u64(9)).into_article();
        assert_eq!(a, b);
    }
}
