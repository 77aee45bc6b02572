use rand::{Rng, RngCore};

use crate::dictionary::SubstitutionDictionary;
use crate::dictionary::defaults::BUILTIN_FALLBACK;

/// Maps a word to a related but wrong replacement.
///
/// Always returns lowercase; callers reapply capitalization.
pub struct LexicalSubstituter<'a> {
    dictionary: Option<&'a SubstitutionDictionary>,
}

impl<'a> LexicalSubstituter<'a> {
    /// `None` means the dictionary has not been loaded yet.
    pub fn new(dictionary: Option<&'a SubstitutionDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn substitute(&self, word: &str, rng: &mut dyn RngCore) -> String {
        let Some(dict) = self.dictionary else {
            return pick(BUILTIN_FALLBACK, rng).to_lowercase();
        };

        let key = word.to_lowercase();
        if let Some((category, candidates)) = dict.lookup(&key) {
            let choice = pick(candidates, rng);
            tracing::debug!(word, category, choice = choice.as_str(), "dictionary substitution");
            return choice.to_lowercase();
        }

        let bucket = dict.fallbacks.bucket_for(word.chars().count());
        if bucket.is_empty() {
            return pick(BUILTIN_FALLBACK, rng).to_lowercase();
        }
        pick(bucket, rng).to_lowercase()
    }
}

fn pick<'s, T>(items: &'s [T], rng: &mut dyn RngCore) -> &'s T {
    &items[rng.random_range(0..items.len())]
}
