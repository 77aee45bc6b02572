use std::collections::HashSet;

use rand::{Rng, RngCore};

use crate::corpus::Corpus;
use crate::engine::{Redactor, Verdict, verify};
use crate::model::{MutatedArticle, Selection};

/// Player progress across rounds.
///
/// Owned by the caller and passed into each round; nothing is global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSession {
    pub level: u32,
    pub score: u32,
    pub rounds_played: u32,
    /// Titles already served since the corpus was last recycled.
    pub used_titles: HashSet<String>,
    /// Show articles with planted values masked.
    pub obscure_mode: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self { level: 1, ..Self::default() }
    }

    /// Pick an article not yet served. Once every article has been served
    /// the used set is cleared and picking starts over.
    pub fn next_article<'c>(
        &mut self,
        corpus: &'c Corpus,
        rng: &mut dyn RngCore,
    ) -> Option<&'c MutatedArticle> {
        if corpus.is_empty() {
            return None;
        }
        let mut unused: Vec<&MutatedArticle> = corpus
            .articles
            .iter()
            .filter(|a| !self.used_titles.contains(&a.title))
            .collect();
        if unused.is_empty() {
            tracing::info!(articles = corpus.len(), "every article served; recycling corpus");
            self.used_titles.clear();
            unused = corpus.articles.iter().collect();
        }
        let article = unused[rng.random_range(0..unused.len())];
        self.used_titles.insert(article.title.clone());
        Some(article)
    }

    /// Verify the selection against `article`, clear it, and update progress.
    pub fn submit(&mut self, article: &MutatedArticle, selection: &mut Selection) -> Verdict {
        let verdict = verify(&selection.tokens(), &article.errors);
        selection.clear();
        self.rounds_played += 1;
        if verdict.correct {
            self.score += 1;
            self.level += 1;
            tracing::info!(level = self.level, score = self.score, "level up");
        }
        verdict
    }

    /// Text to render for `article`, masked when obscure mode is on.
    pub fn display_text(&self, article: &MutatedArticle, redactor: &Redactor) -> String {
        if self.obscure_mode {
            redactor.mask_article(article)
        } else {
            article.text.clone()
        }
    }
}
