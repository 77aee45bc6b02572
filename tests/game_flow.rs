mod common;

use common::*;
use errata::model::*;
use errata::{Corpus, EngineConfig, ErrorInjector, GameSession, Redactor, seed};

fn build_corpus() -> Corpus {
    let dict = capital_dictionary();
    let config = EngineConfig::default();
    let injector = ErrorInjector::new(Some(&dict), &config);
    let sources = [
        paris_source(),
        SourceText::new(
            "Apollo 11",
            "History",
            "Apollo 11 landed on the Moon in 1969. Armstrong stepped out first.",
        ),
    ];
    let articles = sources
        .iter()
        .map(|s| injector.inject(s, &mut seed::make_rng(&s.title, 0, "inject")).into_article())
        .collect();
    Corpus { articles, warnings: Vec::new() }
}

#[test]
fn obscured_round_hides_planted_value_and_accepts_it() {
    let corpus = build_corpus();
    let redactor = Redactor::new(&EngineConfig::default());
    let mut session = GameSession::new();
    session.obscure_mode = true;
    let mut rng = seed::make_rng("session", 0, "pick");

    for round in 0..corpus.len() {
        let article = session.next_article(&corpus, &mut rng).unwrap();
        let rec = &article.errors[0];
        assert!(rec.kind.is_sentence_level());

        let display = session.display_text(article, &redactor);
        let number = rec.planted_value.split_whitespace().next().unwrap();
        assert!(!display.contains(number), "round {round}: {display}");

        let mut selection = Selection::new();
        selection.toggle(7, number);
        let verdict = session.submit(article, &mut selection);
        assert!(verdict.correct, "round {round}: {verdict:?}");
        assert_eq!(verdict.explanation, Some(rec.explanation()));
    }
    assert_eq!(session.level, 3);
    assert_eq!(session.rounds_played, 2);
    assert_eq!(session.used_titles.len(), 2);
}

#[test]
fn masking_twice_changes_nothing() {
    let corpus = build_corpus();
    let redactor = Redactor::new(&EngineConfig::default());
    for article in &corpus.articles {
        let once = redactor.mask_article(article);
        assert_eq!(redactor.mask(&once, &article.errors), once);
    }
}
