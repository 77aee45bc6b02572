#![allow(dead_code)]

use errata::SubstitutionDictionary;
use errata::model::*;

pub const PARIS_TEXT: &str = "Paris is the capital of France. It has 2,165,423 residents.";

pub fn paris_source() -> SourceText {
    SourceText::new("Paris", "Geography", PARIS_TEXT)
}

pub fn capital_dictionary() -> SubstitutionDictionary {
    SubstitutionDictionary::from_json_str(
        r#"{ "categories": { "geographic": { "capital": ["largest"] } } }"#,
    )
    .unwrap()
}

pub fn word_error(original: &str, planted: &str, text: &str) -> ErrorRecord {
    ErrorRecord::locate(ErrorKind::Lexical, original, planted, text)
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
