use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::ArticleEntry;
use crate::model::MutatedArticle;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Save articles as corpus entries, one per line, creating the parent
/// directory if needed.
///
/// The file reads back with [`Corpus::from_path`](super::Corpus::from_path).
pub fn write_corpus_jsonl<'a>(
    path: &Path,
    articles: impl IntoIterator<Item = &'a MutatedArticle>,
) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_jsonl(path, articles.into_iter().map(ArticleEntry::from))
}
