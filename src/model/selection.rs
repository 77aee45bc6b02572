use std::collections::BTreeMap;

/// Words the player has toggled on during one guess round, keyed by their
/// position in the rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    tokens: BTreeMap<usize, String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the word at `position`, or deselect it if already selected.
    /// Returns whether the word is selected afterwards.
    pub fn toggle(&mut self, position: usize, word: impl Into<String>) -> bool {
        if self.tokens.remove(&position).is_some() {
            false
        } else {
            self.tokens.insert(position, word.into());
            true
        }
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.tokens.contains_key(&position)
    }

    /// Selected words in reading order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}
