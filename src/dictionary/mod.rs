pub mod defaults;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use defaults::{
    CATEGORY_ORDER, DEFAULT_CATEGORIES, FALLBACK_LONG, FALLBACK_MEDIUM, FALLBACK_SHORT,
    MEDIUM_CHANGE_PERCENT, SMALL_CHANGE_PERCENT, YEAR_CHANGE_ANCIENT, YEAR_CHANGE_MODERN,
};

/// Inclusive fractional change range, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
}

impl From<(f64, f64)> for PercentRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PercentRange> for (f64, f64) {
    fn from(r: PercentRange) -> Self {
        (r.min, r.max)
    }
}

/// Inclusive year offset range, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct YearOffsetRange {
    pub min: i64,
    pub max: i64,
}

impl From<(i64, i64)> for YearOffsetRange {
    fn from((min, max): (i64, i64)) -> Self {
        Self { min, max }
    }
}

impl From<YearOffsetRange> for (i64, i64) {
    fn from(r: YearOffsetRange) -> Self {
        (r.min, r.max)
    }
}

/// Numeric change policy for the perturber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberModifiers {
    pub small_change_percent: PercentRange,
    pub medium_change_percent: PercentRange,
    pub year_change_modern: YearOffsetRange,
    pub year_change_ancient: YearOffsetRange,
}

impl Default for NumberModifiers {
    fn default() -> Self {
        Self {
            small_change_percent: SMALL_CHANGE_PERCENT.into(),
            medium_change_percent: MEDIUM_CHANGE_PERCENT.into(),
            year_change_modern: YEAR_CHANGE_MODERN.into(),
            year_change_ancient: YEAR_CHANGE_ANCIENT.into(),
        }
    }
}

impl NumberModifiers {
    /// Percent ranges must be ordered and non-negative; year offsets must be
    /// at least 1 so a perturbed year always differs from the input.
    pub fn validate(&self) -> Result<()> {
        for (name, r) in [
            ("small_change_percent", self.small_change_percent),
            ("medium_change_percent", self.medium_change_percent),
        ] {
            if !(r.min >= 0.0 && r.min <= r.max && r.max.is_finite()) {
                return Err(Error::InvalidRange { name, min: r.min, max: r.max });
            }
        }
        for (name, r) in [
            ("year_change_modern", self.year_change_modern),
            ("year_change_ancient", self.year_change_ancient),
        ] {
            if r.min < 1 || r.min > r.max {
                return Err(Error::InvalidRange {
                    name,
                    min: r.min as f64,
                    max: r.max as f64,
                });
            }
        }
        Ok(())
    }
}

/// Length-bucketed replacement words for dictionary misses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallbacks {
    #[serde(default)]
    pub short: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
    #[serde(default)]
    pub long: Vec<String>,
}

impl Default for Fallbacks {
    fn default() -> Self {
        let owned =
            |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
        Self {
            short: owned(FALLBACK_SHORT),
            medium: owned(FALLBACK_MEDIUM),
            long: owned(FALLBACK_LONG),
        }
    }
}

impl Fallbacks {
    /// `<= 4` chars → short, `<= 6` → medium, otherwise long.
    pub fn bucket_for(&self, word_len: usize) -> &[String] {
        match word_len {
            0..=4 => &self.short,
            5..=6 => &self.medium,
            _ => &self.long,
        }
    }
}

/// Word → replacement candidates, grouped by semantic category.
///
/// Loaded once and read-only afterward. Keys are stored lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionDictionary {
    #[serde(default)]
    pub categories: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub fallbacks: Fallbacks,
    #[serde(default)]
    pub number_modifiers: NumberModifiers,
}

impl Default for SubstitutionDictionary {
    fn default() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|table| {
                let entries: BTreeMap<String, Vec<String>> = table
                    .entries
                    .iter()
                    .map(|(word, candidates)| {
                        (
                            word.to_string(),
                            candidates.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
                        )
                    })
                    .collect();
                (table.name.to_string(), entries)
            })
            .collect();
        Self {
            categories,
            fallbacks: Fallbacks::default(),
            number_modifiers: NumberModifiers::default(),
        }
    }
}

impl SubstitutionDictionary {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut dict: Self = serde_json::from_str(json)?;
        dict.number_modifiers.validate()?;
        for entries in dict.categories.values_mut() {
            *entries = std::mem::take(entries)
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect();
        }
        Ok(dict)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `path`, falling back to the built-in dictionary on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(dict) => dict,
            Err(e) => {
                tracing::warn!(path = %path.display(), "using built-in dictionary: {e}");
                Self::default()
            }
        }
    }

    /// Category names in lookup order: the fixed order first, then any extra
    /// categories alphabetically.
    pub fn category_order(&self) -> impl Iterator<Item = &str> {
        let fixed = CATEGORY_ORDER
            .iter()
            .copied()
            .filter(|name| self.categories.contains_key(*name));
        let extra = self
            .categories
            .keys()
            .map(String::as_str)
            .filter(|name| !CATEGORY_ORDER.contains(name));
        fixed.chain(extra)
    }

    /// Candidates for a lowercase key from the first category that has it.
    pub fn lookup(&self, key: &str) -> Option<(&str, &[String])> {
        self.category_order().find_map(|name| {
            self.categories
                .get(name)
                .and_then(|entries| entries.get(key))
                .filter(|candidates| !candidates.is_empty())
                .map(|candidates| (name, candidates.as_slice()))
        })
    }
}
