/// Engine-wide knobs that are not part of the dictionary document.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lowest year a perturbed modern year may take.
    pub year_floor: i64,
    /// Highest year a perturbed modern year may take.
    pub year_ceiling: i64,
    /// Glyph used by the redactor for hidden characters.
    pub mask_glyph: char,
    /// How many substitutions to draw before giving up on a candidate that
    /// keeps mapping to itself.
    pub max_substitution_attempts: u32,
    /// Offset applied to bare 2–3 digit numbers when no word candidate exists.
    pub fallback_number_offset: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            year_floor: 1900,
            year_ceiling: 2025,
            mask_glyph: '█',
            max_substitution_attempts: 8,
            fallback_number_offset: 10,
        }
    }
}

impl EngineConfig {
    /// Years strictly above the floor count as modern.
    pub fn is_modern_year(&self, year: i64) -> bool {
        year > self.year_floor
    }
}
