use rand::{Rng, RngCore};

use crate::config::EngineConfig;
use crate::dictionary::{NumberModifiers, PercentRange};

/// Which percent range a quantity is perturbed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeClass {
    /// Values above 1000.
    Small,
    /// Values up to 1000.
    Medium,
}

impl MagnitudeClass {
    pub fn of(value: i64) -> Self {
        if value > 1000 { MagnitudeClass::Small } else { MagnitudeClass::Medium }
    }
}

/// Produces plausible wrong years and quantities.
///
/// Holds no state of its own; all randomness comes from the `rng` argument.
pub struct NumericPerturber<'a> {
    modifiers: &'a NumberModifiers,
    config: &'a EngineConfig,
}

impl<'a> NumericPerturber<'a> {
    pub fn new(modifiers: &'a NumberModifiers, config: &'a EngineConfig) -> Self {
        Self { modifiers, config }
    }

    /// Shift `year` by a random offset in either direction.
    ///
    /// Modern years stay within `[year_floor, year_ceiling]`: an out-of-bounds
    /// draw is flipped, then clamped, and never equals the input.
    pub fn perturb_year(&self, year: i64, rng: &mut dyn RngCore) -> i64 {
        let modern = self.config.is_modern_year(year);
        let range = if modern {
            self.modifiers.year_change_modern
        } else {
            self.modifiers.year_change_ancient
        };
        let offset = rng.random_range(range.min..=range.max.max(range.min)).max(1);
        let up = rng.random_bool(0.5);
        let (candidate, flipped) = if up {
            (year + offset, year - offset)
        } else {
            (year - offset, year + offset)
        };

        if !modern {
            return if candidate > 0 { candidate } else { year + offset };
        }

        let (lo, hi) = (self.config.year_floor, self.config.year_ceiling);
        if (lo..=hi).contains(&candidate) {
            return candidate;
        }
        if (lo..=hi).contains(&flipped) {
            return flipped;
        }
        let clamped = candidate.clamp(lo, hi);
        if clamped != year {
            clamped
        } else if year > lo {
            year - 1
        } else {
            year + 1
        }
    }

    /// Change `value` by a random percentage from the class's range, in a
    /// random direction. Never returns a non-positive number or `value` itself.
    pub fn perturb_quantity(
        &self,
        value: i64,
        class: MagnitudeClass,
        rng: &mut dyn RngCore,
    ) -> i64 {
        let range = self.range_for(class);
        let pct = if range.min < range.max {
            rng.random_range(range.min..=range.max)
        } else {
            range.min
        };
        let delta = ((value as f64) * pct).round().max(1.0) as i64;
        let shifted = if rng.random_bool(0.5) {
            value.checked_add(delta)
        } else {
            value.checked_sub(delta)
        };
        if let Some(result) = shifted.filter(|r| *r > 0) {
            return result;
        }
        // Overflowed upward: go down instead.
        if let Some(result) = value.checked_sub(delta).filter(|r| *r > 0) {
            return result;
        }
        let bump = ((value as f64) * range.min).floor() as i64;
        value.saturating_add(bump.max(1))
    }

    fn range_for(&self, class: MagnitudeClass) -> PercentRange {
        match class {
            MagnitudeClass::Small => self.modifiers.small_change_percent,
            MagnitudeClass::Medium => self.modifiers.medium_change_percent,
        }
    }
}
