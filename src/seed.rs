use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Deterministic seed for one article, round and purpose (`"inject"`,
/// `"pick"`, ...).
pub fn make_seed(title: &str, round: u32, discriminator: &str) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    title.hash(&mut hasher);
    round.hash(&mut hasher);
    discriminator.hash(&mut hasher);
    hasher.finish()
}

/// Seeded RNG for one article and round.
///
/// Pass the result as `&mut dyn RngCore` to any engine call; the same inputs
/// always plant the same error.
pub fn make_rng(title: &str, round: u32, discriminator: &str) -> SmallRng {
    SmallRng::seed_from_u64(make_seed(title, round, discriminator))
}
