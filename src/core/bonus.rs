use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BonusRoll;

/// Seedable source for cosmetic food bonuses.
#[derive(Debug, Clone)]
pub struct BonusSource {
    rng: StdRng,
}

impl BonusSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    /// Returns `Some(bonus)` when the roll succeeds. A zero-sized bonus counts
    /// as no bonus.
    pub fn roll(&mut self, roll: &BonusRoll) -> Option<u32> {
        if roll.chance <= 0.0 || roll.max == 0 || roll.min > roll.max {
            return None;
        }
        if roll.chance < 1.0 && !self.rng.gen_bool(roll.chance) {
            return None;
        }
        let amount = self.rng.gen_range(roll.min..=roll.max);
        (amount > 0).then_some(amount)
    }
}
