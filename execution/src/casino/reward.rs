//! Shared reward pipeline.
//!
//! A reward is built in four steps:
//! 1. risk reward: `floor(base_payout * 100 / max(probability, 1))`
//! 2. bonus: risk reward times a variant-specific bonus
//! 3. house edge: `floor(bonus_reward * (1 - edge / 100))`
//! 4. variance: `floor(adjusted * factor)` with `factor` uniform in `[0.9, 1.1)`
//!
//! and is never less than [`MIN_REWARD`].

use super::VarianceSource;
use highlow_types::casino::MIN_REWARD;

/// Per-variant reward constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardSchedule {
    pub base_payout: u64,
    /// House edge in percent (2.5 = 2.5%).
    pub house_edge_pct: f64,
}

impl RewardSchedule {
    /// Step 1: lower probability guesses are worth more. Probability 0 is treated as 1.
    pub fn risk_reward(&self, probability: u8) -> f64 {
        (self.base_payout as f64 * (100.0 / probability.max(1) as f64)).floor()
    }

    /// Steps 3-4 plus the floor at [`MIN_REWARD`].
    pub fn settle(&self, bonus_reward: f64, rng: &mut dyn VarianceSource) -> u64 {
        let adjusted = apply_house_edge(bonus_reward, self.house_edge_pct);
        finalize(apply_variance(adjusted, rng.variance_factor()))
    }

    /// Full pipeline for variants whose bonus is a single factor.
    pub fn reward(&self, probability: u8, bonus: f64, rng: &mut dyn VarianceSource) -> u64 {
        self.settle(self.risk_reward(probability) * bonus, rng)
    }
}

pub fn apply_house_edge(reward: f64, house_edge_pct: f64) -> f64 {
    (reward * (1.0 - house_edge_pct / 100.0)).floor()
}

pub fn apply_variance(reward: f64, factor: f64) -> f64 {
    (reward * factor).floor()
}

fn finalize(reward: f64) -> u64 {
    if reward < MIN_REWARD as f64 {
        MIN_REWARD
    } else {
        // Saturating float-to-int cast
        reward as u64
    }
}
