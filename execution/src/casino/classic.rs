//! Classic variant.
//!
//! Balanced payouts with a streak-tiered bonus. A wrong guess ends the round; the score
//! earned so far is kept for cash-out decisions made by the caller.
//!
//! Multiplier: +0.2 on every third consecutive correct guess, capped at 2.5. The reward
//! bonus depends on the streak alone.

use super::reward::RewardSchedule;
use super::{GameVariant, VarianceSource};
use highlow_types::casino::{
    Difficulty, SessionState, StatePatch, VariantId, VariantInfo, BASE_MULTIPLIER,
};

pub const ENTRY_COST: u64 = 100;
pub const MAX_MULTIPLIER: f64 = 2.5;
pub const MULTIPLIER_STEP: f64 = 0.2;
/// Streak interval at which the multiplier grows.
pub const MULTIPLIER_MILESTONE: u32 = 3;

pub const SCHEDULE: RewardSchedule = RewardSchedule {
    base_payout: 8,
    house_edge_pct: 2.5,
};

/// Streak bonus tiers.
pub fn streak_bonus(streak: u32) -> f64 {
    match streak {
        0..=2 => 1.0,
        3..=4 => 1.2,
        5..=7 => 1.5,
        8..=11 => 2.0,
        _ => 2.5,
    }
}

pub struct Classic;

impl GameVariant for Classic {
    const ID: VariantId = VariantId::Classic;

    fn info() -> VariantInfo {
        VariantInfo {
            id: Self::ID,
            name: "Classic Casino",
            description: "Traditional Higher/Lower with balanced rewards and fair house odds.",
            icon: "🎯",
            entry_cost: ENTRY_COST,
            difficulty: Difficulty::Easy,
            features: &["Balanced Payouts", "Fair House Edge", "Streak Bonuses"],
            max_multiplier: MAX_MULTIPLIER,
        }
    }

    fn calculate_reward(
        probability: u8,
        streak: u32,
        _multiplier: f64,
        rng: &mut dyn VarianceSource,
    ) -> u64 {
        SCHEDULE.reward(probability, streak_bonus(streak), rng)
    }

    fn process_guess(
        state: &SessionState,
        is_correct: bool,
        probability: u8,
        rng: &mut dyn VarianceSource,
    ) -> StatePatch {
        if !is_correct {
            return StatePatch {
                game_over: Some(true),
                multiplier: Some(BASE_MULTIPLIER),
                ..Default::default()
            };
        }

        let streak = state.streak.saturating_add(1);
        let points = Self::calculate_reward(probability, streak, state.multiplier, rng);
        let multiplier = if streak % MULTIPLIER_MILESTONE == 0 {
            (state.multiplier + MULTIPLIER_STEP).min(MAX_MULTIPLIER)
        } else {
            state.multiplier
        };

        StatePatch {
            score: Some(state.score.saturating_add(points)),
            streak: Some(streak),
            multiplier: Some(multiplier),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::FixedVariance;
    use proptest::prelude::*;

    #[test]
    fn test_streak_bonus_tiers() {
        assert_eq!(streak_bonus(0), 1.0);
        assert_eq!(streak_bonus(2), 1.0);
        assert_eq!(streak_bonus(3), 1.2);
        assert_eq!(streak_bonus(4), 1.2);
        assert_eq!(streak_bonus(5), 1.5);
        assert_eq!(streak_bonus(7), 1.5);
        assert_eq!(streak_bonus(8), 2.0);
        assert_eq!(streak_bonus(11), 2.0);
        assert_eq!(streak_bonus(12), 2.5);
        assert_eq!(streak_bonus(100), 2.5);
    }

    #[test]
    fn test_first_correct_guess_at_even_odds() {
        let mut rng = FixedVariance(1.0);
        let state = SessionState::default();
        let patch = Classic::process_guess(&state, true, 50, &mut rng);
        // floor(8 * 100 / 50) = 16, floor(16 * 0.975) = 15
        assert_eq!(patch.score, Some(15));
        assert_eq!(patch.streak, Some(1));
        assert_eq!(patch.multiplier, Some(1.0));
        assert_eq!(patch.game_over, None);
    }

    #[test]
    fn test_reward_ignores_session_multiplier() {
        let mut rng = FixedVariance(1.0);
        assert_eq!(
            Classic::calculate_reward(50, 1, 1.0, &mut rng),
            Classic::calculate_reward(50, 1, 2.4, &mut rng)
        );
    }

    #[test]
    fn test_incorrect_guess_ends_round() {
        let mut rng = FixedVariance(1.0);
        for streak in [0, 1, 5, 40] {
            let state = SessionState {
                score: 300,
                streak,
                multiplier: 2.2,
                ..SessionState::default()
            };
            let patch = Classic::process_guess(&state, false, 46, &mut rng);
            assert_eq!(patch.game_over, Some(true));
            assert_eq!(patch.multiplier, Some(BASE_MULTIPLIER));
            assert_eq!(patch.score, None);
            assert_eq!(patch.streak, None);
        }
    }

    #[test]
    fn test_multiplier_grows_every_third_streak() {
        let mut rng = FixedVariance(1.0);
        let mut state = SessionState::default();
        let mut multipliers = Vec::new();
        for _ in 0..6 {
            let patch = Classic::process_guess(&state, true, 46, &mut rng);
            state = state.apply(&patch);
            multipliers.push(state.multiplier);
        }
        assert_eq!(multipliers[0], 1.0);
        assert_eq!(multipliers[1], 1.0);
        assert!((multipliers[2] - 1.2).abs() < 1e-9);
        assert!((multipliers[4] - 1.2).abs() < 1e-9);
        assert!((multipliers[5] - 1.4).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_multiplier_never_exceeds_cap(
            guesses in 1usize..200,
            probability in 0u8..=100,
            factor in 0.9f64..1.1,
        ) {
            let mut rng = FixedVariance(factor);
            let mut state = SessionState::default();
            for _ in 0..guesses {
                state = state.apply(&Classic::process_guess(&state, true, probability, &mut rng));
                prop_assert!(state.multiplier >= BASE_MULTIPLIER);
                prop_assert!(state.multiplier <= MAX_MULTIPLIER);
            }
        }

        #[test]
        fn prop_reward_at_least_one(
            probability in 0u8..=100,
            streak in 0u32..1_000,
            factor in 0.9f64..1.1,
        ) {
            let mut rng = FixedVariance(factor);
            prop_assert!(Classic::calculate_reward(probability, streak, 1.0, &mut rng) >= 1);
        }
    }
}
