//! Double or Nothing variant.
//!
//! High volatility: the session multiplier feeds straight into every reward, and the
//! "double-or-nothing" action stakes the whole score on the next guess. A correct guess pays
//! double, a wrong one wipes the score.
//!
//! Multiplier: +0.3 on every second consecutive correct guess, ×2 on activating the action,
//! capped at 8.0.

use super::reward::RewardSchedule;
use super::{GameVariant, SpecialAction, VarianceSource};
use highlow_types::casino::{
    ActionId, Difficulty, SessionState, SpecialMode, StatePatch, VariantId, VariantInfo,
    BASE_MULTIPLIER,
};

pub const ENTRY_COST: u64 = 200;
pub const MAX_MULTIPLIER: f64 = 8.0;
pub const MULTIPLIER_STEP: f64 = 0.3;
pub const MULTIPLIER_MILESTONE: u32 = 2;

pub const SCHEDULE: RewardSchedule = RewardSchedule {
    base_payout: 15,
    house_edge_pct: 3.5,
};

/// Bonus is the session multiplier itself, never below 1.
pub fn multiplier_bonus(multiplier: f64) -> f64 {
    if multiplier > 1.0 {
        multiplier
    } else {
        1.0
    }
}

/// Availability of the double-or-nothing action.
pub fn can_double_down(state: &SessionState) -> bool {
    state.score > 0 && !state.double_or_nothing_active
}

/// Stake the score on the next guess.
pub fn double_down(state: &SessionState) -> StatePatch {
    StatePatch {
        double_or_nothing_active: Some(true),
        special_mode: Some(Some(SpecialMode::DoubleOrNothing)),
        multiplier: Some((state.multiplier * 2.0).min(MAX_MULTIPLIER)),
        ..Default::default()
    }
}

pub struct DoubleOrNothing;

impl GameVariant for DoubleOrNothing {
    const ID: VariantId = VariantId::DoubleOrNothing;

    fn info() -> VariantInfo {
        VariantInfo {
            id: Self::ID,
            name: "Double or Nothing",
            description: "Risk everything for double rewards! Cash out or lose it all.",
            icon: "💎",
            entry_cost: ENTRY_COST,
            difficulty: Difficulty::Hard,
            features: &["Double Rewards", "All-or-Nothing", "High Volatility"],
            max_multiplier: MAX_MULTIPLIER,
        }
    }

    fn calculate_reward(
        probability: u8,
        _streak: u32,
        multiplier: f64,
        rng: &mut dyn VarianceSource,
    ) -> u64 {
        SCHEDULE.reward(probability, multiplier_bonus(multiplier), rng)
    }

    fn process_guess(
        state: &SessionState,
        is_correct: bool,
        probability: u8,
        rng: &mut dyn VarianceSource,
    ) -> StatePatch {
        if !is_correct {
            let score = if state.double_or_nothing_active {
                0
            } else {
                state.score
            };
            return StatePatch {
                score: Some(score),
                game_over: Some(true),
                double_or_nothing_active: Some(false),
                special_mode: Some(None),
                multiplier: Some(BASE_MULTIPLIER),
                ..Default::default()
            };
        }

        let streak = state.streak.saturating_add(1);
        let base_points = Self::calculate_reward(probability, streak, state.multiplier, rng);
        let points = if state.double_or_nothing_active {
            base_points.saturating_mul(2)
        } else {
            base_points
        };
        let multiplier = if streak % MULTIPLIER_MILESTONE == 0 {
            (state.multiplier + MULTIPLIER_STEP).min(MAX_MULTIPLIER)
        } else {
            state.multiplier
        };

        StatePatch {
            score: Some(state.score.saturating_add(points)),
            streak: Some(streak),
            multiplier: Some(multiplier),
            double_or_nothing_active: Some(false),
            special_mode: Some(None),
            ..Default::default()
        }
    }

    fn action_catalog(state: &SessionState) -> Vec<SpecialAction> {
        vec![SpecialAction {
            id: ActionId::DoubleOrNothing,
            name: "Double or Nothing",
            description: "Risk all your current points to double your next win!",
            icon: "💎",
            cost: 0,
            available: can_double_down(state),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::FixedVariance;
    use proptest::prelude::*;

    fn state_with(score: u64, streak: u32, multiplier: f64, active: bool) -> SessionState {
        SessionState {
            score,
            streak,
            multiplier,
            double_or_nothing_active: active,
            special_mode: active.then_some(SpecialMode::DoubleOrNothing),
            ..SessionState::default()
        }
    }

    #[test]
    fn test_multiplier_bonus_passthrough() {
        assert_eq!(multiplier_bonus(1.0), 1.0);
        assert_eq!(multiplier_bonus(0.5), 1.0);
        assert_eq!(multiplier_bonus(2.6), 2.6);
    }

    #[test]
    fn test_reward_uses_multiplier() {
        let mut rng = FixedVariance(1.0);
        // floor(15 * 100 / 50) = 30; floor(30 * 0.965) = 28
        assert_eq!(DoubleOrNothing::calculate_reward(50, 1, 1.0, &mut rng), 28);
        // 30 * 2 = 60; floor(60 * 0.965) = 57
        assert_eq!(DoubleOrNothing::calculate_reward(50, 1, 2.0, &mut rng), 57);
    }

    #[test]
    fn test_active_incorrect_loses_everything() {
        let mut rng = FixedVariance(1.0);
        let state = state_with(480, 6, 4.0, true);
        let patch = DoubleOrNothing::process_guess(&state, false, 46, &mut rng);
        assert_eq!(patch.score, Some(0));
        assert_eq!(patch.game_over, Some(true));
        assert_eq!(patch.double_or_nothing_active, Some(false));
        assert_eq!(patch.special_mode, Some(None));
        assert_eq!(patch.multiplier, Some(BASE_MULTIPLIER));
    }

    #[test]
    fn test_inactive_incorrect_keeps_score() {
        let mut rng = FixedVariance(1.0);
        let state = state_with(480, 6, 4.0, false);
        let patch = DoubleOrNothing::process_guess(&state, false, 46, &mut rng);
        assert_eq!(patch.score, Some(480));
        assert_eq!(patch.game_over, Some(true));
    }

    #[test]
    fn test_active_correct_pays_double() {
        let mut rng = FixedVariance(1.0);
        let active = state_with(100, 2, 2.0, true);
        let inactive = state_with(100, 2, 2.0, false);
        let base = DoubleOrNothing::calculate_reward(50, 3, 2.0, &mut rng);

        let doubled = DoubleOrNothing::process_guess(&active, true, 50, &mut rng);
        let single = DoubleOrNothing::process_guess(&inactive, true, 50, &mut rng);
        assert_eq!(doubled.score, Some(100 + 2 * base));
        assert_eq!(single.score, Some(100 + base));

        // Consumed after one guess
        assert_eq!(doubled.double_or_nothing_active, Some(false));
        assert_eq!(doubled.special_mode, Some(None));
    }

    #[test]
    fn test_multiplier_grows_every_second_streak() {
        let mut rng = FixedVariance(1.0);
        let state = state_with(10, 0, 1.0, false);
        let patch = DoubleOrNothing::process_guess(&state, true, 46, &mut rng);
        assert_eq!(patch.multiplier, Some(1.0));
        let state = state_with(10, 1, 1.0, false);
        let patch = DoubleOrNothing::process_guess(&state, true, 46, &mut rng);
        assert!((patch.multiplier.unwrap() - 1.3).abs() < 1e-9);
        let state = state_with(10, 1, 7.9, false);
        let patch = DoubleOrNothing::process_guess(&state, true, 46, &mut rng);
        assert_eq!(patch.multiplier, Some(MAX_MULTIPLIER));
    }

    #[test]
    fn test_action_availability() {
        assert!(!can_double_down(&state_with(0, 3, 1.0, false)));
        assert!(!can_double_down(&state_with(50, 3, 1.0, true)));
        assert!(can_double_down(&state_with(50, 0, 1.0, false)));

        let catalog = DoubleOrNothing::action_catalog(&state_with(50, 0, 1.0, false));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, ActionId::DoubleOrNothing);
        assert_eq!(catalog[0].cost, 0);
        assert!(catalog[0].available);
    }

    #[test]
    fn test_double_down_doubles_multiplier_with_cap() {
        let patch = double_down(&state_with(50, 0, 1.5, false));
        assert_eq!(patch.double_or_nothing_active, Some(true));
        assert_eq!(patch.special_mode, Some(Some(SpecialMode::DoubleOrNothing)));
        assert_eq!(patch.multiplier, Some(3.0));
        assert_eq!(patch.score, None);

        let patch = double_down(&state_with(50, 0, 5.0, false));
        assert_eq!(patch.multiplier, Some(MAX_MULTIPLIER));
    }

    proptest! {
        #[test]
        fn prop_multiplier_never_exceeds_cap(
            steps in proptest::collection::vec(any::<bool>(), 1..200),
            probability in 1u8..=100,
        ) {
            let mut rng = FixedVariance(1.0);
            let mut state = SessionState::default();
            // Each step is a correct guess, optionally preceded by doubling down
            for double in steps {
                if double && can_double_down(&state) {
                    state = state.apply(&double_down(&state));
                    prop_assert!(state.multiplier <= MAX_MULTIPLIER);
                }
                let patch = DoubleOrNothing::process_guess(&state, true, probability, &mut rng);
                state = state.apply(&patch);
                prop_assert!(state.multiplier >= BASE_MULTIPLIER);
                prop_assert!(state.multiplier <= MAX_MULTIPLIER);
            }
        }
    }
}
