//! Streak Master variant.
//!
//! Rewards grow exponentially with the streak (`1.3^min(streak, 15)`) and are scaled by the
//! session multiplier, which rises by 0.1 on every correct guess up to 10.
//!
//! Losing is softened: a wrong guess keeps 25% of the score. Two special actions:
//! - streak shield (50 points): absorbs one wrong guess at the price of 25% of the score
//! - multiplier boost (100 points): +0.5 multiplier for three guesses, then rolled back

use super::reward::RewardSchedule;
use super::{GameVariant, SpecialAction, VarianceSource};
use highlow_types::casino::{
    ActionId, Difficulty, SessionState, SpecialMode, StatePatch, VariantId, VariantInfo,
    BASE_MULTIPLIER,
};

pub const ENTRY_COST: u64 = 150;
pub const MAX_MULTIPLIER: f64 = 10.0;
pub const MULTIPLIER_STEP: f64 = 0.1;

pub const SCHEDULE: RewardSchedule = RewardSchedule {
    base_payout: 12,
    house_edge_pct: 3.0,
};

pub const STREAK_BONUS_BASE: f64 = 1.3;
/// Streak beyond which the exponential bonus stops growing.
pub const STREAK_BONUS_CAP: u32 = 15;

pub const SHIELD_COST: u64 = 50;
pub const SHIELD_MIN_STREAK: u32 = 3;

pub const BOOST_COST: u64 = 100;
pub const BOOST_MIN_STREAK: u32 = 5;
pub const BOOST_AMOUNT: f64 = 0.5;
/// Guesses a boost lasts.
pub const BOOST_DURATION: u32 = 3;

pub fn exponential_bonus(streak: u32) -> f64 {
    STREAK_BONUS_BASE.powf(streak.min(STREAK_BONUS_CAP) as f64)
}

/// Score kept when a shield absorbs a wrong guess (75%, floored).
pub fn shielded_score(score: u64) -> u64 {
    (score as u128 * 3 / 4) as u64
}

/// Score kept when a round is lost (25%, floored).
pub fn soft_landing_score(score: u64) -> u64 {
    score / 4
}

/// A running boost must expire before a shield can replace it.
pub fn can_raise_shield(state: &SessionState) -> bool {
    state.streak >= SHIELD_MIN_STREAK
        && state.score >= SHIELD_COST
        && state.special_mode.is_none()
}

pub fn can_boost(state: &SessionState) -> bool {
    state.streak >= BOOST_MIN_STREAK
        && state.score >= BOOST_COST
        && state.multiplier < MAX_MULTIPLIER
        && state.special_mode != Some(SpecialMode::MultiplierBoost)
}

pub fn raise_shield(state: &SessionState) -> StatePatch {
    StatePatch {
        score: Some(state.score.saturating_sub(SHIELD_COST)),
        special_mode: Some(Some(SpecialMode::StreakShield)),
        ..Default::default()
    }
}

pub fn boost(state: &SessionState) -> StatePatch {
    StatePatch {
        score: Some(state.score.saturating_sub(BOOST_COST)),
        multiplier: Some((state.multiplier + BOOST_AMOUNT).min(MAX_MULTIPLIER)),
        special_mode: Some(Some(SpecialMode::MultiplierBoost)),
        time_left: Some(Some(BOOST_DURATION)),
        ..Default::default()
    }
}

pub struct StreakMaster;

impl GameVariant for StreakMaster {
    const ID: VariantId = VariantId::StreakMaster;

    fn info() -> VariantInfo {
        VariantInfo {
            id: Self::ID,
            name: "Streak Master",
            description: "Build massive win streaks for exponential rewards!",
            icon: "⚡",
            entry_cost: ENTRY_COST,
            difficulty: Difficulty::Medium,
            features: &["Exponential Multipliers", "Streak Focus", "Bonus Actions"],
            max_multiplier: MAX_MULTIPLIER,
        }
    }

    fn calculate_reward(
        probability: u8,
        streak: u32,
        multiplier: f64,
        rng: &mut dyn VarianceSource,
    ) -> u64 {
        let bonus_reward =
            SCHEDULE.risk_reward(probability) * exponential_bonus(streak) * multiplier;
        SCHEDULE.settle(bonus_reward, rng)
    }

    fn process_guess(
        state: &SessionState,
        is_correct: bool,
        probability: u8,
        rng: &mut dyn VarianceSource,
    ) -> StatePatch {
        if !is_correct {
            if state.special_mode == Some(SpecialMode::StreakShield) {
                // Shield absorbs the loss; the round and the streak carry on
                return StatePatch {
                    special_mode: Some(None),
                    score: Some(shielded_score(state.score)),
                    ..Default::default()
                };
            }
            return StatePatch {
                game_over: Some(true),
                score: Some(soft_landing_score(state.score)),
                multiplier: Some(BASE_MULTIPLIER),
                ..Default::default()
            };
        }

        let streak = state.streak.saturating_add(1);
        let points = Self::calculate_reward(probability, streak, state.multiplier, rng);
        let mut multiplier = (state.multiplier + MULTIPLIER_STEP).min(MAX_MULTIPLIER);
        let mut patch = StatePatch {
            score: Some(state.score.saturating_add(points)),
            streak: Some(streak),
            ..Default::default()
        };

        if state.special_mode == Some(SpecialMode::MultiplierBoost) {
            let time_left = state.time_left.unwrap_or(0).saturating_sub(1);
            if time_left == 0 {
                patch.special_mode = Some(None);
                patch.time_left = Some(None);
                multiplier = (multiplier - BOOST_AMOUNT).max(BASE_MULTIPLIER);
            } else {
                patch.time_left = Some(Some(time_left));
            }
        }

        patch.multiplier = Some(multiplier);
        patch
    }

    fn action_catalog(state: &SessionState) -> Vec<SpecialAction> {
        vec![
            SpecialAction {
                id: ActionId::StreakShield,
                name: "Streak Shield",
                description: "Protect your streak! Your next wrong guess costs a quarter \
                    of your score instead of the round.",
                icon: "🛡️",
                cost: SHIELD_COST,
                available: can_raise_shield(state),
            },
            SpecialAction {
                id: ActionId::MultiplierBoost,
                name: "Multiplier Boost",
                description: "Increase your multiplier by 0.5x for the next 3 rounds.",
                icon: "🚀",
                cost: BOOST_COST,
                available: can_boost(state),
            },
        ]
    }
}
