//! Game-variant reward engine.
//!
//! This module contains the rules for every variant:
//! - Classic
//! - Double or Nothing
//! - Streak Master
//!
//! Every function here is pure apart from the reward variance draw, which is taken from an
//! injected [`VarianceSource`]. Guess processing never mutates a [`SessionState`]; it returns
//! a [`StatePatch`] for the caller to merge.

pub mod actions;
pub mod cards;
pub mod classic;
pub mod double_or_nothing;
pub mod logging;
pub mod registry;
pub mod reward;
pub mod streak_master;

use highlow_types::casino::{
    Card, Rank, SessionState, StatePatch, Suit, VariantId, VariantInfo, VARIANCE_MAX,
    VARIANCE_MIN,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub use actions::{execute_action, try_execute_action, ActionError, SpecialAction};
pub use cards::{is_guess_correct, win_probability};
pub use registry::{expected_return, list_variants, variant_by_id, Variant};

/// Source of the ±10% reward variance factor.
pub trait VarianceSource {
    /// Uniform draw from `[VARIANCE_MIN, VARIANCE_MAX)`.
    fn variance_factor(&mut self) -> f64;
}

/// Process-wide uniform random source.
///
/// Seeded from OS entropy by default. [`GameRng::seeded`] exists for reproducible simulator
/// runs; two unseeded instances never share a seed relation.
#[derive(Clone, Debug)]
pub struct GameRng {
    rng: StdRng,
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRng {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a card uniformly over 13 ranks and 4 suits, with replacement.
    pub fn draw_card(&mut self) -> Card {
        let rank = Rank::ALL[self.rng.gen_range(0..Rank::ALL.len())];
        let suit = Suit::ALL[self.rng.gen_range(0..Suit::ALL.len())];
        Card::new(rank, suit)
    }
}

impl VarianceSource for GameRng {
    fn variance_factor(&mut self) -> f64 {
        self.rng.gen_range(VARIANCE_MIN..VARIANCE_MAX)
    }
}

/// Rules of a single variant.
pub trait GameVariant {
    const ID: VariantId;

    /// Static metadata (entry cost, cap, display strings).
    fn info() -> VariantInfo;

    /// Points paid for a correct guess at `probability` percent.
    fn calculate_reward(
        probability: u8,
        streak: u32,
        multiplier: f64,
        rng: &mut dyn VarianceSource,
    ) -> u64;

    /// Next-state patch for a resolved guess.
    fn process_guess(
        state: &SessionState,
        is_correct: bool,
        probability: u8,
        rng: &mut dyn VarianceSource,
    ) -> StatePatch;

    /// Every special action of the variant with its availability against `state`.
    fn action_catalog(_state: &SessionState) -> Vec<SpecialAction> {
        Vec::new()
    }
}

/// Dispatch reward calculation to the appropriate variant module.
pub fn calculate_reward(
    variant: VariantId,
    probability: u8,
    streak: u32,
    multiplier: f64,
    rng: &mut dyn VarianceSource,
) -> u64 {
    match variant {
        VariantId::Classic => {
            classic::Classic::calculate_reward(probability, streak, multiplier, rng)
        }
        VariantId::DoubleOrNothing => double_or_nothing::DoubleOrNothing::calculate_reward(
            probability,
            streak,
            multiplier,
            rng,
        ),
        VariantId::StreakMaster => {
            streak_master::StreakMaster::calculate_reward(probability, streak, multiplier, rng)
        }
    }
}

/// Dispatch guess processing to the appropriate variant module.
pub fn process_guess(
    variant: VariantId,
    state: &SessionState,
    is_correct: bool,
    probability: u8,
    rng: &mut dyn VarianceSource,
) -> StatePatch {
    match variant {
        VariantId::Classic => classic::Classic::process_guess(state, is_correct, probability, rng),
        VariantId::DoubleOrNothing => {
            double_or_nothing::DoubleOrNothing::process_guess(state, is_correct, probability, rng)
        }
        VariantId::StreakMaster => {
            streak_master::StreakMaster::process_guess(state, is_correct, probability, rng)
        }
    }
}

/// All special actions of `variant`, available or not, in display order.
pub fn action_catalog(variant: VariantId, state: &SessionState) -> Vec<SpecialAction> {
    match variant {
        VariantId::Classic => classic::Classic::action_catalog(state),
        VariantId::DoubleOrNothing => double_or_nothing::DoubleOrNothing::action_catalog(state),
        VariantId::StreakMaster => streak_master::StreakMaster::action_catalog(state),
    }
}

/// Special actions the player can take right now.
pub fn special_actions(variant: VariantId, state: &SessionState) -> Vec<SpecialAction> {
    action_catalog(variant, state)
        .into_iter()
        .filter(|action| action.available)
        .collect()
}

/// Static metadata for a variant.
pub fn variant_info(variant: VariantId) -> VariantInfo {
    match variant {
        VariantId::Classic => classic::Classic::info(),
        VariantId::DoubleOrNothing => double_or_nothing::DoubleOrNothing::info(),
        VariantId::StreakMaster => streak_master::StreakMaster::info(),
    }
}
