//! Variant registry.
//!
//! The registry is a fixed, ordered catalog of the three variants. Each entry bundles the
//! variant's metadata with its reward calculator, guess processor and action catalog.
//!
//! # Example
//! ```rust
//! use highlow_execution::casino::{list_variants, variant_by_id};
//!
//! let classic = variant_by_id("classic").unwrap();
//! assert_eq!(classic.info().entry_cost, 100);
//! assert_eq!(list_variants().len(), 3);
//! ```

use super::{
    action_catalog, calculate_reward, process_guess, special_actions, variant_info,
    SpecialAction, VarianceSource,
};
use highlow_types::casino::{SessionState, StatePatch, VariantId, VariantInfo};

/// A registered variant.
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    info: VariantInfo,
}

impl Variant {
    pub fn new(id: VariantId) -> Self {
        Self {
            info: variant_info(id),
        }
    }

    pub fn id(&self) -> VariantId {
        self.info.id
    }

    pub fn info(&self) -> &VariantInfo {
        &self.info
    }

    pub fn entry_cost(&self) -> u64 {
        self.info.entry_cost
    }

    pub fn max_multiplier(&self) -> f64 {
        self.info.max_multiplier
    }

    pub fn calculate_reward(
        &self,
        probability: u8,
        streak: u32,
        multiplier: f64,
        rng: &mut dyn VarianceSource,
    ) -> u64 {
        calculate_reward(self.id(), probability, streak, multiplier, rng)
    }

    pub fn process_guess(
        &self,
        state: &SessionState,
        is_correct: bool,
        probability: u8,
        rng: &mut dyn VarianceSource,
    ) -> StatePatch {
        process_guess(self.id(), state, is_correct, probability, rng)
    }

    /// Actions the player can take against `state`.
    pub fn special_actions(&self, state: &SessionState) -> Vec<SpecialAction> {
        special_actions(self.id(), state)
    }

    /// Every action of the variant, including unavailable ones.
    pub fn action_catalog(&self, state: &SessionState) -> Vec<SpecialAction> {
        action_catalog(self.id(), state)
    }
}

/// All variants in declaration order.
pub fn list_variants() -> Vec<Variant> {
    VariantId::ALL.into_iter().map(Variant::new).collect()
}

/// Look up a variant by its identifier (`"classic"`, `"double-or-nothing"`, `"streak-master"`).
pub fn variant_by_id(id: &str) -> Option<Variant> {
    id.parse::<VariantId>().ok().map(Variant::new)
}

/// Diagnostic expected value of one guess at `probability` after paying the entry fee.
///
/// `reward(probability, 1, 1.0) * probability / 100 - entry_cost`
pub fn expected_return(variant: &Variant, probability: u8, rng: &mut dyn VarianceSource) -> f64 {
    let reward = variant.calculate_reward(probability, 1, 1.0, rng) as f64;
    reward * probability as f64 / 100.0 - variant.entry_cost() as f64
}
