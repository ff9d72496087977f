//! Special action catalog.
//!
//! Actions are recomputed from the session state on every change and never persisted.

use super::{action_catalog, double_or_nothing, streak_master};
use highlow_types::casino::{ActionId, SessionState, StatePatch, VariantId};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{variant} does not offer {action}")]
    NotOffered { action: ActionId, variant: VariantId },
    #[error("{0} is not available right now")]
    Unavailable(ActionId),
}

/// A special action as offered against one session state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialAction {
    pub id: ActionId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Points deducted from the score.
    pub cost: u64,
    /// Availability against the state the action was listed for.
    pub available: bool,
}

impl SpecialAction {
    /// Patch applying this action to `state`.
    ///
    /// Availability is not re-checked here; see [`try_execute_action`].
    pub fn execute(&self, state: &SessionState) -> StatePatch {
        execute_action(self.id, state)
    }
}

/// Patch for `action` against `state`, without validation.
pub fn execute_action(action: ActionId, state: &SessionState) -> StatePatch {
    match action {
        ActionId::DoubleOrNothing => double_or_nothing::double_down(state),
        ActionId::StreakShield => streak_master::raise_shield(state),
        ActionId::MultiplierBoost => streak_master::boost(state),
    }
}

/// Validate `action` against the variant's catalog for `state`, then execute it.
pub fn try_execute_action(
    variant: VariantId,
    action: ActionId,
    state: &SessionState,
) -> Result<StatePatch, ActionError> {
    let offered = action_catalog(variant, state)
        .into_iter()
        .find(|candidate| candidate.id == action)
        .ok_or(ActionError::NotOffered { action, variant })?;
    if !offered.available {
        return Err(ActionError::Unavailable(action));
    }
    Ok(offered.execute(state))
}
