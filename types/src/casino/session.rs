use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Card, Stats, BASE_MULTIPLIER};

/// Temporary mode unlocked by a special action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialMode {
    /// Next correct guess pays double, next wrong guess forfeits the score.
    DoubleOrNothing,
    /// Absorbs one wrong guess.
    StreakShield,
    /// Raised multiplier for a fixed number of guesses (`time_left`).
    MultiplierBoost,
}

impl SpecialMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialMode::DoubleOrNothing => "double-or-nothing",
            SpecialMode::StreakShield => "streak-shield",
            SpecialMode::MultiplierBoost => "multiplier-boost",
        }
    }
}

impl fmt::Display for SpecialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one in-progress round.
///
/// A fresh value is built at round start; the reward engine never mutates it and instead
/// returns a [`StatePatch`] that the owner merges with [`SessionState::apply`]. Only one
/// caller may own and advance a given session between calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub score: u64,
    pub streak: u32,
    pub multiplier: f64,
    pub special_mode: Option<SpecialMode>,
    /// Guesses remaining for a timed special mode.
    pub time_left: Option<u32>,
    pub double_or_nothing_active: bool,
    pub game_over: bool,
    pub game_won: bool,
    pub current_card: Option<Card>,
    pub last_round_card: Option<Card>,
    pub last_round_correct: Option<bool>,
    pub total_games: u64,
    pub best_score: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            streak: 0,
            multiplier: BASE_MULTIPLIER,
            special_mode: None,
            time_left: None,
            double_or_nothing_active: false,
            game_over: false,
            game_won: false,
            current_card: None,
            last_round_card: None,
            last_round_correct: None,
            total_games: 0,
            best_score: 0,
        }
    }
}

impl SessionState {
    /// Start a round on `first_card`, carrying the running statistics forward.
    pub fn new(first_card: Card, stats: &Stats) -> Self {
        Self {
            current_card: Some(first_card),
            total_games: stats.total_games,
            best_score: stats.best_score,
            ..Self::default()
        }
    }

    /// Whether the round has ended, by loss or by cash-out.
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_won
    }

    /// Return the state with every field set in `patch` replaced.
    pub fn apply(&self, patch: &StatePatch) -> Self {
        let mut next = self.clone();
        if let Some(score) = patch.score {
            next.score = score;
        }
        if let Some(streak) = patch.streak {
            next.streak = streak;
        }
        if let Some(multiplier) = patch.multiplier {
            next.multiplier = multiplier;
        }
        if let Some(special_mode) = patch.special_mode {
            next.special_mode = special_mode;
        }
        if let Some(time_left) = patch.time_left {
            next.time_left = time_left;
        }
        if let Some(active) = patch.double_or_nothing_active {
            next.double_or_nothing_active = active;
        }
        if let Some(game_over) = patch.game_over {
            next.game_over = game_over;
        }
        next
    }
}

/// Sparse update to a [`SessionState`].
///
/// `None` leaves a field untouched. The nested options on `special_mode` and `time_left`
/// distinguish "leave as is" (`None`) from "clear" (`Some(None)`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatePatch {
    pub score: Option<u64>,
    pub streak: Option<u32>,
    pub multiplier: Option<f64>,
    pub special_mode: Option<Option<SpecialMode>>,
    pub time_left: Option<Option<u32>>,
    pub double_or_nothing_active: Option<bool>,
    pub game_over: Option<bool>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True if applying this patch ends the round.
    pub fn ends_round(&self) -> bool {
        self.game_over == Some(true)
    }
}
