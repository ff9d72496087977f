use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown game variant: {0}")]
pub struct UnknownVariantError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown special action: {0}")]
pub struct UnknownActionError(pub String);

/// Identifier of a game variant. The set is closed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum VariantId {
    Classic,
    DoubleOrNothing,
    StreakMaster,
}

impl VariantId {
    /// All variants in registry order.
    pub const ALL: [VariantId; 3] = [
        VariantId::Classic,
        VariantId::DoubleOrNothing,
        VariantId::StreakMaster,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VariantId::Classic => "classic",
            VariantId::DoubleOrNothing => "double-or-nothing",
            VariantId::StreakMaster => "streak-master",
        }
    }
}

impl FromStr for VariantId {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownVariantError(s.to_string()))
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        };
        f.write_str(label)
    }
}

/// Static metadata describing a variant.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantInfo {
    pub id: VariantId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Balance debited to start a round.
    pub entry_cost: u64,
    pub difficulty: Difficulty,
    pub features: &'static [&'static str],
    /// Upper bound on the session multiplier.
    pub max_multiplier: f64,
}

/// Identifier of a special action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    DoubleOrNothing,
    StreakShield,
    MultiplierBoost,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::DoubleOrNothing => "double-or-nothing",
            ActionId::StreakShield => "streak-shield",
            ActionId::MultiplierBoost => "multiplier-boost",
        }
    }
}

impl FromStr for ActionId {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ActionId::DoubleOrNothing,
            ActionId::StreakShield,
            ActionId::MultiplierBoost,
        ]
        .into_iter()
        .find(|id| id.as_str() == s)
        .ok_or_else(|| UnknownActionError(s.to_string()))
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
