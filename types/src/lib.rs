//! Common types used throughout highlow.
//!
//! Everything here is plain data: cards, the per-round session record and the
//! patches the reward engine produces, variant metadata, wallet transactions and
//! cross-session statistics. No game rules live in this crate.

pub mod casino;

pub use casino::{
    ActionId, Card, Difficulty, Guess, HighscoreEntry, HighscoreSummary, Highscores,
    LedgerError, ParseCardError, Rank, SessionState, SpecialMode, StatePatch, Stats, Suit,
    Transaction, TransactionKind, UnknownActionError, UnknownVariantError, VariantId, VariantInfo,
};
