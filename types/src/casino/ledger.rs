use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::VariantId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds (balance={balance}, requested={requested})")]
    InsufficientFunds { balance: u64, requested: u64 },
    #[error("amount must be positive")]
    ZeroAmount,
}

/// Kind of a wallet transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    CashIn,
    CashOut,
    EntryFee,
    GameWin,
    GameLoss,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::CashIn => "cash-in",
            TransactionKind::CashOut => "cash-out",
            TransactionKind::EntryFee => "entry-fee",
            TransactionKind::GameWin => "game-win",
            TransactionKind::GameLoss => "game-loss",
        }
    }

    /// Whether the transaction adds to the balance.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionKind::CashIn | TransactionKind::GameWin)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only wallet log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: u64,
    pub timestamp_ms: u64,
    pub description: String,
    /// Variant the transaction belongs to, if it came from a round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantId>,
}
