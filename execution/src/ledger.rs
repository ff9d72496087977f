use highlow_types::casino::{
    LedgerError, Transaction, TransactionKind, VariantId, STARTING_BALANCE,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch (0 if the clock is before it).
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Balance plus an append-only transaction log.
pub trait Ledger {
    fn balance(&self) -> u64;

    /// Remove `amount` from the balance. Fails without logging if funds are insufficient.
    fn debit(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    ) -> Result<(), LedgerError>;

    fn credit(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    ) -> Result<(), LedgerError>;

    /// Log an entry without touching the balance.
    fn record(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    );

    /// Oldest first.
    fn transactions(&self) -> &[Transaction];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    balance: u64,
    transactions: Vec<Transaction>,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            transactions: Vec::new(),
        }
    }

    pub fn cash_in(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.credit(TransactionKind::CashIn, amount, "Added funds to wallet", None)
    }

    pub fn cash_out(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.debit(TransactionKind::CashOut, amount, "Withdrew funds from wallet", None)
    }

    fn push(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    ) {
        self.transactions.push(Transaction {
            kind,
            amount,
            timestamp_ms: now_ms(),
            description: description.to_string(),
            variant,
        });
    }
}

impl Ledger for Wallet {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn debit(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        self.push(kind, amount, description, variant);
        Ok(())
    }

    fn credit(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.balance = self.balance.saturating_add(amount);
        self.push(kind, amount, description, variant);
        Ok(())
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        description: &str,
        variant: Option<VariantId>,
    ) {
        self.push(kind, amount, description, variant);
    }

    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
