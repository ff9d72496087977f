//! Profit/loss and per-variant reports over a wallet's transaction log.

use highlow_types::casino::{Transaction, TransactionKind, VariantId};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    pub cash_in: u64,
    pub cash_out: u64,
    pub entry_fees: u64,
    /// Sum of game-win credits.
    pub total_profit: u64,
    /// Sum of recorded game losses.
    pub total_loss: u64,
    pub net_profit: i64,
    /// Game-win plus game-loss entries.
    pub total_games: usize,
    /// Percent of finished rounds that were wins.
    pub win_rate: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub biggest_win: u64,
    pub biggest_loss: u64,
    /// Profit over loss; infinite when only wins exist.
    pub profit_factor: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantReport {
    pub variant: VariantId,
    /// Entry fees paid.
    pub played: usize,
    pub total_wagered: u64,
    pub total_won: u64,
    pub net_profit: i64,
    pub win_rate: f64,
    /// Net profit per round played.
    pub avg_session: f64,
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

pub fn profit_loss(transactions: &[Transaction]) -> ProfitLoss {
    let mut report = ProfitLoss::default();
    let mut wins = 0usize;
    let mut losses = 0usize;
    for transaction in transactions {
        let amount = transaction.amount;
        match transaction.kind {
            TransactionKind::CashIn => report.cash_in = report.cash_in.saturating_add(amount),
            TransactionKind::CashOut => report.cash_out = report.cash_out.saturating_add(amount),
            TransactionKind::EntryFee => {
                report.entry_fees = report.entry_fees.saturating_add(amount)
            }
            TransactionKind::GameWin => {
                wins += 1;
                report.total_profit = report.total_profit.saturating_add(amount);
                report.biggest_win = report.biggest_win.max(amount);
            }
            TransactionKind::GameLoss => {
                losses += 1;
                report.total_loss = report.total_loss.saturating_add(amount);
                report.biggest_loss = report.biggest_loss.max(amount);
            }
        }
    }

    report.total_games = wins + losses;
    report.net_profit = signed(report.total_profit).saturating_sub(signed(report.total_loss));
    report.win_rate = percent(wins, report.total_games);
    report.average_win = mean(report.total_profit, wins);
    report.average_loss = mean(report.total_loss, losses);
    report.profit_factor = if report.total_loss > 0 {
        report.total_profit as f64 / report.total_loss as f64
    } else if report.total_profit > 0 {
        f64::INFINITY
    } else {
        0.0
    };
    report
}

/// Per-variant reports in registry order; variants never played are omitted.
pub fn variant_reports(transactions: &[Transaction]) -> Vec<VariantReport> {
    VariantId::ALL
        .into_iter()
        .filter_map(|variant| {
            let mut played = 0usize;
            let mut total_wagered = 0u64;
            let mut total_won = 0u64;
            let mut wins = 0usize;
            let mut losses = 0usize;
            for transaction in transactions.iter().filter(|t| t.variant == Some(variant)) {
                match transaction.kind {
                    TransactionKind::EntryFee => {
                        played += 1;
                        total_wagered = total_wagered.saturating_add(transaction.amount);
                    }
                    TransactionKind::GameWin => {
                        wins += 1;
                        total_won = total_won.saturating_add(transaction.amount);
                    }
                    TransactionKind::GameLoss => losses += 1,
                    TransactionKind::CashIn | TransactionKind::CashOut => {}
                }
            }
            if played == 0 {
                return None;
            }
            let net_profit = signed(total_won).saturating_sub(signed(total_wagered));
            Some(VariantReport {
                variant,
                played,
                total_wagered,
                total_won,
                net_profit,
                win_rate: percent(wins, wins + losses),
                avg_session: net_profit as f64 / played as f64,
            })
        })
        .collect()
}

/// Transactions at or after `timestamp_ms`.
pub fn since(transactions: &[Transaction], timestamp_ms: u64) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.timestamp_ms >= timestamp_ms)
        .collect()
}
