//! Monte Carlo house-edge estimate per variant.
//!
//! Each trial plays one round with the configured strategy against a scratch wallet that
//! holds exactly the entry fee; the net is the final balance minus the fee.

use crate::{config::StrategyConfig, runner::play_round};
use anyhow::Result;
use highlow_execution::{GameRng, Ledger, RandomDeck, Session, Variant, Wallet};
use highlow_types::casino::{Stats, VariantId};
use serde::Serialize;

#[derive(Clone, Debug, Default)]
pub struct EdgeStats {
    trials: u64,
    total_net: f64,
    total_net_sq: f64,
    total_wagered: f64,
}

impl EdgeStats {
    pub fn add(&mut self, net: i64, wagered: u64) {
        let n = net as f64;
        self.trials += 1;
        self.total_net += n;
        self.total_net_sq += n * n;
        self.total_wagered += wagered as f64;
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn mean_net(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_net / self.trials as f64
        }
    }

    pub fn mean_wagered(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_wagered / self.trials as f64
        }
    }

    /// Fraction of the wager the house keeps on average.
    pub fn house_edge(&self) -> f64 {
        let mw = self.mean_wagered();
        if mw == 0.0 {
            0.0
        } else {
            -self.mean_net() / mw
        }
    }

    pub fn stderr(&self) -> f64 {
        if self.trials <= 1 {
            return 0.0;
        }
        let mean = self.mean_net();
        let var = (self.total_net_sq / self.trials as f64) - mean * mean;
        let var = if var < 0.0 { 0.0 } else { var };
        (var / self.trials as f64).sqrt()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRow {
    pub variant: VariantId,
    pub trials: u64,
    pub avg_wagered: f64,
    pub avg_net: f64,
    pub edge: f64,
    pub stderr: f64,
}

impl EdgeRow {
    fn new(variant: VariantId, stats: &EdgeStats) -> Self {
        Self {
            variant,
            trials: stats.trials(),
            avg_wagered: stats.mean_wagered(),
            avg_net: stats.mean_net(),
            edge: stats.house_edge(),
            stderr: stats.stderr(),
        }
    }
}

pub async fn estimate(
    variant: VariantId,
    strategy: &StrategyConfig,
    trials: u64,
    seed: u64,
) -> Result<EdgeRow> {
    let mut rng = GameRng::seeded(seed);
    let mut deck = RandomDeck::seeded(seed.wrapping_add(1));
    let mut stats = EdgeStats::default();
    let entry_cost = Variant::new(variant).entry_cost();

    for _ in 0..trials {
        let mut wallet = Wallet::new(entry_cost);
        let mut session =
            Session::start(Variant::new(variant), deck, &mut wallet, &Stats::default()).await?;
        play_round(&mut session, &mut wallet, strategy, &mut rng).await?;
        deck = session.into_deck();

        let net = wallet.balance() as i64 - entry_cost as i64;
        stats.add(net, entry_cost);
    }
    Ok(EdgeRow::new(variant, &stats))
}
