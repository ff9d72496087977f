use crate::config::{Config, StrategyConfig};
use anyhow::{Context, Result};
use highlow_execution::{
    analysis::{profit_loss, variant_reports, ProfitLoss, VariantReport},
    state::{load_highscores, load_stats, load_wallet},
    CardSource, GameRng, Key, Ledger, RandomDeck, Session, SessionError, Status, Store, Value,
    Variant, VarianceSource,
};
use highlow_types::casino::{Guess, Highscores, Stats};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Direction with the better odds; ties go higher.
pub fn pick_guess(probabilities: (u8, u8)) -> Guess {
    let (higher, lower) = probabilities;
    if higher >= lower {
        Guess::Higher
    } else {
        Guess::Lower
    }
}

/// Play one started round to its end. Returns the number of guesses made.
pub async fn play_round<D: CardSource, L: Ledger>(
    session: &mut Session<D>,
    ledger: &mut L,
    strategy: &StrategyConfig,
    rng: &mut dyn VarianceSource,
) -> Result<u32, SessionError> {
    let mut guesses = 0;
    while guesses < strategy.max_guesses {
        if strategy.use_actions {
            if let Some(action) = session.special_actions().first() {
                session.use_action(action.id)?;
            }
        }
        let guess = pick_guess(session.probabilities().ok_or(SessionError::NoCard)?);
        let outcome = session.guess(guess, rng).await?;
        guesses += 1;
        debug!(log = %outcome.log, "simulated guess");
        if outcome.round_over {
            return Ok(guesses);
        }
        if session.state().score >= strategy.cash_out_at {
            break;
        }
    }
    session.cash_out(ledger)?;
    Ok(guesses)
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub seed: u64,
    pub sessions_played: u64,
    pub sessions_won: u64,
    pub final_balance: u64,
    pub stats: Stats,
    pub highscores: Highscores,
    pub profit_loss: ProfitLoss,
    pub variants: Vec<VariantReport>,
}

/// Run `config.sessions` rounds against `store`, persisting after every round.
pub async fn run<S: Store>(config: &Config, seed: u64, store: &mut S) -> Result<SimulationReport> {
    config.validate()?;
    let mut wallet = load_wallet(store, config.starting_balance).await?;
    let mut stats = load_stats(store).await?;
    let mut highscores = load_highscores(store).await?;
    let mut rng = GameRng::seeded(seed);
    let mut deck = RandomDeck::seeded(seed.wrapping_add(1));

    let mut sessions_played = 0;
    let mut sessions_won = 0;
    for index in 0..config.sessions {
        let variant_id = config.variants[(index % config.variants.len() as u64) as usize];
        let variant = Variant::new(variant_id);
        if wallet.balance() < variant.entry_cost() {
            warn!(
                variant = %variant_id,
                balance = wallet.balance(),
                "balance exhausted, stopping"
            );
            break;
        }

        let mut session = Session::start(variant, deck, &mut wallet, &stats).await?;
        let guesses = play_round(&mut session, &mut wallet, &config.strategy, &mut rng).await?;
        let settlement = session.settle(&mut wallet, &mut stats, &mut highscores, &config.player)?;
        deck = session.into_deck();

        sessions_played += 1;
        if settlement.won {
            sessions_won += 1;
        }
        info!(
            session = index,
            variant = %variant_id,
            guesses,
            score = settlement.final_score,
            won = settlement.won,
            balance = wallet.balance(),
            "session finished"
        );

        store
            .apply(vec![
                (Key::Wallet, Status::Update(Value::Wallet(wallet.clone()))),
                (Key::Stats, Status::Update(Value::Stats(stats.clone()))),
                (
                    Key::Highscores,
                    Status::Update(Value::Highscores(highscores.clone())),
                ),
            ])
            .await
            .context("persist session")?;
    }

    Ok(SimulationReport {
        seed,
        sessions_played,
        sessions_won,
        final_balance: wallet.balance(),
        profit_loss: profit_loss(wallet.transactions()),
        variants: variant_reports(wallet.transactions()),
        stats,
        highscores,
    })
}
