//! Session orchestrator.
//!
//! A [`Session`] owns one round: it charges the entry fee, draws cards, feeds each resolved
//! guess through the variant's guess processor and merges the resulting patch. It is the
//! single writer of its [`SessionState`].

use crate::{
    casino::{
        is_guess_correct, logging, try_execute_action, win_probability, ActionError,
        SpecialAction, Variant, VarianceSource,
    },
    deck::CardSource,
    ledger::{now_ms, Ledger},
};
use highlow_types::casino::{
    ActionId, Card, Guess, Highscores, LedgerError, SessionState, Stats, StatePatch,
    TransactionKind,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("round is over")]
    RoundOver,
    #[error("round is still in progress")]
    RoundInProgress,
    #[error("round already settled")]
    AlreadySettled,
    #[error("no card in play")]
    NoCard,
    #[error("card draw failed: {0:#}")]
    Draw(anyhow::Error),
}

/// Result of one guess.
#[derive(Clone, Debug)]
pub struct GuessOutcome {
    pub previous: Card,
    pub drawn: Card,
    pub guess: Guess,
    pub probability: u8,
    pub correct: bool,
    /// Patch produced by the variant before the orchestrator's card bookkeeping.
    pub patch: StatePatch,
    pub score_before: u64,
    pub score_after: u64,
    pub round_over: bool,
    /// JSON log line for display.
    pub log: String,
}

impl GuessOutcome {
    /// True when a shield turned a wrong guess into a surviving round.
    pub fn absorbed(&self) -> bool {
        !self.correct && !self.round_over
    }
}

/// Result of settling a finished round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub final_score: u64,
    pub won: bool,
    /// Highscore table position, if the score made it.
    pub highscore_rank: Option<u32>,
}

pub struct Session<D> {
    variant: Variant,
    deck: D,
    state: SessionState,
    settled: bool,
}

impl<D: CardSource> Session<D> {
    /// Charge the entry fee and deal the first card.
    ///
    /// Nothing is drawn when the ledger cannot cover the fee.
    pub async fn start<L: Ledger>(
        variant: Variant,
        mut deck: D,
        ledger: &mut L,
        stats: &Stats,
    ) -> Result<Self, SessionError> {
        let entry_cost = variant.entry_cost();
        let balance = ledger.balance();
        if balance < entry_cost {
            warn!(variant = %variant.id(), balance, entry_cost, "entry fee refused");
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: entry_cost,
            }
            .into());
        }

        deck.shuffle().await.map_err(SessionError::Draw)?;
        let first = deck.draw().await.map_err(SessionError::Draw)?;
        ledger.debit(
            TransactionKind::EntryFee,
            entry_cost,
            &format!("{} entry fee", variant.info().name),
            Some(variant.id()),
        )?;

        info!(
            variant = %variant.id(),
            entry_cost,
            balance = ledger.balance(),
            first = %first,
            "round started"
        );
        Ok(Self {
            variant,
            deck,
            state: SessionState::new(first, stats),
            settled: false,
        })
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_deck(self) -> D {
        self.deck
    }

    /// `(higher, lower)` win percentages for the card in play.
    pub fn probabilities(&self) -> Option<(u8, u8)> {
        let card = self.state.current_card?;
        Some((
            win_probability(card.rank, Guess::Higher),
            win_probability(card.rank, Guess::Lower),
        ))
    }

    /// Draw the next card and resolve `guess` against the card in play.
    pub async fn guess(
        &mut self,
        guess: Guess,
        rng: &mut dyn VarianceSource,
    ) -> Result<GuessOutcome, SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::RoundOver);
        }
        let previous = self.state.current_card.ok_or(SessionError::NoCard)?;
        let drawn = self.deck.draw().await.map_err(SessionError::Draw)?;

        let probability = win_probability(previous.rank, guess);
        let correct = is_guess_correct(previous.rank, drawn.rank, guess);
        let patch = self
            .variant
            .process_guess(&self.state, correct, probability, rng);

        let score_before = self.state.score;
        let mut next = self.state.apply(&patch);
        next.last_round_card = Some(drawn);
        next.last_round_correct = Some(correct);
        if !next.game_over {
            next.current_card = Some(drawn);
        }
        self.state = next;

        let log = logging::format_guess_log(
            self.variant.id(),
            &previous,
            &drawn,
            guess,
            probability,
            correct,
            &self.state,
        );
        debug!(
            variant = %self.variant.id(),
            previous = %previous,
            drawn = %drawn,
            %guess,
            probability,
            correct,
            score = self.state.score,
            streak = self.state.streak,
            multiplier = self.state.multiplier,
            "guess resolved"
        );
        if self.state.game_over {
            info!(
                variant = %self.variant.id(),
                score = self.state.score,
                streak = self.state.streak,
                "round lost"
            );
        }

        Ok(GuessOutcome {
            previous,
            drawn,
            guess,
            probability,
            correct,
            patch,
            score_before,
            score_after: self.state.score,
            round_over: self.state.game_over,
            log,
        })
    }

    /// Actions available right now; empty once the round is over.
    pub fn special_actions(&self) -> Vec<SpecialAction> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        self.variant.special_actions(&self.state)
    }

    pub fn use_action(&mut self, action: ActionId) -> Result<&SessionState, SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::RoundOver);
        }
        let patch = try_execute_action(self.variant.id(), action, &self.state).map_err(|err| {
            warn!(variant = %self.variant.id(), %action, ?err, "action rejected");
            err
        })?;
        self.state = self.state.apply(&patch);
        debug!(
            variant = %self.variant.id(),
            %action,
            score = self.state.score,
            multiplier = self.state.multiplier,
            "action applied"
        );
        Ok(&self.state)
    }

    /// End the round and credit the score to the ledger.
    pub fn cash_out<L: Ledger>(&mut self, ledger: &mut L) -> Result<u64, SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::RoundOver);
        }
        let score = self.state.score;
        if score > 0 {
            ledger.credit(
                TransactionKind::GameWin,
                score,
                &format!("Cashed out from {}", self.variant.info().name),
                Some(self.variant.id()),
            )?;
        }
        self.state.game_won = true;
        info!(
            variant = %self.variant.id(),
            score,
            balance = ledger.balance(),
            log = %logging::format_cash_out_log(self.variant.id(), score, ledger.balance()),
            "cashed out"
        );
        Ok(score)
    }

    /// Record a finished round in the ledger, statistics and highscores.
    ///
    /// A round is recorded at most once.
    pub fn settle<L: Ledger>(
        &mut self,
        ledger: &mut L,
        stats: &mut Stats,
        highscores: &mut Highscores,
        player: &str,
    ) -> Result<Settlement, SessionError> {
        if !self.state.is_terminal() {
            return Err(SessionError::RoundInProgress);
        }
        if self.settled {
            return Err(SessionError::AlreadySettled);
        }
        self.settled = true;
        let won = self.state.game_won;
        if !won {
            ledger.record(
                TransactionKind::GameLoss,
                self.variant.entry_cost(),
                &format!("Lost {} round", self.variant.info().name),
                Some(self.variant.id()),
            );
        }
        let final_score = self.state.score;
        stats.record_round(final_score);
        let highscore_rank = highscores.insert(player, final_score, now_ms());
        info!(
            variant = %self.variant.id(),
            final_score,
            won,
            total_games = stats.total_games,
            best_score = stats.best_score,
            "round settled"
        );
        Ok(Settlement {
            final_score,
            won,
            highscore_rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        casino::variant_by_id,
        mocks::{FixedVariance, ScriptedDeck},
        Wallet,
    };
    use highlow_types::casino::SpecialMode;

    fn deck(codes: &[&str]) -> ScriptedDeck {
        ScriptedDeck::from_codes(codes).unwrap()
    }

    fn variant(id: &str) -> Variant {
        variant_by_id(id).unwrap()
    }

    #[tokio::test]
    async fn test_classic_first_guess() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let mut session = Session::start(
            variant("classic"),
            deck(&["7H", "9S"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        assert_eq!(wallet.balance(), 900);
        assert_eq!(wallet.transactions()[0].kind, TransactionKind::EntryFee);
        assert_eq!(wallet.transactions()[0].amount, 100);
        assert_eq!(session.probabilities(), Some((46, 46)));

        let outcome = session.guess(Guess::Higher, &mut rng).await.unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.probability, 46);
        // floor(8 * 100 / 46) = 17; floor(17 * 0.975) = 16
        assert_eq!(outcome.score_after, 16);
        assert_eq!(session.state().streak, 1);
        assert_eq!(session.state().current_card.map(|c| c.code()), Some("9S".to_string()));
        assert_eq!(session.state().last_round_correct, Some(true));
        assert!(outcome.log.contains(r#""correct":true"#));
    }

    #[tokio::test]
    async fn test_classic_even_odds_scenario() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let session = Session::start(
            variant("classic"),
            deck(&["7H"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        assert_eq!(wallet.balance(), 900);

        // Probability 50, correct, straight through the variant
        let patch = session
            .variant()
            .process_guess(session.state(), true, 50, &mut rng);
        let next = session.state().apply(&patch);
        assert_eq!(next.streak, 1);
        assert_eq!(next.score - session.state().score, 15);
    }

    #[tokio::test]
    async fn test_insufficient_balance_draws_nothing() {
        let mut wallet = Wallet::new(150);
        let scripted = deck(&["7H", "9S"]);
        let err = Session::start(
            variant("double-or-nothing"),
            scripted,
            &mut wallet,
            &Stats::default(),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(
            err,
            SessionError::Ledger(LedgerError::InsufficientFunds {
                balance: 150,
                requested: 200
            })
        ));
        assert_eq!(wallet.balance(), 150);
        assert!(wallet.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_failed_draw_charges_nothing() {
        let mut wallet = Wallet::default();
        let err = Session::start(variant("classic"), deck(&[]), &mut wallet, &Stats::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::Draw(_)));
        assert_eq!(wallet.balance(), 1_000);
    }

    #[tokio::test]
    async fn test_equal_rank_loses() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let mut session = Session::start(
            variant("classic"),
            deck(&["5H", "5S"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        let outcome = session.guess(Guess::Higher, &mut rng).await.unwrap();
        assert!(!outcome.correct);
        assert!(outcome.round_over);
        // Losing card is shown but the card in play is not advanced
        assert_eq!(session.state().last_round_card.map(|c| c.code()), Some("5S".to_string()));
        assert_eq!(session.state().current_card.map(|c| c.code()), Some("5H".to_string()));

        assert!(matches!(
            session.guess(Guess::Lower, &mut rng).await,
            Err(SessionError::RoundOver)
        ));
        assert!(session.special_actions().is_empty());
    }

    #[tokio::test]
    async fn test_cash_out_credits_score() {
        let mut wallet = Wallet::new(900);
        let mut session = Session::start(
            variant("classic"),
            deck(&["7H"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        assert_eq!(wallet.balance(), 800);
        session.state.score = 240;
        let credited = session.cash_out(&mut wallet).unwrap();
        assert_eq!(credited, 240);
        assert_eq!(wallet.balance(), 1_040);
        let last = wallet.transactions().last().unwrap();
        assert_eq!(last.kind, TransactionKind::GameWin);
        assert_eq!(last.amount, 240);
        assert!(session.state().game_won);
        assert!(matches!(session.cash_out(&mut wallet), Err(SessionError::RoundOver)));
    }

    #[tokio::test]
    async fn test_cash_out_from_nine_hundred() {
        let mut wallet = Wallet::default();
        let mut session = Session::start(
            variant("classic"),
            deck(&["7H"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        assert_eq!(wallet.balance(), 900);
        session.state.score = 240;
        session.cash_out(&mut wallet).unwrap();
        assert_eq!(wallet.balance(), 1_140);
    }

    #[tokio::test]
    async fn test_double_or_nothing_round() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let mut session = Session::start(
            variant("double-or-nothing"),
            deck(&["7H", "9S", "3C", "QD"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        assert_eq!(wallet.balance(), 800);
        assert!(session.special_actions().is_empty());
        assert!(matches!(
            session.use_action(ActionId::DoubleOrNothing),
            Err(SessionError::Action(ActionError::Unavailable(_)))
        ));

        let first = session.guess(Guess::Higher, &mut rng).await.unwrap();
        assert!(first.correct);
        assert_eq!(session.special_actions().len(), 1);

        let state = session.use_action(ActionId::DoubleOrNothing).unwrap();
        assert!(state.double_or_nothing_active);
        assert_eq!(state.special_mode, Some(SpecialMode::DoubleOrNothing));
        assert_eq!(state.multiplier, 2.0);

        // 9 -> 3 guessing higher: staked score is wiped
        let second = session.guess(Guess::Higher, &mut rng).await.unwrap();
        assert!(!second.correct);
        assert!(second.round_over);
        assert_eq!(session.state().score, 0);

        let mut stats = Stats::default();
        let mut highscores = Highscores::default();
        let settlement = session
            .settle(&mut wallet, &mut stats, &mut highscores, "ada")
            .unwrap();
        assert_eq!(
            settlement,
            Settlement {
                final_score: 0,
                won: false,
                highscore_rank: Some(1)
            }
        );
        assert_eq!(stats.total_games, 1);
        let last = wallet.transactions().last().unwrap();
        assert_eq!(last.kind, TransactionKind::GameLoss);
        assert_eq!(last.amount, 200);
        assert_eq!(wallet.balance(), 800);
    }

    #[tokio::test]
    async fn test_streak_master_shield_keeps_round_alive() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let mut session = Session::start(
            variant("streak-master"),
            deck(&["2H", "4S", "6C", "8D", "3H", "9S"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        for _ in 0..3 {
            assert!(session.guess(Guess::Higher, &mut rng).await.unwrap().correct);
        }
        assert_eq!(session.state().streak, 3);
        let score = session.state().score;
        assert!(score >= 50);

        session.use_action(ActionId::StreakShield).unwrap();
        assert_eq!(session.state().score, score - 50);

        // 8 -> 3 guessing higher is wrong but absorbed
        let outcome = session.guess(Guess::Higher, &mut rng).await.unwrap();
        assert!(outcome.absorbed());
        assert_eq!(outcome.score_after, (score - 50) * 3 / 4);
        assert_eq!(session.state().streak, 3);
        assert_eq!(session.state().special_mode, None);
        assert_eq!(session.state().current_card.map(|c| c.code()), Some("3H".to_string()));

        // And play continues from the absorbed card
        assert!(session.guess(Guess::Higher, &mut rng).await.unwrap().correct);
        assert_eq!(session.state().streak, 4);
    }

    #[tokio::test]
    async fn test_settle_requires_finished_round() {
        let mut wallet = Wallet::default();
        let mut session = Session::start(
            variant("classic"),
            deck(&["7H"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        let mut stats = Stats::default();
        let mut highscores = Highscores::default();
        assert!(matches!(
            session.settle(&mut wallet, &mut stats, &mut highscores, "ada"),
            Err(SessionError::RoundInProgress)
        ));
        assert_eq!(stats, Stats::default());
    }

    #[tokio::test]
    async fn test_settle_after_cash_out() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let stats_before = Stats {
            total_games: 4,
            best_score: 10,
        };
        let mut session = Session::start(
            variant("classic"),
            deck(&["2H", "KS"]),
            &mut wallet,
            &stats_before,
        )
        .await
        .unwrap();
        assert_eq!(session.state().total_games, 4);
        session.guess(Guess::Higher, &mut rng).await.unwrap();
        let score = session.cash_out(&mut wallet).unwrap();

        let mut stats = stats_before;
        let mut highscores = Highscores::default();
        let settlement = session
            .settle(&mut wallet, &mut stats, &mut highscores, "grace")
            .unwrap();
        assert!(settlement.won);
        assert_eq!(settlement.final_score, score);
        assert_eq!(stats.total_games, 5);
        assert_eq!(stats.best_score, score.max(10));
        assert_eq!(highscores.entries[0].player_name, "grace");
        assert!(wallet
            .transactions()
            .iter()
            .all(|t| t.kind != TransactionKind::GameLoss));
        let scripted = session.into_deck();
        assert_eq!(scripted.shuffles(), 1);
        assert_eq!(scripted.remaining(), 0);
    }

    #[tokio::test]
    async fn test_settle_records_round_once() {
        let mut wallet = Wallet::default();
        let mut rng = FixedVariance(1.0);
        let mut session = Session::start(
            variant("classic"),
            deck(&["5H", "5S"]),
            &mut wallet,
            &Stats::default(),
        )
        .await
        .unwrap();
        session.guess(Guess::Higher, &mut rng).await.unwrap();

        let mut stats = Stats::default();
        let mut highscores = Highscores::default();
        session
            .settle(&mut wallet, &mut stats, &mut highscores, "ada")
            .unwrap();
        assert!(matches!(
            session.settle(&mut wallet, &mut stats, &mut highscores, "ada"),
            Err(SessionError::AlreadySettled)
        ));
        assert_eq!(stats.total_games, 1);
        assert_eq!(highscores.entries.len(), 1);
        let losses = wallet
            .transactions()
            .iter()
            .filter(|t| t.kind == TransactionKind::GameLoss)
            .count();
        assert_eq!(losses, 1);
    }
}
