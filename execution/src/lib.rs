//! Highlow execution layer.
//!
//! This crate contains the variant reward engine ([`casino`]) and the collaborators that
//! drive it: a wallet ledger, a key/value store, a card source and the [`Session`]
//! orchestrator.
//!
//! ## Purity requirements
//! - Reward and guess-processing functions do no I/O and never mutate their input state.
//! - The only randomness inside the engine is the reward variance draw, taken from an
//!   injected [`casino::VarianceSource`].
//! - A [`SessionState`](highlow_types::casino::SessionState) has exactly one writer between
//!   calls; nothing here locks.
//!
//! ## Minimal round (example)
//! ```no_run
//! use highlow_execution::{variant_by_id, GameRng, RandomDeck, Session, Wallet};
//! use highlow_types::casino::{Guess, Stats};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut wallet = Wallet::default();
//! let mut rng = GameRng::new();
//! let classic = variant_by_id("classic").unwrap();
//! let mut session =
//!     Session::start(classic, RandomDeck::new(), &mut wallet, &Stats::default()).await?;
//! let outcome = session.guess(Guess::Higher, &mut rng).await?;
//! if !outcome.round_over {
//!     session.cash_out(&mut wallet)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod casino;
pub mod deck;
pub mod ledger;
pub mod session;
pub mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use casino::{
    expected_return, list_variants, variant_by_id, ActionError, GameRng, SpecialAction, Variant,
    VarianceSource,
};
pub use deck::{CardSource, RandomDeck};
pub use ledger::{Ledger, Wallet};
pub use session::{GuessOutcome, Session, SessionError, Settlement};
pub use state::{FileStore, Key, Memory, Status, Store, Value};
