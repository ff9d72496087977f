//! Automated highlow player.
//!
//! Plays configured rounds against a random deck, persists the wallet, statistics and
//! highscores to a JSON store, and estimates the house edge of each variant.

pub mod config;
pub mod house_edge;
pub mod runner;

pub use config::{Config, ConfigError, StrategyConfig};
pub use house_edge::{estimate, EdgeRow, EdgeStats};
pub use runner::{pick_guess, play_round, run, SimulationReport};
