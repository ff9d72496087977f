use highlow_types::casino::{VariantId, STARTING_BALANCE};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("variants must not be empty")]
    NoVariants,
}

/// How an automated player plays a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Cash out once the score reaches this value.
    #[serde(default = "default_cash_out_at")]
    pub cash_out_at: u64,
    /// Cash out after this many guesses if the round is still alive.
    #[serde(default = "default_max_guesses")]
    pub max_guesses: u32,
    /// Take any available special action before each guess.
    #[serde(default)]
    pub use_actions: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            cash_out_at: default_cash_out_at(),
            max_guesses: default_max_guesses(),
            use_actions: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// JSON file holding the wallet, statistics and highscores.
    pub store_path: PathBuf,
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,
    #[serde(default = "default_sessions")]
    pub sessions: u64,
    /// Variants played in rotation.
    #[serde(default = "default_variants")]
    pub variants: Vec<VariantId>,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default = "default_player")]
    pub player: String,
    /// Seed for reproducible runs; drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Rounds per variant for the house-edge estimate (0 disables it).
    #[serde(default = "default_house_edge_trials")]
    pub house_edge_trials: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_starting_balance() -> u64 {
    STARTING_BALANCE
}

fn default_sessions() -> u64 {
    10
}

fn default_variants() -> Vec<VariantId> {
    VariantId::ALL.to_vec()
}

fn default_player() -> String {
    "simulator".to_string()
}

fn default_house_edge_trials() -> u64 {
    10_000
}

fn default_cash_out_at() -> u64 {
    200
}

fn default_max_guesses() -> u32 {
    20
}

fn ensure_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(())
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
            value: self.log_level.clone(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        ensure_nonzero("sessions", self.sessions)?;
        ensure_nonzero("strategy.cash_out_at", self.strategy.cash_out_at)?;
        ensure_nonzero("strategy.max_guesses", self.strategy.max_guesses as u64)?;
        if self.variants.is_empty() {
            return Err(ConfigError::NoVariants);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_yaml("store_path: /tmp/highlow.json\n").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.starting_balance, 1_000);
        assert_eq!(config.sessions, 10);
        assert_eq!(config.variants, VariantId::ALL.to_vec());
        assert_eq!(config.strategy, StrategyConfig::default());
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
log_level: debug
store_path: data/store.json
starting_balance: 5000
sessions: 3
variants: [streak-master, double-or-nothing]
player: ada
seed: 7
house_edge_trials: 0
strategy:
  cash_out_at: 500
  max_guesses: 8
  use_actions: true
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.log_level().unwrap(), Level::DEBUG);
        assert_eq!(config.store_path, PathBuf::from("data/store.json"));
        assert_eq!(
            config.variants,
            vec![VariantId::StreakMaster, VariantId::DoubleOrNothing]
        );
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.house_edge_trials, 0);
        assert!(config.strategy.use_actions);
        assert_eq!(config.strategy.max_guesses, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let yaml = "store_path: s.json\nvariants: [roulette]\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::from_yaml("store_path: s.json\n").unwrap();
        config.log_level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));

        let mut config = Config::from_yaml("store_path: s.json\nsessions: 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "sessions must be > 0 (got 0)");

        config.sessions = 1;
        config.variants.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoVariants)));
    }
}
