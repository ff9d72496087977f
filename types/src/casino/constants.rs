/// Balance granted to a fresh wallet
pub const STARTING_BALANCE: u64 = 1_000;

/// Number of distinct ranks in the draw population (Ace..King)
pub const RANK_COUNT: u8 = 13;

/// Multiplier every round starts from
pub const BASE_MULTIPLIER: f64 = 1.0;

/// Lower bound of the reward variance band (inclusive)
pub const VARIANCE_MIN: f64 = 0.9;

/// Upper bound of the reward variance band (exclusive)
pub const VARIANCE_MAX: f64 = 1.1;

/// Smallest reward a correct guess can pay
pub const MIN_REWARD: u64 = 1;

/// Highscore table length
pub const MAX_HIGHSCORES: usize = 10;

/// Maximum player name length stored with a highscore
pub const MAX_NAME_LENGTH: usize = 32;
