//! Card probability helpers.
//!
//! Draws are modelled as uniform over the 13 ranks with replacement; suits and cards already
//! seen do not change the odds.

use highlow_types::casino::{Guess, Rank, RANK_COUNT};

/// Percent chance (0..=100) that the next card is strictly higher/lower than `current`.
///
/// The current rank counts for neither direction, so the two sides do not sum to 100.
pub fn win_probability(current: Rank, guess: Guess) -> u8 {
    let value = current.value();
    let favorable = match guess {
        Guess::Higher => RANK_COUNT - value,
        Guess::Lower => value - 1,
    };
    let pct = (favorable as f64 / RANK_COUNT as f64 * 100.0).round();
    pct.max(0.0) as u8
}

/// Whether `next` satisfies `guess` relative to `previous`. Equal ranks lose.
pub fn is_guess_correct(previous: Rank, next: Rank, guess: Guess) -> bool {
    match guess {
        Guess::Higher => next > previous,
        Guess::Lower => next < previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_win_probability_values() {
        assert_eq!(win_probability(Rank::Seven, Guess::Higher), 46);
        assert_eq!(win_probability(Rank::Seven, Guess::Lower), 46);
        assert_eq!(win_probability(Rank::Ace, Guess::Lower), 0);
        assert_eq!(win_probability(Rank::King, Guess::Higher), 0);
        assert_eq!(win_probability(Rank::Ace, Guess::Higher), 92);
        assert_eq!(win_probability(Rank::King, Guess::Lower), 92);
        assert_eq!(win_probability(Rank::Two, Guess::Lower), 8);
        assert_eq!(win_probability(Rank::Queen, Guess::Higher), 8);
    }

    #[test]
    fn test_probabilities_exclude_current_rank() {
        for rank in Rank::ALL {
            let total = win_probability(rank, Guess::Higher) as u32
                + win_probability(rank, Guess::Lower) as u32;
            // 12 of 13 ranks are favorable to one side or the other
            assert!((91..=93).contains(&total), "{rank}: {total}");
        }
    }

    #[test]
    fn test_is_guess_correct() {
        assert!(is_guess_correct(Rank::Five, Rank::Nine, Guess::Higher));
        assert!(!is_guess_correct(Rank::Five, Rank::Two, Guess::Higher));
        assert!(is_guess_correct(Rank::Five, Rank::Two, Guess::Lower));
        assert!(!is_guess_correct(Rank::Five, Rank::Five, Guess::Higher));
        assert!(!is_guess_correct(Rank::Five, Rank::Five, Guess::Lower));
    }

    proptest! {
        #[test]
        fn prop_probability_bounded(value in 1u8..=13, higher in any::<bool>()) {
            let rank = Rank::from_value(value).unwrap();
            let guess = if higher { Guess::Higher } else { Guess::Lower };
            let pct = win_probability(rank, guess);
            prop_assert!(pct <= 100);
            // Monotone: a higher card is never easier to beat
            if value < 13 {
                let next = Rank::from_value(value + 1).unwrap();
                if higher {
                    prop_assert!(win_probability(next, guess) <= pct);
                } else {
                    prop_assert!(win_probability(next, guess) >= pct);
                }
            }
        }
    }
}
