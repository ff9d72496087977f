use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("unknown rank symbol: {0}")]
    UnknownRank(String),
    #[error("unknown suit symbol: {0}")]
    UnknownSuit(String),
    #[error("malformed card code: {0}")]
    MalformedCode(String),
}

/// Card rank. Ace is low (1) and King is high (13).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Comparison value (1..=13).
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        let idx = value.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }

    /// Symbol used by the deck service (`"ACE"`, `"2"`..`"10"`, `"JACK"`, ...).
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "ACE",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
        }
    }

    fn code(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Ten => '0',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            // 2..=9 map onto their digit
            other => char::from(b'0' + other.value()),
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Rank::Ace),
            '0' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            '2'..='9' => Self::from_value(code as u8 - b'0'),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = ParseCardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| ParseCardError::UnknownRank(value.to_string()))
    }
}

impl FromStr for Rank {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|rank| rank.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCardError::UnknownRank(s.to_string()))
    }
}

impl TryFrom<String> for Rank {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rank> for &'static str {
    fn from(rank: Rank) -> Self {
        rank.symbol()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card suit. Never used in any calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "SPADES",
            Suit::Hearts => "HEARTS",
            Suit::Diamonds => "DIAMONDS",
            Suit::Clubs => "CLUBS",
        }
    }

    fn code(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|suit| suit.code() == code)
    }
}

impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|suit| suit.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCardError::UnknownSuit(s.to_string()))
    }
}

impl TryFrom<String> for Suit {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Suit> for &'static str {
    fn from(suit: Suit) -> Self {
        suit.symbol()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Two-character deck code, e.g. `"AS"`, `"0H"` (ten of hearts), `"KD"`.
    pub fn code(&self) -> String {
        let mut out = String::with_capacity(2);
        out.push(self.rank.code());
        out.push(self.suit.code());
        out
    }

    pub fn from_code(code: &str) -> Result<Self, ParseCardError> {
        let mut chars = code.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError::MalformedCode(code.to_string()));
        };
        let rank = Rank::from_code(rank.to_ascii_uppercase())
            .ok_or_else(|| ParseCardError::UnknownRank(rank.to_string()))?;
        let suit = Suit::from_code(suit.to_ascii_uppercase())
            .ok_or_else(|| ParseCardError::UnknownSuit(suit.to_string()))?;
        Ok(Self { rank, suit })
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// Player prediction for the next card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    Higher,
    Lower,
}

impl Guess {
    pub fn as_str(self) -> &'static str {
        match self {
            Guess::Higher => "HIGHER",
            Guess::Lower => "LOWER",
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
