use crate::{casino::VarianceSource, deck::CardSource};
use anyhow::{anyhow, Result};
use highlow_types::casino::{Card, ParseCardError};
use std::collections::VecDeque;

/// Variance source that always returns the same factor.
#[derive(Clone, Copy, Debug)]
pub struct FixedVariance(pub f64);

impl Default for FixedVariance {
    fn default() -> Self {
        Self(1.0)
    }
}

impl VarianceSource for FixedVariance {
    fn variance_factor(&mut self) -> f64 {
        self.0
    }
}

/// Deck yielding a fixed sequence of cards; errors once exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDeck {
    cards: VecDeque<Card>,
    shuffles: usize,
}

impl ScriptedDeck {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            shuffles: 0,
        }
    }

    /// Build from deck codes such as `"7H"` or `"0S"`.
    pub fn from_codes(codes: &[&str]) -> Result<Self, ParseCardError> {
        let cards = codes
            .iter()
            .map(|code| Card::from_code(code))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(cards))
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn shuffles(&self) -> usize {
        self.shuffles
    }
}

impl CardSource for ScriptedDeck {
    async fn shuffle(&mut self) -> Result<()> {
        self.shuffles += 1;
        Ok(())
    }

    async fn draw(&mut self) -> Result<Card> {
        self.cards
            .pop_front()
            .ok_or_else(|| anyhow!("scripted deck exhausted"))
    }
}
