use crate::casino::GameRng;
use anyhow::Result;
use highlow_types::casino::Card;
use std::future::Future;

/// Source of card draws for a session.
///
/// Draws are assumed uniform over the 13 ranks; the reward engine never inspects suits.
pub trait CardSource {
    /// Start a fresh deck.
    fn shuffle(&mut self) -> impl Future<Output = Result<()>>;

    fn draw(&mut self) -> impl Future<Output = Result<Card>>;
}

/// Uniform draws with replacement.
#[derive(Clone, Debug, Default)]
pub struct RandomDeck {
    rng: GameRng,
}

impl RandomDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: GameRng::seeded(seed),
        }
    }
}

impl CardSource for RandomDeck {
    async fn shuffle(&mut self) -> Result<()> {
        Ok(())
    }

    async fn draw(&mut self) -> Result<Card> {
        Ok(self.rng.draw_card())
    }
}
