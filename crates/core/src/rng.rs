//! RNG module - uniform random piece generation
//!
//! Every piece is drawn independently and uniformly from the seven kinds.
//! There is no bag: back-to-back repeats and long droughts are both possible.
//!
//! The generator is seedable (PCG32) so games can be replayed in tests, and it
//! can also replay a fixed script of kinds for deterministic scenarios.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::pieces::Tetromino;
use crate::types::PieceKind;

/// Source of new pieces
#[derive(Debug, Clone)]
pub enum PieceGenerator {
    /// Uniform random kinds from a seeded PCG32 stream
    Random(Pcg32),
    /// Cycles through a fixed list of kinds
    Scripted { kinds: Vec<PieceKind>, cursor: usize },
}

impl PieceGenerator {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self::Random(Pcg32::seed_from_u64(seed))
    }

    /// Create a generator seeded from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::Random(Pcg32::from_rng(&mut rand::rng()))
    }

    /// Create a generator that repeats `kinds` in order.
    ///
    /// An empty script falls back to I pieces.
    pub fn scripted(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self::Scripted { kinds, cursor: 0 }
    }

    /// Pick the next kind
    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            Self::Random(rng) => PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())],
            Self::Scripted { kinds, cursor } => {
                let kind = kinds[*cursor % kinds.len()];
                *cursor = (*cursor + 1) % kinds.len();
                kind
            }
        }
    }

    /// Produce the next piece at its spawn position
    pub fn next_piece(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
