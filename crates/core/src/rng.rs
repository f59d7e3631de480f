//! RNG module - where new pieces come from
//!
//! Normal play draws every kind uniformly from a seeded [`StdRng`], so a game
//! can be replayed from its seed. Tests and demos can instead script a fixed,
//! repeating sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

#[derive(Debug, Clone)]
enum Source {
    Uniform(StdRng),
    Scripted { pieces: Vec<PieceKind>, next: usize },
}

/// Stream of piece kinds for the spawner.
#[derive(Debug, Clone)]
pub struct PieceSource {
    seed: u64,
    source: Source,
}

impl PieceSource {
    /// Uniformly random kinds from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            source: Source::Uniform(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniformly random kinds from a fresh random seed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Cycle through `pieces` forever. `None` if `pieces` is empty.
    pub fn scripted(pieces: &[PieceKind]) -> Option<Self> {
        if pieces.is_empty() {
            return None;
        }
        Some(Self {
            seed: 0,
            source: Source::Scripted {
                pieces: pieces.to_vec(),
                next: 0,
            },
        })
    }

    /// Seed of the random stream (0 for scripted sources).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the next kind.
    pub fn draw(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Uniform(rng) => PieceKind::ALL[rng.gen_range(0..PieceKind::COUNT)],
            Source::Scripted { pieces, next } => {
                let kind = pieces[*next % pieces.len()];
                *next = (*next + 1) % pieces.len();
                kind
            }
        }
    }
}

impl Iterator for PieceSource {
    type Item = PieceKind;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.draw())
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}
