//! RNG module - piece generation
//!
//! Provides a simple LCG for deterministic games and three ways of choosing
//! the next piece kind:
//!
//! - **Uniform**: every kind independently with probability 1/7 (classic behavior)
//! - **Bag**: 7-bag, each kind exactly once per shuffled bag
//! - **Scripted**: a fixed, repeating sequence (replays and tests)

use crate::config::Randomizer;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Generate a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

/// Source of piece kinds for a game session.
#[derive(Debug, Clone)]
pub enum PieceGenerator {
    Uniform(SimpleRng),
    Bag(PieceQueue),
    Scripted { kinds: Vec<PieceKind>, index: usize },
}

impl PieceGenerator {
    pub fn new(randomizer: Randomizer, seed: u32) -> Self {
        match randomizer {
            Randomizer::Uniform => PieceGenerator::Uniform(SimpleRng::new(seed)),
            Randomizer::Bag => PieceGenerator::Bag(PieceQueue::new(seed)),
        }
    }

    /// Repeat `kinds` forever. An empty script yields `I` pieces.
    pub fn scripted(kinds: impl Into<Vec<PieceKind>>) -> Self {
        PieceGenerator::Scripted {
            kinds: kinds.into(),
            index: 0,
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            PieceGenerator::Uniform(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            PieceGenerator::Bag(queue) => queue.draw(),
            PieceGenerator::Scripted { kinds, index } => {
                if kinds.is_empty() {
                    return PieceKind::I;
                }
                let kind = kinds[*index % kinds.len()];
                *index = (*index + 1) % kinds.len();
                kind
            }
        }
    }
}
