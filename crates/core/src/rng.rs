//! RNG module - piece selection
//!
//! Each new "next" piece is picked independently and uniformly from the seven
//! kinds, with replacement, so the same kind can come up several times in a row.
//! The source is injected into the game through [`PieceSource`], which lets
//! tests script an exact piece sequence.
//!
//! Also provides a simple LCG for deterministic play from a seed.

use crate::types::PieceKind;

/// Supplier of piece kinds for a game.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

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
        // The low bits of an LCG cycle quickly; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (a restartable seed).
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for SimpleRng {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed list of kinds, starting over at the end.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            pos: 0,
        }
    }

    /// A source that only ever yields `kind`.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::I;
        }
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos = self.pos.wrapping_add(1);
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
