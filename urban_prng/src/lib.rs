// Deterministic 16-bit pseudo-random number generator for city generation.
//
// A small shift-xor generator over 16-bit words. Every generator in
// `urban_sim` draws from a `Seed` passed by `&mut`, so the exact order of
// draws is part of the world format: the same starting words always produce
// the same town, down to the last fence wabble. The generator has zero
// external dependencies beyond serde for snapshotting.
//
// The state is four 16-bit words. Words 0 and 1 form the running register
// that every draw advances; words 2 and 3 are carried along untouched so the
// caller-facing seed keeps its four-word shape. `Seed::from_entropy` folds
// the upper words into the register before use, which is how the command
// line tools turn a clock reading into a seed.
//
// **Critical constraint: determinism.** A dump file or a seed printed by
// `generate` names a town only as long as the draw sequence is frozen.
// Adding, removing or reordering a draw anywhere in generation changes every
// town after that point, so treat call order like a file format. The mixing
// is plain u16 shifts and xors, which behave the same on every target.

use serde::{Deserialize, Serialize};

/// Number of draws discarded after deriving a seed from entropy.
const WARM_UP_DRAWS: usize = 5;

/// Four-word generator state. The only source of randomness for a city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    words: [u16; 4],
}

impl Seed {
    /// Create a seed from its four raw words. No mixing is applied, so the
    /// first draw returns `words[1]`.
    pub fn new(words: [u16; 4]) -> Self {
        Self { words }
    }

    /// Derive a seed from an arbitrary 64-bit value (a clock reading, say).
    ///
    /// The value is split into four little-endian words, words 2 and 3 are
    /// xor-folded into words 0 and 1, and the first few outputs are thrown
    /// away so that nearby inputs diverge.
    pub fn from_entropy(value: u64) -> Self {
        let mut words = [0u16; 4];
        for (i, word) in words.iter_mut().enumerate() {
            *word = (value >> (16 * i)) as u16;
        }
        words[0] ^= words[2];
        words[1] ^= words[3];
        let mut seed = Self { words };
        for _ in 0..WARM_UP_DRAWS {
            seed.next_u16();
        }
        seed
    }

    /// Current state words, for display and reproduction.
    pub fn words(&self) -> [u16; 4] {
        self.words
    }

    /// Advance the register and return the previous second word.
    ///
    /// The low three bits of word 0 select one of four taps; three of them
    /// inject a constant so an all-zero register cannot lock up.
    pub fn next_u16(&mut self) -> u16 {
        let tmp0 = self.words[0];
        let tmp1 = self.words[1];
        self.words[0] = tmp1;
        self.words[1] = match tmp0 & 7 {
            0 => tmp1 ^ (tmp0 >> 1) ^ 0xd028,
            3 => tmp1 ^ (tmp0 >> 2) ^ 0xae08,
            7 => tmp1 ^ (tmp0 >> 3) ^ 0x6320,
            _ => tmp1 ^ (tmp0 >> 1),
        };
        tmp1
    }

    /// One draw reduced modulo `modulus`, in `[0, modulus)`.
    ///
    /// This is a plain remainder, not a bias-free range: the layout format
    /// is defined in terms of it. Panics if `modulus` is zero.
    pub fn below(&mut self, modulus: u16) -> i32 {
        assert!(modulus > 0, "below: modulus must be nonzero");
        i32::from(self.next_u16() % modulus)
    }

    /// One draw reduced modulo `modulus` and shifted down by `modulus / 2`.
    ///
    /// `jitter(11)` is in `[-5, 5]`, `jitter(61)` in `[-30, 30]`,
    /// `jitter(100)` in `[-50, 49]`.
    pub fn jitter(&mut self, modulus: u16) -> i32 {
        self.below(modulus) - i32::from(modulus / 2)
    }

    /// One draw with all bits outside `mask` cleared.
    pub fn masked(&mut self, mask: u16) -> i32 {
        i32::from(self.next_u16() & mask)
    }
}
