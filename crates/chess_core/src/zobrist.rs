//! Zobrist keys for piece placement.
//!
//! A placement signature is the XOR of one key per occupied square, keyed by
//! the piece's color and kind. Identical pieces on identical squares share a
//! signature however they were reached; repetition detection compares these.
//! Movement history (`has_moved`) is deliberately not part of the key.

use crate::types::{Piece, Square};

const KEY_COUNT: usize = 2 * 6 * 64;

/// One key per (color, kind, square), generated at compile time.
pub struct ZobristKeys {
    keys: [u64; KEY_COUNT],
}

/// SplitMix64 step: returns the next state and its output.
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    pub const fn generate(seed: u64) -> Self {
        let mut keys = [0u64; KEY_COUNT];
        let mut state = seed;
        let mut i = 0;
        while i < KEY_COUNT {
            let (next, key) = splitmix64(state);
            state = next;
            keys[i] = key;
            i += 1;
        }
        Self { keys }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        let slot = (piece.color.idx() * 6 + piece.kind.idx()) * 64 + sq.index();
        self.keys[slot]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x5EED_C0DE_2024_0001);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
