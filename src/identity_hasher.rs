//! A hasher which hands integer identifiers back as their own hash. With it a
//! `ChainedHashMap` keyed by integers files id `n` under bucket
//! `n % capacity`, which makes collisions easy to arrange and to reason about.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    // starting from zero, a lone write comes out unchanged
    fn fold(&mut self, word: u64) {
        self.0 = self.0.rotate_left(8) ^ word;
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        // anything that isn't a single integer gets folded in little-endian
        // chunks, which keeps it deterministic if not very well distributed
        for chunk in bytes.chunks(8) {
            let mut word = 0u64;
            for byte in chunk.iter().rev() {
                word = (word << 8) | *byte as u64;
            }
            self.fold(word);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Clone, Copy, Default)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}
