use rand::{Error, RngCore, SeedableRng};

use crate::constants::DEFAULT_SEED;

const MULTIPLIER: u64 = 0x5851_F42D_4C95_7F2D;

/// # Random Source
/// A permuted congruential generator whose whole state is two 64-bit words:
/// the LCG `state` and its odd `increment`.
///
/// Seeding is deterministic so that two sessions seeded alike draw identical sequences,
/// which is what makes `Cxkk` testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcg {
    state: u64,
    increment: u64,
}

impl Pcg {
    pub fn new(seed: u32) -> Self {
        let value = avalanche((u64::from(seed) << 1) | 1);
        let mut pcg = Pcg {
            state: 0,
            increment: (value << 1) | 1,
        };
        pcg.next();
        pcg.state = pcg.state.wrapping_add(avalanche(value));
        pcg.next();
        pcg
    }

    /// Advances the generator and returns 32 bits of output
    fn next(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(MULTIPLIER).wrapping_add(self.increment);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// A uniformly distributed byte taken from the high bits of the next output
    pub fn random_byte(&mut self) -> u8 {
        (self.next() >> 24) as u8
    }
}

impl Default for Pcg {
    fn default() -> Self {
        Pcg::new(DEFAULT_SEED)
    }
}

/// murmur3's 64-bit finaliser, spreads a small seed across the whole word
fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h = h.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    h ^= h >> 33;
    h
}

impl RngCore for Pcg {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next());
        let high = u64::from(self.next());
        high << 32 | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Pcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Pcg::new(u32::from_le_bytes(seed))
    }
}
