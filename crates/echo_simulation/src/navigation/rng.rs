//! SeededRandom — детерминированный LCG для выбора patrol/search точек.
//!
//! Park–Miller "minimal standard": `state' = state * 16807 mod (2^31 - 1)`.
//! Один экземпляр на агента, seed от level id или явного числа — одинаковый seed
//! даёт одинаковую последовательность целей (regression тесты AI).

use rand::{Error, RngCore, SeedableRng};

const MODULUS: u64 = 2_147_483_647;
const MULTIPLIER: u64 = 16_807;

/// Seed для нечисловых/пустых входов
pub const FALLBACK_SEED: u64 = 12_345;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        let mut state = seed % MODULUS;
        if state == 0 {
            state = MODULUS - 1;
        }
        Self { state }
    }

    /// Seed из level id: десятичная строка парсится как число,
    /// остальное хешируется FNV-1a.
    pub fn from_level_id(level_id: &str) -> Self {
        let trimmed = level_id.trim();
        if trimmed.is_empty() {
            return Self::new(FALLBACK_SEED);
        }
        match trimmed.parse::<u64>() {
            Ok(seed) => Self::new(seed),
            Err(_) => Self::new(fnv1a(trimmed.as_bytes())),
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    fn step(&mut self) -> u64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state
    }

    /// [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.step() - 1) as f64 / (MODULUS - 1) as f64
    }

    /// [min, max); пустой диапазон возвращает `min`
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max - min) as f64;
        let value = (self.next_f64() * span).floor() as i64 + min;
        value.clamp(min, max - 1)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.next_u32() as u64;
        let high = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
