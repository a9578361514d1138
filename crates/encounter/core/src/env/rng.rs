//! Deterministic dice for AI rolls.
//!
//! Every chance-based AI choice (block, dodge, environment use, attack
//! direction) goes through a [`Dice`] so an encounter replays identically
//! from the same seeds.

/// PCG-XSH-RR output permutation over a 64-bit LCG step.
struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

/// Stateful PCG stream owned by one combatant.
#[derive(Clone, Debug)]
pub struct Dice {
    state: u64,
}

impl Dice {
    /// Seeds a stream; the seed is avalanched so neighbouring ids diverge.
    pub fn new(seed: u64) -> Self {
        let mut hash = seed ^ 0x9e3779b97f4a7c15;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        Self { state: hash }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = PcgRng::step(self.state);
        PcgRng::output(self.state)
    }

    /// Uniform roll in `[0, 1)`.
    pub fn roll_unit(&mut self) -> f32 {
        // 24 bits fit exactly in an f32 mantissa.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// `true` with probability `p`; `p <= 0` never, `p >= 1` always.
    pub fn chance(&mut self, p: f32) -> bool {
        self.roll_unit() < p
    }
}
