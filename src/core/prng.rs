// Minimal seedable PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It only fabricates reconstruction-error samples for the results screen.

/// Source of uniform draws in `[0, 1)`.
///
/// Evaluation synthesis takes any implementor, so hosts and tests can swap
/// the generator without touching the band rules.
pub trait RandomSource {
    fn next_f32_01(&mut self) -> f32;

    #[inline]
    fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32_01()
    }
}

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl RandomSource for Prng {
    #[inline]
    fn next_f32_01(&mut self) -> f32 {
        // 24 random mantissa bits keep the result strictly below 1.0.
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_is_usable() {
        let mut p = Prng::new(0);
        assert_ne!(p.next_u32(), 0);
    }

    #[test]
    fn unit_draws_stay_in_half_open_range() {
        let mut p = Prng::new(0xC0FF_EE12);
        for _ in 0..10_000 {
            let x = p.next_f32_01();
            assert!((0.0..1.0).contains(&x), "{x}");
        }
    }

    #[test]
    fn ranged_draws_respect_bounds() {
        let mut p = Prng::new(3);
        for _ in 0..1_000 {
            let x = p.gen_range_f32(0.06, 0.11);
            assert!((0.06..=0.11).contains(&x), "{x}");
        }
    }
}
