use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Picks up to `amount` distinct entries, in random order.
    pub fn sample_distinct<'a, T>(&mut self, items: &'a [T], amount: usize) -> Vec<&'a T> {
        items.choose_multiple(&mut self.rng, amount).collect()
    }
}
