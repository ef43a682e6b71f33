//! Synthetic spike trains for integration tests.
//!
//! - Regular trains (fixed interval)
//! - Poisson trains (exponential intervals)
//! - Poisson trains with a dead time, i.e. a perfectly isolated unit

#![allow(dead_code)] // Used across multiple test files

/// Small LCG so generated trains are reproducible without a rand dependency.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform sample in (0, 1].
    pub fn next_unit(&mut self) -> f64 {
        // x_{n+1} = (a * x_n + c) mod 2^64
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 11) as f64 + 1.0) / (1u64 << 53) as f64
    }

    /// Exponential sample with the given rate.
    pub fn next_exp(&mut self, rate: f64) -> f64 {
        -self.next_unit().ln() / rate
    }
}

/// Generates `count` spikes spaced exactly `interval` apart, starting at 0.
pub fn regular_train(count: usize, interval: f64) -> Vec<f64> {
    (0..count).map(|i| i as f64 * interval).collect()
}

/// Generates a Poisson spike train in seconds over `[0, duration)`.
pub fn poisson_train(rate: f64, duration: f64, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    let mut train = Vec::new();
    let mut t = rng.next_exp(rate);
    while t < duration {
        train.push(t);
        t += rng.next_exp(rate);
    }
    train
}

/// Generates a Poisson train whose intervals never fall below `dead_time`.
pub fn refractory_train(rate: f64, dead_time: f64, duration: f64, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    let mut train = Vec::new();
    let mut t = 0.0;
    loop {
        t += dead_time + rng.next_exp(rate);
        if t >= duration {
            break;
        }
        train.push(t);
    }
    train
}

/// Converts a train in seconds to whole sample indices.
pub fn to_samples(train: &[f64], sampling_rate: f64) -> Vec<f64> {
    train.iter().map(|t| (t * sampling_rate).round()).collect()
}
