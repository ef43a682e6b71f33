//! Streaming refractory-violation accumulator.
//!
//! [`OnlineContamination`] consumes spike timestamps one at a time and keeps
//! only the previous timestamp and three counters, so a cluster can be scored
//! while spikes are still being detected. The batch [`estimate`](crate::estimate)
//! is a thin wrapper over it.
//!
//! # Example
//!
//! ```
//! use refrac::{ContaminationConfig, OnlineContamination, Recording, Samples, SamplingRate};
//!
//! let rate = SamplingRate::new(30_000.0).unwrap();
//! let mut acc = OnlineContamination::from_config(&ContaminationConfig::default(), rate).unwrap();
//!
//! for t in [0.0, 12_000.0, 12_018.0, 40_000.0] {
//!     acc.push(t);
//! }
//! assert_eq!(acc.violations(), 1);
//!
//! let recording = Recording::new(rate, Samples(600_000.0)).unwrap();
//! let result = acc.estimate(&recording).unwrap();
//! assert!(result.ratio > 0.0);
//! ```

use crate::contamination::{poisson_estimate, ContaminationConfig, ContaminationEstimate};
use crate::error::{ContaminationError, Result};
use crate::isi::{interval_count, ViolationWindow};
use crate::units::{Recording, SamplingRate};

/// Single-pass refractory violation counter.
///
/// # Memory Layout
/// - `window`: Violation window in whole samples
/// - `rate`: Sampling rate the window was converted at
/// - `spikes`: Timestamps seen so far
/// - `violations`: Intervals inside the window
/// - `out_of_order`: Intervals that went backwards
/// - `last`: Previous timestamp, if any
#[derive(Debug, Clone)]
pub struct OnlineContamination {
    window: ViolationWindow,
    rate: SamplingRate,
    spikes: usize,
    violations: usize,
    out_of_order: usize,
    last: Option<f64>,
}

impl OnlineContamination {
    /// Creates an accumulator for an explicit window sampled at `rate`.
    ///
    /// Only recordings at the same `rate` can be scored against it.
    pub fn new(window: ViolationWindow, rate: SamplingRate) -> Self {
        Self {
            window,
            rate,
            spikes: 0,
            violations: 0,
            out_of_order: 0,
            last: None,
        }
    }

    /// Creates an accumulator from refractory and censored periods.
    ///
    /// # Errors
    ///
    /// Any error from [`ContaminationConfig::window`].
    pub fn from_config(config: &ContaminationConfig, rate: SamplingRate) -> Result<Self> {
        Ok(Self::new(config.window(rate)?, rate))
    }

    /// Adds the next spike timestamp.
    ///
    /// Timestamps are expected in ascending order. A timestamp earlier than
    /// its predecessor is still counted as a spike, its negative interval
    /// never counts as a violation, and it is tallied in
    /// [`out_of_order`](Self::out_of_order).
    pub fn push(&mut self, timestamp: f64) {
        if let Some(prev) = self.last {
            let isi = timestamp - prev;
            if self.window.contains(isi) {
                self.violations += 1;
            } else if isi < 0.0 {
                self.out_of_order += 1;
                if self.out_of_order == 1 {
                    tracing::warn!(prev, timestamp, "spike train is not in ascending order");
                }
            }
        }
        self.last = Some(timestamp);
        self.spikes += 1;
    }

    /// Adds a slice of timestamps in order.
    pub fn push_batch(&mut self, timestamps: &[f64]) {
        for &t in timestamps {
            self.push(t);
        }
    }

    /// Computes the contamination estimate from the spikes seen so far.
    ///
    /// Does not consume or reset the accumulator.
    ///
    /// # Errors
    ///
    /// Same as [`estimate`](crate::estimate), minus configuration errors,
    /// plus [`ContaminationError::RateMismatch`] if `recording` is not
    /// sampled at the accumulator's rate.
    pub fn estimate(&self, recording: &Recording) -> Result<ContaminationEstimate> {
        let got = recording.sampling_rate();
        if got != self.rate {
            return Err(ContaminationError::RateMismatch {
                expected: self.rate.hz(),
                got: got.hz(),
            });
        }
        poisson_estimate(self.window, self.spikes, self.violations, recording)
    }

    /// Number of spikes pushed.
    pub fn spikes(&self) -> usize {
        self.spikes
    }

    /// Number of intervals inside the violation window.
    pub fn violations(&self) -> usize {
        self.violations
    }

    /// Number of intervals examined.
    pub fn intervals(&self) -> usize {
        interval_count(self.spikes)
    }

    /// Number of intervals with a negative duration.
    pub fn out_of_order(&self) -> usize {
        self.out_of_order
    }

    /// Most recent timestamp, if any.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last
    }

    /// Violation window in samples.
    pub fn window(&self) -> ViolationWindow {
        self.window
    }

    /// Sampling rate of the window.
    pub fn sampling_rate(&self) -> SamplingRate {
        self.rate
    }

    /// Clears all counters, keeping the window.
    pub fn reset(&mut self) {
        self.spikes = 0;
        self.violations = 0;
        self.out_of_order = 0;
        self.last = None;
    }
}
