//! Inter-spike intervals and the refractory violation window.
//!
//! Intervals are produced by a running difference over adjacent timestamps,
//! so no interval buffer is ever allocated.
//!
//! # Example
//!
//! ```
//! use refrac::isi::{intervals, ViolationWindow};
//!
//! let train = [0.0, 2.0, 4.0, 100.0];
//! let isis: Vec<f64> = intervals(&train).collect();
//! assert_eq!(isis, vec![2.0, 2.0, 96.0]);
//!
//! let window = ViolationWindow::new(1, 3).unwrap();
//! assert_eq!(window.count_violations(&train), 2);
//! ```

use core::iter::FusedIterator;
use core::slice::Windows;

use crate::error::{ContaminationError, Result};

/// Number of inter-spike intervals in a train of `spikes` timestamps.
pub const fn interval_count(spikes: usize) -> usize {
    spikes.saturating_sub(1)
}

/// Iterator over consecutive timestamp differences.
///
/// Created by [`intervals`].
#[derive(Debug, Clone)]
pub struct InterSpikeIntervals<'a> {
    pairs: Windows<'a, f64>,
}

/// Returns an iterator over the inter-spike intervals of `train`.
///
/// Yields `train[i + 1] - train[i]` for every adjacent pair. Ordering is not
/// checked; an unsorted train yields negative intervals.
pub fn intervals(train: &[f64]) -> InterSpikeIntervals<'_> {
    InterSpikeIntervals {
        pairs: train.windows(2),
    }
}

impl Iterator for InterSpikeIntervals<'_> {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        self.pairs.next().map(|pair| pair[1] - pair[0])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl ExactSizeIterator for InterSpikeIntervals<'_> {}

impl FusedIterator for InterSpikeIntervals<'_> {}

/// Inclusive range of intervals, in whole samples, that count as refractory
/// violations.
///
/// An interval `isi` is a violation when
/// `censored <= isi <= refractory`. Intervals shorter than the censored
/// period cannot be produced by the sorter and are ignored.
///
/// Always satisfies `0 <= censored < refractory`, so negative intervals are
/// never violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViolationWindow {
    censored: i64,
    refractory: i64,
}

impl ViolationWindow {
    /// Creates a window from whole-sample bounds.
    ///
    /// # Errors
    ///
    /// - [`ContaminationError::NegativeWindow`] if `censored < 0`
    /// - [`ContaminationError::EmptyWindow`] if `refractory <= censored`
    pub fn new(censored: i64, refractory: i64) -> Result<Self> {
        if censored < 0 {
            return Err(ContaminationError::NegativeWindow {
                censored,
                refractory,
            });
        }
        if refractory <= censored {
            return Err(ContaminationError::EmptyWindow {
                censored,
                refractory,
            });
        }
        Ok(Self {
            censored,
            refractory,
        })
    }

    /// Lower bound (censored period) in samples.
    pub const fn censored(&self) -> i64 {
        self.censored
    }

    /// Upper bound (refractory period) in samples.
    pub const fn refractory(&self) -> i64 {
        self.refractory
    }

    /// Exposure width `Tf = refractory - censored` in samples, always positive.
    pub const fn width(&self) -> i64 {
        self.refractory - self.censored
    }

    /// Returns true if `isi` falls inside the window, both ends inclusive.
    #[inline]
    pub fn contains(&self, isi: f64) -> bool {
        isi >= self.censored as f64 && isi <= self.refractory as f64
    }

    /// Counts the intervals of `train` that fall inside the window.
    pub fn count_violations(&self, train: &[f64]) -> usize {
        intervals(train).filter(|&isi| self.contains(isi)).count()
    }
}
