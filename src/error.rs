//! Error type for contamination estimation.
//!
//! Every degenerate input the estimator can see is reported as a
//! [`ContaminationError`] variant instead of leaking out as NaN or infinity.

use thiserror::Error;

/// Errors that can occur while estimating cluster contamination.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ContaminationError {
    /// Refractory period is not strictly longer than the censored period
    #[error("censored period ({censored} s) is not shorter than refractory period ({refractory} s)")]
    PeriodOrder {
        /// Refractory period in seconds
        refractory: f64,
        /// Censored period in seconds
        censored: f64,
    },

    /// Period is negative or not finite
    #[error("period must be finite and non-negative, got {0} s")]
    InvalidPeriod(f64),

    /// Sampling rate is zero, negative or not finite
    #[error("sampling rate must be finite and positive, got {0} Hz")]
    InvalidSamplingRate(f64),

    /// Recording duration is zero, negative or not finite
    #[error("total duration must be finite and positive, got {0}")]
    InvalidDuration(f64),

    /// Fewer than two spikes, so there is no inter-spike interval to inspect
    #[error("at least 2 spikes are required, got {0}")]
    InsufficientSpikes(usize),

    /// Violation window is empty once both periods are truncated to whole samples
    #[error("violation window [{censored}, {refractory}] samples has no width")]
    EmptyWindow {
        /// Censored period in whole samples
        censored: i64,
        /// Refractory period in whole samples
        refractory: i64,
    },

    /// Violation window starts below zero samples
    #[error("violation window [{censored}, {refractory}] samples starts below zero")]
    NegativeWindow {
        /// Censored period in whole samples
        censored: i64,
        /// Refractory period in whole samples
        refractory: i64,
    },

    /// Recording was sampled at a different rate than the violation window
    #[error("window built for {expected} Hz but recording is sampled at {got} Hz")]
    RateMismatch {
        /// Rate the window was converted at
        expected: f64,
        /// Rate of the recording passed to the estimate
        got: f64,
    },

    /// More violations than the Poisson model can explain
    ///
    /// `expected` is `Tf * N * freq`; the estimator is undefined once
    /// `violations / expected > 1`.
    #[error("{violations} refractory violations exceed the model bound of {expected}")]
    ExcessViolations {
        /// Observed refractory violations
        violations: usize,
        /// Normaliser `Tf * N * freq`
        expected: f64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ContaminationError>;
