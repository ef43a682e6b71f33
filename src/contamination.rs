//! Refractory-period contamination estimate for spike-sorted clusters.
//!
//! A well-isolated unit never fires twice within its refractory period. When
//! a cluster contains spikes from other neurons, some inter-spike intervals
//! land inside the window between the sorter's censored period and the
//! refractory period. Assuming contaminating spikes arrive as an independent
//! Poisson process at the unit's own mean rate, the number of such
//! violations predicts the contaminated fraction of the cluster.
//!
//! # Algorithm
//!
//! ```text
//! Tf     = trunc(refractory * fs) - trunc(censored * fs)   // samples
//! N      = number of spikes
//! Nc     = #{ isi : trunc(censored * fs) <= isi <= trunc(refractory * fs) }
//! freq   = N / (duration / fs)                             // Hz
//! ratio  = 1 - sqrt(1 - Nc / (Tf * N * freq))
//! ```
//!
//! Every input for which the formula is undefined (no intervals, zero-width
//! window, negative radicand) is rejected with a [`ContaminationError`].
//!
//! # Example
//!
//! ```
//! use refrac::{estimate, ContaminationConfig, Recording, Samples, SamplingRate};
//!
//! // Timestamps in sample indices at 30 kHz over 10 s
//! let rate = SamplingRate::new(30_000.0).unwrap();
//! let recording = Recording::new(rate, Samples(300_000.0)).unwrap();
//! let train = [0.0, 9_000.0, 9_020.0, 45_000.0, 120_000.0, 250_000.0];
//!
//! let result = estimate(&train, &recording, &ContaminationConfig::default()).unwrap();
//! assert_eq!(result.violations, 1);
//! assert!(result.ratio > 0.0 && result.ratio < 1.0);
//! ```
//!
//! # References
//!
//! Hill, D. N., Mehta, S. B., & Kleinfeld, D. (2011). Quality metrics to
//! accompany spike sorting of extracellular signals. Journal of Neuroscience,
//! 31(24), 8699-8705.

use crate::error::{ContaminationError, Result};
use crate::isi::{interval_count, ViolationWindow};
use crate::online::OnlineContamination;
use crate::units::{Recording, Samples, SamplingRate, Seconds};

/// Default refractory period: 1 ms.
pub const DEFAULT_REFRACTORY: Seconds = Seconds(1e-3);

/// Default censored period: 0.5 ms.
pub const DEFAULT_CENSORED: Seconds = Seconds(0.5e-3);

/// Refractory and censored periods used to define violations.
///
/// The refractory period must be strictly longer than the censored period.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContaminationConfig {
    refractory: Seconds,
    censored: Seconds,
}

impl Default for ContaminationConfig {
    fn default() -> Self {
        Self {
            refractory: DEFAULT_REFRACTORY,
            censored: DEFAULT_CENSORED,
        }
    }
}

impl ContaminationConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```
    /// use refrac::{ContaminationConfig, ContaminationError, Seconds};
    ///
    /// let config = ContaminationConfig::new(Seconds(1.5e-3), Seconds(0.3e-3)).unwrap();
    /// assert_eq!(config.refractory(), Seconds(1.5e-3));
    ///
    /// let err = ContaminationConfig::new(Seconds(0.5e-3), Seconds(1e-3)).unwrap_err();
    /// assert!(matches!(err, ContaminationError::PeriodOrder { .. }));
    /// ```
    pub fn new(refractory: Seconds, censored: Seconds) -> Result<Self> {
        let config = Self {
            refractory,
            censored,
        };
        config.validate()?;
        Ok(config)
    }

    /// Refractory period.
    pub const fn refractory(&self) -> Seconds {
        self.refractory
    }

    /// Censored period.
    pub const fn censored(&self) -> Seconds {
        self.censored
    }

    /// Checks the period invariants.
    ///
    /// # Errors
    ///
    /// - [`ContaminationError::PeriodOrder`] unless `refractory > censored`
    /// - [`ContaminationError::InvalidPeriod`] if either period is negative or
    ///   not finite
    pub fn validate(&self) -> Result<()> {
        let (refractory, censored) = (self.refractory.0, self.censored.0);

        // Also rejects NaN
        if !(refractory > censored) {
            return Err(ContaminationError::PeriodOrder {
                refractory,
                censored,
            });
        }

        for period in [refractory, censored] {
            if !period.is_finite() || period < 0.0 {
                return Err(ContaminationError::InvalidPeriod(period));
            }
        }

        Ok(())
    }

    /// Converts both periods to whole samples at `rate`.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures, and returns
    /// [`ContaminationError::EmptyWindow`] when truncation leaves the window
    /// with no width (e.g. 1.5 ms and 1.2 ms at a 1 kHz rate).
    pub fn window(&self, rate: SamplingRate) -> Result<ViolationWindow> {
        self.validate()?;
        ViolationWindow::new(
            rate.whole_samples(self.censored),
            rate.whole_samples(self.refractory),
        )
    }
}

/// Outcome of a contamination estimate.
///
/// Carries the counts the ratio was computed from so a result can be audited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContaminationEstimate {
    /// Estimated fraction of contaminating spikes, in [0, 1]
    pub ratio: f64,
    /// Intervals inside the violation window
    pub violations: usize,
    /// Spikes in the cluster
    pub spikes: usize,
    /// Violation window in samples
    pub window: ViolationWindow,
    /// Mean firing rate in Hz
    pub firing_rate: f64,
}

impl ContaminationEstimate {
    /// Returns true if no interval violated the refractory period.
    pub fn is_clean(&self) -> bool {
        self.violations == 0
    }

    /// Number of inter-spike intervals examined.
    pub fn intervals(&self) -> usize {
        interval_count(self.spikes)
    }

    /// Fraction of intervals that are violations.
    pub fn violation_fraction(&self) -> f64 {
        self.violations as f64 / self.intervals() as f64
    }
}

/// Estimates the contamination of one cluster.
///
/// `train` holds ascending spike timestamps in the recording's unit. Ordering
/// is not validated.
///
/// # Errors
///
/// - Configuration errors from [`ContaminationConfig::validate`], before any
///   spike is examined
/// - [`ContaminationError::EmptyWindow`] if the window truncates to zero width
/// - [`ContaminationError::InsufficientSpikes`] for fewer than two spikes
/// - [`ContaminationError::ExcessViolations`] if the radicand would be negative
///
/// # Performance
///
/// O(N) time, O(1) extra space.
pub fn estimate(
    train: &[f64],
    recording: &Recording,
    config: &ContaminationConfig,
) -> Result<ContaminationEstimate> {
    let mut acc = OnlineContamination::from_config(config, recording.sampling_rate())?;
    acc.push_batch(train);
    acc.estimate(recording)
}

/// Bare-number entry point.
///
/// `sampling_rate` is 1 when `train` and `total_duration` are in seconds;
/// otherwise both are in samples and `total_duration / sampling_rate` is the
/// recording length in seconds. Periods are in seconds.
///
/// # Example
///
/// ```
/// use refrac::contamination_ratio;
///
/// let train = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
/// let ratio = contamination_ratio(&train, 1.0, 10.0, 3.0, 1.0).unwrap();
/// let expected = 1.0 - (1.0 - 5.0 / (2.0 * 6.0 * 0.6_f64)).sqrt();
/// assert!((ratio - expected).abs() < 1e-12);
/// ```
pub fn contamination_ratio(
    train: &[f64],
    sampling_rate: f64,
    total_duration: f64,
    refractory_time: f64,
    censored_time: f64,
) -> Result<f64> {
    let config = ContaminationConfig::new(Seconds(refractory_time), Seconds(censored_time))?;
    let rate = SamplingRate::new(sampling_rate)?;
    let recording = Recording::new(rate, Samples(total_duration))?;
    estimate(train, &recording, &config).map(|result| result.ratio)
}

/// Estimates every cluster of a recording independently.
///
/// Yields one result per cluster, in order.
pub fn estimate_clusters<'a, I>(
    clusters: I,
    recording: &'a Recording,
    config: &'a ContaminationConfig,
) -> impl Iterator<Item = Result<ContaminationEstimate>> + 'a
where
    I: IntoIterator<Item = &'a [f64]>,
    I::IntoIter: 'a,
{
    clusters
        .into_iter()
        .map(move |train| estimate(train, recording, config))
}

/// Applies the Poisson collision model to accumulated counts.
pub(crate) fn poisson_estimate(
    window: ViolationWindow,
    spikes: usize,
    violations: usize,
    recording: &Recording,
) -> Result<ContaminationEstimate> {
    if spikes < 2 {
        return Err(ContaminationError::InsufficientSpikes(spikes));
    }

    let firing_rate = recording.firing_rate(spikes);
    let expected = window.width() as f64 * spikes as f64 * firing_rate;
    let load = violations as f64 / expected;

    if load > 1.0 {
        tracing::warn!(spikes, violations, expected, "violations exceed Poisson bound");
        return Err(ContaminationError::ExcessViolations {
            violations,
            expected,
        });
    }

    let ratio = 1.0 - libm::sqrt(1.0 - load);

    tracing::debug!(
        spikes,
        violations,
        censored = window.censored(),
        refractory = window.refractory(),
        firing_rate,
        ratio,
        "contamination estimated"
    );

    Ok(ContaminationEstimate {
        ratio,
        violations,
        spikes,
        window,
        firing_rate,
    })
}
