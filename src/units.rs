//! Time units for spike trains and recordings.
//!
//! Spike timestamps and recording durations are expressed in the recording's
//! own unit: sample indices when the sampling rate is a real rate, or seconds
//! when the sampling rate is [`SamplingRate::UNIT`]. Refractory and censored
//! periods are always physical durations in seconds. Keeping the two apart in
//! [`Samples`] and [`Seconds`] makes the conversion explicit at every call site.
//!
//! # Formula
//!
//! ```text
//! whole_samples = trunc(seconds * sampling_rate)
//! seconds       = samples / sampling_rate
//! ```
//!
//! # Example
//!
//! ```
//! use refrac::{Recording, Samples, SamplingRate, Seconds};
//!
//! // 30 kHz headstage, 10 minutes of data, timestamps in sample indices
//! let rate = SamplingRate::new(30_000.0).unwrap();
//! let recording = Recording::new(rate, Samples(18_000_000.0)).unwrap();
//!
//! assert_eq!(rate.whole_samples(Seconds(1e-3)), 30);
//! assert_eq!(recording.duration_seconds(), Seconds(600.0));
//! ```

use crate::error::{ContaminationError, Result};

/// Physical duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Seconds(pub f64);

/// Timestamp or duration in the recording's own unit.
///
/// Sample indices for a real sampling rate, seconds for [`SamplingRate::UNIT`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Samples(pub f64);

impl Seconds {
    /// Returns the raw value in seconds.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Samples {
    /// Returns the raw value in samples.
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Validated sampling rate in Hz.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SamplingRate {
    hz: f64,
}

impl SamplingRate {
    /// Rate of 1 Hz: timestamps and durations are already in seconds.
    pub const UNIT: Self = Self { hz: 1.0 };

    /// Creates a sampling rate.
    ///
    /// # Errors
    ///
    /// Returns [`ContaminationError::InvalidSamplingRate`] if `hz` is not
    /// finite or not strictly positive.
    ///
    /// # Example
    ///
    /// ```
    /// use refrac::SamplingRate;
    ///
    /// assert!(SamplingRate::new(30_000.0).is_ok());
    /// assert!(SamplingRate::new(0.0).is_err());
    /// ```
    pub fn new(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ContaminationError::InvalidSamplingRate(hz));
        }
        Ok(Self { hz })
    }

    /// Returns the rate in Hz.
    pub const fn hz(&self) -> f64 {
        self.hz
    }

    /// Converts a physical duration to a whole number of samples.
    ///
    /// Truncates toward zero, so a period shorter than one sample maps to 0.
    pub fn whole_samples(&self, duration: Seconds) -> i64 {
        libm::trunc(duration.0 * self.hz) as i64
    }

    /// Converts a duration in recording units back to seconds.
    pub fn to_seconds(&self, duration: Samples) -> Seconds {
        Seconds(duration.0 / self.hz)
    }
}

impl Default for SamplingRate {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A recording's sampling rate bound to its total duration.
///
/// The duration is in the same unit as the spike train, so the firing rate is
/// always `spikes / (duration / rate)` regardless of which unit the caller
/// works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recording {
    sampling_rate: SamplingRate,
    duration: Samples,
}

impl Recording {
    /// Creates a recording whose timestamps and duration are in samples.
    ///
    /// # Errors
    ///
    /// Returns [`ContaminationError::InvalidDuration`] if `duration` is not
    /// finite or not strictly positive.
    pub fn new(sampling_rate: SamplingRate, duration: Samples) -> Result<Self> {
        if !duration.0.is_finite() || duration.0 <= 0.0 {
            return Err(ContaminationError::InvalidDuration(duration.0));
        }
        Ok(Self {
            sampling_rate,
            duration,
        })
    }

    /// Creates a recording whose timestamps and duration are in seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use refrac::{Recording, SamplingRate, Seconds};
    ///
    /// let recording = Recording::in_seconds(Seconds(120.0)).unwrap();
    /// assert_eq!(recording.sampling_rate(), SamplingRate::UNIT);
    /// ```
    pub fn in_seconds(duration: Seconds) -> Result<Self> {
        Self::new(SamplingRate::UNIT, Samples(duration.0))
    }

    /// Returns the sampling rate.
    pub const fn sampling_rate(&self) -> SamplingRate {
        self.sampling_rate
    }

    /// Returns the duration in recording units.
    pub const fn duration(&self) -> Samples {
        self.duration
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> Seconds {
        self.sampling_rate.to_seconds(self.duration)
    }

    /// Mean firing rate in spikes per second for `spikes` events.
    pub fn firing_rate(&self, spikes: usize) -> f64 {
        spikes as f64 / self.duration_seconds().0
    }
}
