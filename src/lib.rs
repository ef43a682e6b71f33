//! Refractory-period contamination estimates for spike-sorted clusters.
//!
//! Given the spike timestamps of one putative neuron, `refrac` estimates the
//! fraction of its spikes that come from other neurons, from the number of
//! inter-spike intervals that violate the refractory period.
//!
//! `#![no_std]`, allocation-free, O(N) in the number of spikes.
//!
//! # Units
//!
//! Timestamps and recording durations share one unit, carried by
//! [`Recording`]: sample indices at a real [`SamplingRate`], or seconds at
//! [`SamplingRate::UNIT`]. Refractory and censored periods are always
//! [`Seconds`].
//!
//! # Example
//!
//! ```
//! use refrac::{estimate, ContaminationConfig, Recording, Seconds};
//!
//! // Timestamps in seconds over a 10 s recording
//! let train = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
//! let recording = Recording::in_seconds(Seconds(10.0)).unwrap();
//! let config = ContaminationConfig::new(Seconds(3.0), Seconds(1.0)).unwrap();
//!
//! let result = estimate(&train, &recording, &config).unwrap();
//! assert_eq!(result.violations, 5);
//! assert!((result.ratio - 0.4472).abs() < 1e-4);
//! ```

#![no_std]

mod contamination;
mod error;
pub mod isi;
mod online;
mod units;

pub use contamination::{
    contamination_ratio, estimate, estimate_clusters, ContaminationConfig, ContaminationEstimate,
    DEFAULT_CENSORED, DEFAULT_REFRACTORY,
};
pub use error::{ContaminationError, Result};
pub use isi::{intervals, InterSpikeIntervals, ViolationWindow};
pub use online::OnlineContamination;
pub use units::{Recording, Samples, SamplingRate, Seconds};
