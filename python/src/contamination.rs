//! Python bindings for contamination estimation.

use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use refrac::{
    ContaminationConfig, ContaminationError, OnlineContamination as RfOnlineContamination,
    Recording, Samples, SamplingRate, Seconds,
};

fn to_py_err(err: ContaminationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Estimate the contamination ratio of a spike-sorted cluster.
///
/// Counts inter-spike intervals between the censored and refractory periods
/// and converts the count into a contamination fraction under a Poisson
/// model.
///
/// Args:
///     spike_train (np.ndarray): Ascending spike timestamps as 1D float64.
///     sampling_rate (float): Sampling rate in Hz, or 1.0 if timestamps are in seconds.
///     total_duration (float): Recording length, same unit as spike_train.
///     refractory_time (float): Refractory period in seconds. Default 1e-3.
///     censored_time (float): Censored period in seconds. Default 0.5e-3.
///
/// Returns:
///     float: Contamination ratio in [0, 1].
///
/// Raises:
///     ValueError: If the periods are misordered, the train has fewer than
///         2 spikes, or the ratio is undefined for the input.
///
/// Example:
///     >>> import numpy as np
///     >>> import pyrefrac
///     >>> train = np.array([0.0, 2.0, 4.0, 6.0, 8.0, 10.0])
///     >>> pyrefrac.contamination_ratio(train, 1.0, 10.0, 3.0, 1.0)
///     0.4472...
#[pyfunction]
#[pyo3(signature = (spike_train, sampling_rate, total_duration, refractory_time = 1e-3, censored_time = 0.5e-3))]
pub fn contamination_ratio(
    spike_train: PyReadonlyArray1<f64>,
    sampling_rate: f64,
    total_duration: f64,
    refractory_time: f64,
    censored_time: f64,
) -> PyResult<f64> {
    let train = spike_train
        .as_slice()
        .map_err(|_| PyValueError::new_err("spike_train must be a contiguous float64 array"))?;

    refrac::contamination_ratio(
        train,
        sampling_rate,
        total_duration,
        refractory_time,
        censored_time,
    )
    .map_err(to_py_err)
}

/// Streaming refractory-violation counter.
///
/// Feed spike timestamps as they are detected and query the contamination
/// estimate at any point.
///
/// # Example
/// ```python
/// import pyrefrac
///
/// acc = pyrefrac.OnlineContamination(sampling_rate=30000.0)
/// for t in detected_spike_samples:
///     acc.push(t)
///
/// ratio = acc.estimate(total_duration=18_000_000.0)
/// ```
#[pyclass]
pub struct OnlineContamination {
    inner: RfOnlineContamination,
}

#[pymethods]
impl OnlineContamination {
    /// Create a new accumulator.
    ///
    /// Args:
    ///     sampling_rate (float): Sampling rate in Hz, or 1.0 for timestamps in seconds.
    ///     refractory_time (float): Refractory period in seconds. Default 1e-3.
    ///     censored_time (float): Censored period in seconds. Default 0.5e-3.
    #[new]
    #[pyo3(signature = (sampling_rate, refractory_time = 1e-3, censored_time = 0.5e-3))]
    fn new(sampling_rate: f64, refractory_time: f64, censored_time: f64) -> PyResult<Self> {
        let config = ContaminationConfig::new(Seconds(refractory_time), Seconds(censored_time))
            .map_err(to_py_err)?;
        let sampling_rate = SamplingRate::new(sampling_rate).map_err(to_py_err)?;
        let inner = RfOnlineContamination::from_config(&config, sampling_rate).map_err(to_py_err)?;

        Ok(Self { inner })
    }

    /// Add one spike timestamp.
    fn push(&mut self, timestamp: f64) {
        self.inner.push(timestamp);
    }

    /// Add a batch of spike timestamps in order.
    ///
    /// Args:
    ///     timestamps (np.ndarray): 1D float64 array.
    fn push_batch(&mut self, timestamps: PyReadonlyArray1<f64>) -> PyResult<()> {
        let slice = timestamps
            .as_slice()
            .map_err(|_| PyValueError::new_err("timestamps must be a contiguous float64 array"))?;
        self.inner.push_batch(slice);
        Ok(())
    }

    /// Contamination ratio of the spikes seen so far.
    ///
    /// Args:
    ///     total_duration (float): Recording length, same unit as the timestamps.
    ///
    /// Returns:
    ///     float: Contamination ratio in [0, 1].
    fn estimate(&self, total_duration: f64) -> PyResult<f64> {
        let recording =
            Recording::new(self.inner.sampling_rate(), Samples(total_duration)).map_err(to_py_err)?;
        self.inner
            .estimate(&recording)
            .map(|result| result.ratio)
            .map_err(to_py_err)
    }

    /// Clear all counters.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Number of spikes pushed.
    #[getter]
    fn spikes(&self) -> usize {
        self.inner.spikes()
    }

    /// Number of refractory violations seen.
    #[getter]
    fn violations(&self) -> usize {
        self.inner.violations()
    }

    fn __repr__(&self) -> String {
        let window = self.inner.window();
        format!(
            "OnlineContamination(window=[{}, {}] samples, spikes={}, violations={})",
            window.censored(),
            window.refractory(),
            self.spikes(),
            self.violations()
        )
    }
}
