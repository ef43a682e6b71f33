use pyo3::prelude::*;

mod contamination;

use contamination::OnlineContamination;

/// pyrefrac: refractory-period contamination estimates for spike-sorted clusters.
#[pymodule]
fn pyrefrac(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(contamination::contamination_ratio, m)?)?;
    m.add_class::<OnlineContamination>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
