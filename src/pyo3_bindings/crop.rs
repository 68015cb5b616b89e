use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use crate::crop::crop_coefficient;

/// Returns the coefficient and whether the stage was recognised.
#[gen_stub_pyfunction(module = "agro_rs.crop")]
#[pyfunction]
#[pyo3(name = "crop_coefficient")]
pub fn py_crop_coefficient(growth_stage: String) -> (f64, bool) {
    let kc = crop_coefficient(&growth_stage);
    (kc.value(), kc.is_known())
}

pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "crop")?;
    m.add_function(wrap_pyfunction!(py_crop_coefficient, &m)?)?;
    Ok(m)
}
