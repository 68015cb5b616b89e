use numpy::{PyArray1, PyReadonlyArray1, ToPyArray};
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use crate::water::{water_required_series, IrrigationEfficiency};

#[gen_stub_pyfunction(module = "agro_rs.water")]
#[pyfunction]
#[pyo3(name = "water_required", signature = (etc, precipitation, irrigation_efficiency = 0.75))]
pub fn py_water_required<'py>(
    py: Python<'py>,
    etc: PyReadonlyArray1<'py, f64>,
    precipitation: PyReadonlyArray1<'py, f64>,
    irrigation_efficiency: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let liters = water_required_series(
        etc.as_array(),
        precipitation.as_array(),
        IrrigationEfficiency::new(irrigation_efficiency)?,
    )?;
    Ok(liters.to_pyarray(py))
}

pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "water")?;
    m.add_function(wrap_pyfunction!(py_water_required, &m)?)?;
    Ok(m)
}
