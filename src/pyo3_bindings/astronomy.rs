use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use crate::astronomy::extraterrestrial_radiation;
use crate::model::{check_range, Error};

#[gen_stub_pyfunction(module = "agro_rs.astronomy")]
#[pyfunction]
#[pyo3(name = "extraterrestrial_radiation")]
pub fn py_extraterrestrial_radiation<'py>(
    py: Python<'py>,
    latitude: f64,
    day_of_year: PyReadonlyArray1<'py, usize>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    check_range("latitude", latitude, -90., 90.)?;
    let radiation = day_of_year
        .as_array()
        .iter()
        .map(|&day| {
            let doy = u16::try_from(day)
                .ok()
                .filter(|doy| (1..=366).contains(doy))
                .ok_or(Error::InputRange {
                    field: "day_of_year",
                    value: day as f64,
                    min: 1.,
                    max: 366.,
                })?;
            Ok(extraterrestrial_radiation(latitude, doy))
        })
        .collect::<Result<Vec<f64>, Error>>()?;

    Ok(PyArray1::from_vec(py, radiation))
}

pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "astronomy")?;
    m.add_function(wrap_pyfunction!(py_extraterrestrial_radiation, &m)?)?;
    Ok(m)
}
