use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use super::data::{PyObservations, PySite};
use super::register_submodule;
use crate::model::{evaluate_batch, EngineConfig};

type Simulation<'py> = (
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Vec<Option<String>>,
);

/// Returns `(eto, etc, water_required, errors)`. Days that failed hold NaN
/// and their error message.
#[gen_stub_pyfunction(module = "agro_rs.pet.penman_monteith")]
#[pyfunction]
#[pyo3(name = "simulate", signature = (site, observations, irrigation_efficiency = 0.75))]
pub fn py_simulate<'py>(
    py: Python<'py>,
    site: PySite,
    observations: PyObservations<'py>,
    irrigation_efficiency: f64,
) -> PyResult<Simulation<'py>> {
    let config = EngineConfig::new(site.into_site()?)?
        .with_irrigation_efficiency(irrigation_efficiency)?;
    let observations = observations.into_observations()?;

    let outcomes = evaluate_batch(&config, &observations);

    let n_timesteps = outcomes.len();
    let mut eto = Vec::with_capacity(n_timesteps);
    let mut etc = Vec::with_capacity(n_timesteps);
    let mut water_required = Vec::with_capacity(n_timesteps);
    let mut errors = Vec::with_capacity(n_timesteps);

    for outcome in outcomes {
        match outcome.result {
            Ok(day) => {
                eto.push(day.eto);
                etc.push(day.etc);
                water_required.push(day.water_required);
                errors.push(None);
            }
            Err(err) => {
                eto.push(f64::NAN);
                etc.push(f64::NAN);
                water_required.push(f64::NAN);
                errors.push(Some(err.to_string()));
            }
        }
    }

    Ok((
        PyArray1::from_vec(py, eto),
        PyArray1::from_vec(py, etc),
        PyArray1::from_vec(py, water_required),
        errors,
    ))
}

fn make_penman_monteith_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "penman_monteith")?;
    m.add_function(wrap_pyfunction!(py_simulate, &m)?)?;
    Ok(m)
}

pub fn make_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, "pet")?;
    register_submodule(py, &m, &make_penman_monteith_module(py)?, "agro_rs.pet")?;
    Ok(m)
}
