pub mod astronomy;
pub mod crop;
pub mod model;
pub mod observation;
pub mod pet;
pub mod water;

#[cfg(feature = "python")]
mod pyo3_bindings;

pub use crate::astronomy::AstronomicalFactors;
pub use crate::crop::{crop_coefficient, CropCoefficient, GrowthStage};
pub use crate::model::{
    evaluate_batch, evaluate_day, DailyObservation, DailyResult, DayOutcome, EngineConfig, Error,
    Site,
};
pub use crate::pet::penman_monteith::{
    crop_evapotranspiration, reference_evapotranspiration, EtoComponents,
};
pub use crate::water::{water_required, water_required_series, IrrigationEfficiency};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn agro_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use pyo3_bindings::{astronomy, crop, pet, register_submodule, water};

    let py = m.py();

    register_submodule(py, m, &astronomy::make_module(py)?, "agro_rs")?;
    register_submodule(py, m, &pet::make_module(py)?, "agro_rs")?;
    register_submodule(py, m, &crop::make_module(py)?, "agro_rs")?;
    register_submodule(py, m, &water::make_module(py)?, "agro_rs")?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

#[cfg(feature = "python")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);
