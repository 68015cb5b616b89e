//! Irrigation volume from crop evapotranspiration and rainfall.
//!
//! Depths in mm are read directly as m^3 for a 1 ha reference plot
//! (1 mm over 10 000 m^2 = 10 m^3 would be the strict conversion). Results
//! from this module are therefore only meaningful per that reference plot.

use ndarray::{Array1, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

use crate::model::Error;

/// Fraction of applied water that reaches the crop, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct IrrigationEfficiency(f64);

impl IrrigationEfficiency {
    pub fn new(efficiency: f64) -> Result<Self, Error> {
        if efficiency.is_finite() && efficiency > 0. && efficiency <= 1. {
            Ok(IrrigationEfficiency(efficiency))
        } else {
            Err(Error::Configuration(format!(
                "irrigation efficiency must be within (0, 1] (got {efficiency})"
            )))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for IrrigationEfficiency {
    fn default() -> Self {
        IrrigationEfficiency(0.75)
    }
}

impl TryFrom<f64> for IrrigationEfficiency {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        IrrigationEfficiency::new(value)
    }
}

impl From<IrrigationEfficiency> for f64 {
    fn from(value: IrrigationEfficiency) -> f64 {
        value.0
    }
}

/// Liters of irrigation needed, never negative. Missing inputs (NaN) give
/// NaN rather than a zero demand.
pub fn water_required(
    etc: f64,
    precipitation_cm: f64,
    efficiency: IrrigationEfficiency,
) -> f64 {
    let precipitation_mm = precipitation_cm * 10.;
    let net_demand = (etc - precipitation_mm) / efficiency.get(); // m^3 (1 ha)
    if net_demand.is_nan() {
        return net_demand;
    }
    (net_demand * 1000.).max(0.)
}

/// Element-wise [`water_required`], floored per day.
pub fn water_required_series(
    etc: ArrayView1<f64>,
    precipitation_cm: ArrayView1<f64>,
    efficiency: IrrigationEfficiency,
) -> Result<Array1<f64>, Error> {
    if etc.len() != precipitation_cm.len() {
        return Err(Error::LengthMismatch(
            "etc",
            "precipitation",
            etc.len(),
            precipitation_cm.len(),
        ));
    }
    Ok(Zip::from(etc)
        .and(precipitation_cm)
        .map_collect(|&etc, &precipitation| {
            water_required(etc, precipitation, efficiency)
        }))
}
