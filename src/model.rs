use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::crop::{crop_coefficient, CropCoefficient};
use crate::pet::penman_monteith::{crop_evapotranspiration, reference_evapotranspiration};
use crate::water::{water_required, IrrigationEfficiency};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("domain error: {0}")]
    Domain(String),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("Unknown growth stage '{0}'. Valid options: {1}")]
    UnknownGrowthStage(String, String),
    #[error("{field} must be within [{min}, {max}] (got {value})")]
    InputRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{0} must be finite (got {1})")]
    NonFinite(&'static str, f64),
    #[error("{0} and {1} must have the same length (got {2} and {3})")]
    LengthMismatch(&'static str, &'static str, usize, usize),
}

pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), Error> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InputRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFinite(field, value))
    }
}

/// Fixed location the engine is configured for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Degrees, positive north.
    pub latitude: f64,
    /// Meters above sea level.
    pub elevation: f64,
    /// Crop growth stage label, matched case-insensitively.
    pub growth_stage: String,
}

impl Site {
    pub fn new(
        latitude: f64,
        elevation: f64,
        growth_stage: impl Into<String>,
    ) -> Result<Self, Error> {
        let site = Site {
            latitude,
            elevation,
            growth_stage: growth_stage.into(),
        };
        site.validate()?;
        Ok(site)
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_range("latitude", self.latitude, -90., 90.)?;
        check_finite("elevation", self.elevation)
    }

    pub fn crop_coefficient(&self) -> CropCoefficient {
        crop_coefficient(&self.growth_stage)
    }
}

/// One day of weather at the site, already aggregated to daily extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub day_of_year: u16,
    /// °C
    pub temp_max: f64,
    /// °C
    pub temp_min: f64,
    /// °C
    pub temp_mean: f64,
    /// %
    pub rh_max: f64,
    /// %
    pub rh_min: f64,
    /// cm
    pub precipitation: f64,
}

impl DailyObservation {
    /// Fails fast on values the formulas cannot give a plausible answer for.
    ///
    /// Physical plausibility of temperatures is left to the data source;
    /// only finiteness is checked here.
    pub fn validate(&self) -> Result<(), Error> {
        check_range("day_of_year", f64::from(self.day_of_year), 1., 366.)?;
        check_finite("temp_max", self.temp_max)?;
        check_finite("temp_min", self.temp_min)?;
        check_finite("temp_mean", self.temp_mean)?;
        check_range("rh_max", self.rh_max, 0., 100.)?;
        check_range("rh_min", self.rh_min, 0., 100.)?;
        check_finite("precipitation", self.precipitation)
    }
}

/// Site plus irrigation settings, fixed for the duration of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub site: Site,
    #[serde(default)]
    pub irrigation_efficiency: IrrigationEfficiency,
}

impl EngineConfig {
    pub fn new(site: Site) -> Result<Self, Error> {
        let config = EngineConfig {
            site,
            irrigation_efficiency: IrrigationEfficiency::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks a configuration that did not go through [`EngineConfig::new`],
    /// e.g. one deserialized from a file.
    pub fn validate(&self) -> Result<(), Error> {
        self.site.validate()?;
        if let CropCoefficient::Unknown = self.site.crop_coefficient() {
            warn!(
                growth_stage = %self.site.growth_stage,
                "unknown growth stage, crop coefficient defaults to 0"
            );
        }
        Ok(())
    }

    pub fn with_irrigation_efficiency(&self, efficiency: f64) -> Result<Self, Error> {
        Ok(EngineConfig {
            site: self.site.clone(),
            irrigation_efficiency: IrrigationEfficiency::new(efficiency)?,
        })
    }

    /// New configuration for the next part of the season.
    pub fn with_growth_stage(&self, growth_stage: impl Into<String>) -> Result<Self, Error> {
        let config = EngineConfig {
            site: Site {
                growth_stage: growth_stage.into(),
                ..self.site.clone()
            },
            irrigation_efficiency: self.irrigation_efficiency,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyResult {
    pub day_of_year: u16,
    /// mm/day
    pub eto: f64,
    pub crop_coefficient: CropCoefficient,
    /// mm/day
    pub etc: f64,
    /// Liters for a 1 ha reference plot.
    pub water_required: f64,
    /// Polar day or night: the sunset hour angle had to be clamped.
    pub hour_angle_clamped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    pub day_of_year: u16,
    pub result: Result<DailyResult, Error>,
}

pub fn evaluate_day(
    config: &EngineConfig,
    observation: &DailyObservation,
) -> Result<DailyResult, Error> {
    config.site.validate()?;
    observation.validate()?;

    let components = reference_evapotranspiration(&config.site, observation)?;
    let eto = components.eto;
    let etc = crop_evapotranspiration(eto, &config.site.growth_stage);
    let water = water_required(
        etc,
        observation.precipitation,
        config.irrigation_efficiency,
    );

    debug!(
        day_of_year = observation.day_of_year,
        eto, etc, water_required = water, "evaluated day"
    );

    Ok(DailyResult {
        day_of_year: observation.day_of_year,
        eto,
        crop_coefficient: config.site.crop_coefficient(),
        etc,
        water_required: water,
        hour_angle_clamped: components.astronomy.hour_angle_clamped,
    })
}

/// Evaluates every day independently; a failing day is recorded and the
/// batch carries on. Output order matches input order.
pub fn evaluate_batch(
    config: &EngineConfig,
    observations: &[DailyObservation],
) -> Vec<DayOutcome> {
    let evaluate = |observation: &DailyObservation| {
        let result = evaluate_day(config, observation);
        if let Err(err) = &result {
            warn!(
                day_of_year = observation.day_of_year,
                %err,
                "day could not be evaluated"
            );
        }
        DayOutcome {
            day_of_year: observation.day_of_year,
            result,
        }
    };

    #[cfg(feature = "parallel")]
    let outcomes = observations.par_iter().map(evaluate).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes = observations.iter().map(evaluate).collect();

    outcomes
}
