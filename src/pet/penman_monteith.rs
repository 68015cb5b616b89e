//! Modified FAO-56 Penman-Monteith reference evapotranspiration.
//!
//! Radiation is not measured: net radiation is a fixed fraction of the
//! extraterrestrial radiation and the longwave correction is driven by mean
//! temperature and humidity. Wind is not measured either; the aerodynamic
//! term assumes the reference 2 m/s.

use serde::Serialize;

use crate::astronomy::AstronomicalFactors;
use crate::crop::crop_coefficient;
use crate::model::{DailyObservation, Error, Site};

/// m/s, baked into the denominator.
const REFERENCE_WIND_SPEED: f64 = 2.;

/// Stefan-Boltzmann style coefficient (MJ K^-4 m^-2 day^-1).
const LONGWAVE_COEFFICIENT: f64 = 0.00000005;

/// Temperature poles closer than this are rejected.
const POLE_TOLERANCE: f64 = 1e-9;

fn check_denominator(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.abs() < POLE_TOLERANCE {
        Err(Error::Domain(format!("{name} is zero")))
    } else {
        Ok(value)
    }
}

/// Atmospheric pressure (kPa).
pub fn air_pressure(elevation: f64) -> f64 {
    101.3 * ((293. - 0.0065 * elevation) / 293.).powf(5.26)
}

/// Psychrometric constant (kPa °C^-1).
pub fn psychrometric_constant(elevation: f64) -> f64 {
    0.665e-3 * air_pressure(elevation)
}

/// Net radiation (MJ m^-2 day^-1).
pub fn net_radiation(elevation: f64, extraterrestrial_radiation: f64) -> f64 {
    (0.75 + 2e-5 * elevation) * extraterrestrial_radiation
}

/// Net longwave radiation (MJ m^-2 day^-1), negative when it is a loss.
///
/// Humidities are in percent. Fails when there is no extraterrestrial
/// radiation to form the `Rn/Ra` ratio with (polar night).
pub fn net_longwave_radiation(
    temp_mean_k: f64,
    rh_max: f64,
    rh_min: f64,
    net_radiation: f64,
    extraterrestrial_radiation: f64,
) -> Result<f64, Error> {
    if extraterrestrial_radiation <= 0. {
        return Err(Error::Domain(format!(
            "extraterrestrial radiation must be positive (got {extraterrestrial_radiation})"
        )));
    }
    let rh_mean = (rh_max + rh_min) / 2.;
    if rh_mean < 0. {
        return Err(Error::Domain(format!(
            "mean relative humidity must be non-negative (got {rh_mean})"
        )));
    }
    Ok(-LONGWAVE_COEFFICIENT
        * temp_mean_k.powf(4.)
        * (0.34 - 0.14 * rh_mean.sqrt())
        * (1.35 * net_radiation / extraterrestrial_radiation - 0.35))
}

pub fn adjusted_net_radiation(net_radiation: f64, net_longwave_radiation: f64) -> f64 {
    net_radiation + net_longwave_radiation
}

/// Difference of the saturation vapour pressure curves at mean and minimum
/// temperature (kPa).
pub fn saturation_vapor_pressure_deficit(temp_mean: f64, temp_min: f64) -> Result<f64, Error> {
    let mean_denominator = check_denominator("temp_mean + 237.3", temp_mean + 237.3)?;
    let min_denominator = check_denominator("temp_min + 237.3", temp_min + 237.3)?;
    Ok(0.6108
        * (((17.27 * temp_mean) / mean_denominator).exp()
            - ((17.27 * temp_min) / min_denominator).exp()))
}

/// Actual vapour pressure (kPa) from mean relative humidity in percent.
pub fn actual_vapor_pressure(rh_mean: f64, saturation_deficit: f64) -> f64 {
    rh_mean / 100. * saturation_deficit
}

/// Every intermediate of one day's computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EtoComponents {
    pub astronomy: AstronomicalFactors,
    /// kPa
    pub air_pressure: f64,
    /// MJ m^-2 day^-1
    pub net_radiation: f64,
    /// MJ m^-2 day^-1
    pub net_longwave_radiation: f64,
    /// MJ m^-2 day^-1
    pub adjusted_net_radiation: f64,
    /// kPa °C^-1
    pub psychrometric_constant: f64,
    /// kPa
    pub vapor_pressure_deficit: f64,
    /// kPa
    pub actual_vapor_pressure: f64,
    /// mm/day
    pub eto: f64,
}

/// Reference evapotranspiration for one day at `site`.
///
/// The radiation term uses `Rn_adj - Rl`, which takes the longwave correction
/// back out of the adjusted net radiation. This differs from the textbook
/// FAO-56 form and is kept so results match existing station records.
pub fn reference_evapotranspiration(
    site: &Site,
    observation: &DailyObservation,
) -> Result<EtoComponents, Error> {
    let astronomy = AstronomicalFactors::compute(site.latitude, observation.day_of_year);
    let ra = astronomy.extraterrestrial_radiation;

    let pressure = air_pressure(site.elevation);
    let rn = net_radiation(site.elevation, ra);
    let temp_mean_k = observation.temp_mean + 273.15;
    let rl = net_longwave_radiation(temp_mean_k, observation.rh_max, observation.rh_min, rn, ra)?;
    let rn_adj = adjusted_net_radiation(rn, rl);
    let gamma = psychrometric_constant(site.elevation);

    let es = saturation_vapor_pressure_deficit(observation.temp_mean, observation.temp_min)?;
    let rh_mean = (observation.rh_max + observation.rh_min) / 2.;
    let ea = actual_vapor_pressure(rh_mean, es);

    let temp_mean_273 = check_denominator("temp_mean + 273", observation.temp_mean + 273.)?;
    let eto = (0.408 * (rn_adj - rl) * (es - ea) + gamma * 900. / temp_mean_273 * (es - ea))
        / (es - ea + gamma * (1. + 0.34 * REFERENCE_WIND_SPEED));

    if !eto.is_finite() {
        return Err(Error::Domain(format!(
            "reference evapotranspiration is not finite on day {} (got {eto})",
            observation.day_of_year
        )));
    }

    Ok(EtoComponents {
        astronomy,
        air_pressure: pressure,
        net_radiation: rn,
        net_longwave_radiation: rl,
        adjusted_net_radiation: rn_adj,
        psychrometric_constant: gamma,
        vapor_pressure_deficit: es,
        actual_vapor_pressure: ea,
        eto,
    })
}

/// Crop evapotranspiration (mm/day). Unknown stages give `0`.
pub fn crop_evapotranspiration(eto: f64, growth_stage: &str) -> f64 {
    eto * crop_coefficient(growth_stage).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new(40.0, 200.0, "desarrollo").unwrap()
    }

    fn observation() -> DailyObservation {
        DailyObservation {
            day_of_year: 180,
            temp_max: 30.0,
            temp_min: 15.0,
            temp_mean: 22.5,
            rh_max: 70.0,
            rh_min: 30.0,
            precipitation: 0.0,
        }
    }

    #[test]
    fn pressure_at_sea_level() {
        assert!((air_pressure(0.0) - 101.3).abs() < 1e-12);
    }

    #[test]
    fn pressure_drops_with_elevation() {
        assert!(air_pressure(1000.0) < air_pressure(200.0));
        assert!((air_pressure(200.0) - 98.95810712074).abs() < 1e-9);
    }

    #[test]
    fn psychrometric_constant_reference_value() {
        assert!((psychrometric_constant(200.0) - 0.0658071412352921).abs() < 1e-12);
    }

    #[test]
    fn net_radiation_linear_in_elevation() {
        assert!((net_radiation(0.0, 40.0) - 30.0).abs() < 1e-12);
        assert!((net_radiation(1000.0, 40.0) - 30.8).abs() < 1e-12);
    }

    #[test]
    fn longwave_needs_positive_extraterrestrial_radiation() {
        let err = net_longwave_radiation(295.65, 70.0, 30.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn vapor_pressure_deficit_is_zero_for_equal_temperatures() {
        assert_eq!(saturation_vapor_pressure_deficit(12.0, 12.0).unwrap(), 0.0);
    }

    #[test]
    fn vapor_pressure_pole_is_rejected() {
        assert!(matches!(
            saturation_vapor_pressure_deficit(-237.3, 10.0),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            saturation_vapor_pressure_deficit(10.0, -237.3),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn kelvin_pole_is_rejected() {
        let obs = DailyObservation {
            temp_mean: -273.0,
            temp_min: -280.0,
            ..observation()
        };
        let err = reference_evapotranspiration(&site(), &obs).unwrap_err();
        assert_eq!(err, Error::Domain("temp_mean + 273 is zero".to_string()));
    }

    #[test]
    fn actual_vapor_pressure_scales_by_humidity() {
        assert!((actual_vapor_pressure(50.0, 2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reference_day_golden_value() {
        let components = reference_evapotranspiration(&site(), &observation()).unwrap();
        assert!((components.astronomy.extraterrestrial_radiation - 41.73671953662684).abs() < 1e-9);
        assert!((components.net_radiation - 31.46948653061664).abs() < 1e-9);
        assert!((components.net_longwave_radiation - 165.833623740398).abs() < 1e-6);
        assert!((components.vapor_pressure_deficit - 1.020241374489687).abs() < 1e-12);
        assert!((components.actual_vapor_pressure - 0.5101206872448435).abs() < 1e-12);
        assert!((components.eto - 10.717275002152014).abs() < 1e-9);
    }

    // Deviation from textbook FAO-56, pending confirmation from an
    // agronomist: the radiation term is `Rn_adj - Rl`, i.e. plain `Rn`.
    #[test]
    fn longwave_term_is_subtracted_back_out() {
        let c = reference_evapotranspiration(&site(), &observation()).unwrap();
        let radiation_term = c.adjusted_net_radiation - c.net_longwave_radiation;
        assert!((radiation_term - c.net_radiation).abs() < 1e-9);

        let deficit = c.vapor_pressure_deficit - c.actual_vapor_pressure;
        let textbook = (0.408 * c.adjusted_net_radiation * deficit
            + c.psychrometric_constant * 900. / (22.5 + 273.) * deficit)
            / (deficit + c.psychrometric_constant * 1.68);
        assert!((textbook - c.eto).abs() > 1.0);
    }

    #[test]
    fn crop_evapotranspiration_uses_stage() {
        assert!((crop_evapotranspiration(5.0, "cuajado") - 4.5).abs() < 1e-12);
        assert!((crop_evapotranspiration(5.0, "Parada_Invernal") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_stage_zeroes_crop_evapotranspiration() {
        let eto = reference_evapotranspiration(&site(), &observation()).unwrap().eto;
        assert_eq!(crop_evapotranspiration(eto, "dormant_unlisted"), 0.0);
    }

    #[test]
    fn polar_night_is_a_domain_error() {
        let site = Site::new(80.0, 0.0, "cuajado").unwrap();
        let obs = DailyObservation {
            day_of_year: 355,
            ..observation()
        };
        assert!(matches!(
            reference_evapotranspiration(&site, &obs),
            Err(Error::Domain(_))
        ));
    }
}
